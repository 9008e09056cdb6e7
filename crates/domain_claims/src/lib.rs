//! Claims Domain
//!
//! Per-user claims for the MQTT broker's access-control configuration. A claim
//! is a typed, multi-valued attribute (for example the topics a user may
//! publish to) owned by a single user.
//!
//! # Claim Lifecycle
//!
//! ```text
//! NonExistent --upsert--> Existing(V1)
//! Existing(V) --upsert(W)--> Existing(distinct(V ++ W))
//! Existing(id, V) --update_by_id(id, X)--> Existing(id, X)
//! Existing --delete_by_id--> NonExistent --delete_by_id--> NonExistent
//! ```

pub mod claim;
pub mod codec;
pub mod merge;
pub mod ports;
pub mod service;
pub mod error;

pub use claim::{ClaimType, ClaimRecord, NewClaimRecord, ClaimInput, ClaimView};
pub use ports::ClaimStore;
pub use service::ClaimService;
pub use error::ClaimError;
