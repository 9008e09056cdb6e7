//! Repository implementations
//!
//! Repositories encapsulate SQL queries and the row types they map to.
//! Queries are checked at runtime so the crate builds without a live
//! database.

pub mod claims;

pub use claims::ClaimsRepository;
