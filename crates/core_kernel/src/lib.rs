//! Core Kernel - Foundational types shared by every crate of the claims service
//!
//! This crate provides the fundamental building blocks used across the workspace:
//! - Strongly-typed numeric identifiers
//! - Port infrastructure (errors, health checks) for the ports and adapters layering
//! - Time sources and timezone handling

pub mod identifiers;
pub mod ports;
pub mod temporal;
pub mod error;

pub use identifiers::{ClaimId, UserId};
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
};
pub use temporal::{Clock, SystemClock, FixedClock, Timezone};
pub use error::CoreError;
