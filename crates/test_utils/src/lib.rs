//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claims service test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for claims
//! - `builders`: Builder patterns for claim inputs and records
//! - `database`: PostgreSQL test container management
//! - `assertions`: Assertion helpers for claim values and views
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
