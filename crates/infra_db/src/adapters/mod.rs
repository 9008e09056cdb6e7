//! Port adapters backed by PostgreSQL

pub mod claims;

pub use claims::PostgresClaimStore;
