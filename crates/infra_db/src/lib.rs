//! Infrastructure Database Layer
//!
//! PostgreSQL persistence for the claims service using SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern: `ClaimsRepository` owns the SQL
//! and row types, and `PostgresClaimStore` adapts it to the domain's
//! `ClaimStore` port, translating rows and errors.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{ConnectionSettings, create_pool, adapters::PostgresClaimStore};
//!
//! let pool = create_pool(ConnectionSettings::default().into()).await?;
//! infra_db::run_migrations(&pool).await?;
//! let store = PostgresClaimStore::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, DatabaseConfig, ConnectionSettings};
pub use error::DatabaseError;

use sqlx::migrate::Migrator;
use tracing::info;

/// Embedded schema migrations
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Applies all pending schema migrations
pub async fn run_migrations(pool: &DatabasePool) -> Result<(), DatabaseError> {
    info!("Running database migrations...");
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
    info!("Database migrations applied");
    Ok(())
}
