//! PostgreSQL Claim Store Adapter
//!
//! Implements the domain's `ClaimStore` port on top of `ClaimsRepository`:
//!
//! - Translates domain records into rows and back
//! - Translates database errors into port errors (a unique violation on
//!   `(user_id, claim_type)` becomes `PortError::Conflict`)
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresClaimStore;
//! use domain_claims::{ClaimService, ClaimStore};
//! use std::sync::Arc;
//!
//! let store: Arc<dyn ClaimStore> = Arc::new(PostgresClaimStore::new(pool));
//! let service = ClaimService::new(store);
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::instrument;

use core_kernel::{
    AdapterHealth, ClaimId, DomainPort, HealthCheckResult, HealthCheckable, PortError, UserId,
};
use domain_claims::{ClaimRecord, ClaimStore, ClaimType, NewClaimRecord};

use crate::repositories::claims::{ClaimRow, ClaimTypeDb, ClaimsRepository, NewClaimRow};

/// PostgreSQL-backed implementation of the ClaimStore port
#[derive(Debug, Clone)]
pub struct PostgresClaimStore {
    repository: ClaimsRepository,
}

impl PostgresClaimStore {
    /// Creates a new PostgreSQL claim store
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ClaimsRepository::new(pool),
        }
    }

    /// Returns a reference to the underlying repository
    pub fn repository(&self) -> &ClaimsRepository {
        &self.repository
    }
}

impl DomainPort for PostgresClaimStore {}

#[async_trait]
impl HealthCheckable for PostgresClaimStore {
    /// Checks database connectivity with a `SELECT 1`
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.repository.pool())
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(_) => HealthCheckResult {
                adapter_id: "postgres-claim-store".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms,
                message: None,
                checked_at: Utc::now(),
            },
            Err(e) => HealthCheckResult {
                adapter_id: "postgres-claim-store".to_string(),
                status: AdapterHealth::Unhealthy,
                latency_ms,
                message: Some(format!("Database error: {}", e)),
                checked_at: Utc::now(),
            },
        }
    }
}

#[async_trait]
impl ClaimStore for PostgresClaimStore {
    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<ClaimRecord>, PortError> {
        let rows = self.repository.list_all().await?;
        Ok(rows.into_iter().map(row_to_record).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ClaimId) -> Result<Option<ClaimRecord>, PortError> {
        let row = self.repository.find_by_id(id.value()).await?;
        Ok(row.map(row_to_record))
    }

    #[instrument(skip(self))]
    async fn find_by_user_and_type(
        &self,
        user_id: UserId,
        claim_type: ClaimType,
    ) -> Result<Option<ClaimRecord>, PortError> {
        let row = self
            .repository
            .find_by_user_and_type(user_id.value(), domain_to_db_claim_type(claim_type))
            .await?;
        Ok(row.map(row_to_record))
    }

    #[instrument(skip(self, record), fields(user_id = %record.user_id, claim_type = %record.claim_type))]
    async fn insert(&self, record: NewClaimRecord) -> Result<ClaimRecord, PortError> {
        let row = self
            .repository
            .insert(NewClaimRow {
                user_id: record.user_id.value(),
                claim_type: domain_to_db_claim_type(record.claim_type),
                claim_value: record.claim_value,
                created_at: record.created_at,
            })
            .await?;
        Ok(row_to_record(row))
    }

    #[instrument(skip(self, record), fields(claim_id = %record.id))]
    async fn replace(&self, record: ClaimRecord) -> Result<ClaimRecord, PortError> {
        let row = self.repository.replace(record_to_row(record)).await?;
        Ok(row_to_record(row))
    }

    #[instrument(skip(self, record, expected_value), fields(claim_id = %record.id))]
    async fn compare_and_set_value(
        &self,
        record: ClaimRecord,
        expected_value: &str,
    ) -> Result<Option<ClaimRecord>, PortError> {
        let row = self
            .repository
            .compare_and_set_value(
                record.id.value(),
                &record.claim_value,
                record.updated_at,
                expected_value,
            )
            .await?;
        Ok(row.map(row_to_record))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ClaimId) -> Result<(), PortError> {
        self.repository.delete(id.value()).await?;
        Ok(())
    }
}

// ============================================================================
// Conversion Functions
// ============================================================================

fn row_to_record(row: ClaimRow) -> ClaimRecord {
    ClaimRecord {
        id: ClaimId::new(row.id),
        user_id: UserId::new(row.user_id),
        claim_type: db_to_domain_claim_type(row.claim_type),
        claim_value: row.claim_value,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn record_to_row(record: ClaimRecord) -> ClaimRow {
    ClaimRow {
        id: record.id.value(),
        user_id: record.user_id.value(),
        claim_type: domain_to_db_claim_type(record.claim_type),
        claim_value: record.claim_value,
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}

fn db_to_domain_claim_type(db: ClaimTypeDb) -> ClaimType {
    match db {
        ClaimTypeDb::Read => ClaimType::Read,
        ClaimTypeDb::Write => ClaimType::Write,
        ClaimTypeDb::SubscriptionBlacklist => ClaimType::SubscriptionBlacklist,
        ClaimTypeDb::SubscriptionWhitelist => ClaimType::SubscriptionWhitelist,
        ClaimTypeDb::PublishBlacklist => ClaimType::PublishBlacklist,
        ClaimTypeDb::PublishWhitelist => ClaimType::PublishWhitelist,
    }
}

fn domain_to_db_claim_type(claim_type: ClaimType) -> ClaimTypeDb {
    match claim_type {
        ClaimType::Read => ClaimTypeDb::Read,
        ClaimType::Write => ClaimTypeDb::Write,
        ClaimType::SubscriptionBlacklist => ClaimTypeDb::SubscriptionBlacklist,
        ClaimType::SubscriptionWhitelist => ClaimTypeDb::SubscriptionWhitelist,
        ClaimType::PublishBlacklist => ClaimTypeDb::PublishBlacklist,
        ClaimType::PublishWhitelist => ClaimTypeDb::PublishWhitelist,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_claim_type_mapping_roundtrip() {
        for claim_type in ClaimType::ALL {
            assert_eq!(db_to_domain_claim_type(domain_to_db_claim_type(claim_type)), claim_type);
        }
    }

    #[test]
    fn test_record_row_roundtrip() {
        let record = ClaimRecord {
            id: ClaimId::new(4),
            user_id: UserId::new(9),
            claim_type: ClaimType::PublishBlacklist,
            claim_value: r#"["a","b"]"#.to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 59).unwrap(),
            updated_at: None,
        };

        let row = record_to_row(record.clone());
        assert_eq!(row.id, 4);
        assert_eq!(row.claim_type, ClaimTypeDb::PublishBlacklist);
        assert_eq!(row_to_record(row), record);
    }
}
