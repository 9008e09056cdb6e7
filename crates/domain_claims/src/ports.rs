//! Claims Domain Ports
//!
//! The `ClaimStore` trait is everything the claim service needs from durable
//! storage. Adapters:
//!
//! - **PostgreSQL adapter**: `infra_db::adapters::PostgresClaimStore`
//! - **Mock adapter**: in-memory store for tests (`mock` feature)
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_claims::{ClaimService, ClaimStore};
//! use std::sync::Arc;
//!
//! let store: Arc<dyn ClaimStore> = Arc::new(PostgresClaimStore::new(pool));
//! let service = ClaimService::new(store);
//! ```

use async_trait::async_trait;

use core_kernel::{ClaimId, DomainPort, HealthCheckable, PortError, UserId};

use crate::claim::{ClaimRecord, ClaimType, NewClaimRecord};

/// Durable keyed storage for claim records
///
/// Every method is atomic for the single record it touches. No method spans
/// more than one record, so adapters need no multi-record transactions.
#[async_trait]
pub trait ClaimStore: DomainPort + HealthCheckable {
    /// Returns every record, ordered by id; empty when nothing is stored
    async fn list_all(&self) -> Result<Vec<ClaimRecord>, PortError>;

    async fn find_by_id(&self, id: ClaimId) -> Result<Option<ClaimRecord>, PortError>;

    async fn find_by_user_and_type(
        &self,
        user_id: UserId,
        claim_type: ClaimType,
    ) -> Result<Option<ClaimRecord>, PortError>;

    /// Persists a new record and returns it with its assigned id
    ///
    /// Fails with `PortError::Conflict` when a record for the same
    /// `(user_id, claim_type)` already exists.
    async fn insert(&self, record: NewClaimRecord) -> Result<ClaimRecord, PortError>;

    /// Overwrites the row identified by `record.id`
    ///
    /// Fails with `PortError::NotFound` when no such row exists.
    async fn replace(&self, record: ClaimRecord) -> Result<ClaimRecord, PortError>;

    /// Writes `record.claim_value` and `record.updated_at` only while the
    /// stored value still equals `expected_value`
    ///
    /// Returns `Ok(None)` when another writer changed the value since it was
    /// read. Fails with `PortError::NotFound` when the row no longer exists.
    async fn compare_and_set_value(
        &self,
        record: ClaimRecord,
        expected_value: &str,
    ) -> Result<Option<ClaimRecord>, PortError>;

    /// Removes the row if present; absent ids are a no-op
    async fn delete(&self, id: ClaimId) -> Result<(), PortError>;
}

/// Mock implementation of ClaimStore for testing
///
/// Keeps claims in memory and enforces the `(user_id, claim_type)` uniqueness
/// a real schema would. It can be switched into an unavailable mode to
/// exercise storage failure paths.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use chrono::Utc;

    use core_kernel::{AdapterHealth, HealthCheckResult};

    /// In-memory mock implementation of ClaimStore
    #[derive(Debug)]
    pub struct MockClaimStore {
        claims: Arc<RwLock<BTreeMap<ClaimId, ClaimRecord>>>,
        next_id: AtomicI64,
        writes: AtomicUsize,
        unavailable: AtomicBool,
    }

    impl Default for MockClaimStore {
        fn default() -> Self {
            Self {
                claims: Arc::default(),
                next_id: AtomicI64::new(1),
                writes: AtomicUsize::new(0),
                unavailable: AtomicBool::new(false),
            }
        }
    }

    impl MockClaimStore {
        /// Creates a new mock store
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with records for testing
        pub async fn with_records(records: Vec<ClaimRecord>) -> Self {
            let store = Self::new();
            {
                let mut claims = store.claims.write().await;
                for record in records {
                    let next = record.id.value() + 1;
                    store.next_id.fetch_max(next, Ordering::SeqCst);
                    claims.insert(record.id, record);
                }
            }
            store
        }

        /// Number of insert, replace and delete calls that changed the store
        pub fn write_count(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }

        /// Makes every subsequent call fail with a connection error
        pub fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::SeqCst);
        }

        /// Number of stored records
        pub async fn len(&self) -> usize {
            self.claims.read().await.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.claims.read().await.is_empty()
        }

        fn check_available(&self) -> Result<(), PortError> {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(PortError::connection("mock claim store is unavailable"));
            }
            Ok(())
        }
    }

    impl DomainPort for MockClaimStore {}

    #[async_trait]
    impl HealthCheckable for MockClaimStore {
        async fn health_check(&self) -> HealthCheckResult {
            let unavailable = self.unavailable.load(Ordering::SeqCst);
            HealthCheckResult {
                adapter_id: "mock-claim-store".to_string(),
                status: if unavailable {
                    AdapterHealth::Unhealthy
                } else {
                    AdapterHealth::Healthy
                },
                latency_ms: 0,
                message: unavailable.then(|| "Mock store switched off".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl ClaimStore for MockClaimStore {
        async fn list_all(&self) -> Result<Vec<ClaimRecord>, PortError> {
            self.check_available()?;
            Ok(self.claims.read().await.values().cloned().collect())
        }

        async fn find_by_id(&self, id: ClaimId) -> Result<Option<ClaimRecord>, PortError> {
            self.check_available()?;
            Ok(self.claims.read().await.get(&id).cloned())
        }

        async fn find_by_user_and_type(
            &self,
            user_id: UserId,
            claim_type: ClaimType,
        ) -> Result<Option<ClaimRecord>, PortError> {
            self.check_available()?;
            Ok(self
                .claims
                .read()
                .await
                .values()
                .find(|c| c.user_id == user_id && c.claim_type == claim_type)
                .cloned())
        }

        async fn insert(&self, record: NewClaimRecord) -> Result<ClaimRecord, PortError> {
            self.check_available()?;
            let mut claims = self.claims.write().await;
            if claims
                .values()
                .any(|c| c.user_id == record.user_id && c.claim_type == record.claim_type)
            {
                return Err(PortError::conflict(format!(
                    "claim {} already exists for user {}",
                    record.claim_type, record.user_id
                )));
            }

            let id = ClaimId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
            let stored = record.into_record(id);
            claims.insert(id, stored.clone());
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(stored)
        }

        async fn replace(&self, record: ClaimRecord) -> Result<ClaimRecord, PortError> {
            self.check_available()?;
            let mut claims = self.claims.write().await;
            if !claims.contains_key(&record.id) {
                return Err(PortError::not_found("Claim", record.id));
            }
            if claims.values().any(|c| {
                c.id != record.id && c.user_id == record.user_id && c.claim_type == record.claim_type
            }) {
                return Err(PortError::conflict(format!(
                    "claim {} already exists for user {}",
                    record.claim_type, record.user_id
                )));
            }

            claims.insert(record.id, record.clone());
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(record)
        }

        async fn compare_and_set_value(
            &self,
            record: ClaimRecord,
            expected_value: &str,
        ) -> Result<Option<ClaimRecord>, PortError> {
            self.check_available()?;
            let mut claims = self.claims.write().await;
            let stored = claims
                .get_mut(&record.id)
                .ok_or_else(|| PortError::not_found("Claim", record.id))?;
            if stored.claim_value != expected_value {
                return Ok(None);
            }

            stored.claim_value = record.claim_value;
            stored.updated_at = record.updated_at;
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(Some(stored.clone()))
        }

        async fn delete(&self, id: ClaimId) -> Result<(), PortError> {
            self.check_available()?;
            if self.claims.write().await.remove(&id).is_some() {
                self.writes.fetch_add(1, Ordering::SeqCst);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::mock::MockClaimStore;
    use chrono::Utc;

    fn new_record(user: i64, claim_type: ClaimType) -> NewClaimRecord {
        NewClaimRecord {
            user_id: UserId::new(user),
            claim_type,
            claim_value: r#"["a"]"#.to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_mock_store_insert_and_find() {
        let store = MockClaimStore::new();

        let stored = store.insert(new_record(1, ClaimType::Read)).await.unwrap();
        assert_eq!(stored.id, ClaimId::new(1));
        assert!(stored.updated_at.is_none());

        let by_id = store.find_by_id(stored.id).await.unwrap();
        assert_eq!(by_id, Some(stored.clone()));

        let by_slot = store
            .find_by_user_and_type(UserId::new(1), ClaimType::Read)
            .await
            .unwrap();
        assert_eq!(by_slot, Some(stored));
    }

    #[tokio::test]
    async fn test_mock_store_assigns_increasing_ids() {
        let store = MockClaimStore::new();
        let first = store.insert(new_record(1, ClaimType::Read)).await.unwrap();
        let second = store.insert(new_record(1, ClaimType::Write)).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_mock_store_rejects_duplicate_slot() {
        let store = MockClaimStore::new();
        store.insert(new_record(1, ClaimType::Read)).await.unwrap();

        let err = store.insert(new_record(1, ClaimType::Read)).await.unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_mock_store_replace_missing_is_not_found() {
        let store = MockClaimStore::new();
        let record = new_record(1, ClaimType::Read).into_record(ClaimId::new(77));

        let err = store.replace(record).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_store_compare_and_set_value() {
        let store = MockClaimStore::new();
        let stored = store.insert(new_record(1, ClaimType::Read)).await.unwrap();

        let mut changed = stored.clone();
        changed.claim_value = r#"["a","b"]"#.to_string();
        changed.updated_at = Some(Utc::now());

        let written = store
            .compare_and_set_value(changed.clone(), r#"["a"]"#)
            .await
            .unwrap();
        assert_eq!(written, Some(changed.clone()));

        // The stored value moved on, so a write based on the old one is refused
        let stale = store.compare_and_set_value(changed, r#"["a"]"#).await.unwrap();
        assert!(stale.is_none());
        assert_eq!(store.write_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_store_compare_and_set_missing_is_not_found() {
        let store = MockClaimStore::new();
        let record = new_record(1, ClaimType::Read).into_record(ClaimId::new(5));

        let err = store.compare_and_set_value(record, "[]").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_mock_store_delete_is_idempotent() {
        let store = MockClaimStore::new();
        let stored = store.insert(new_record(2, ClaimType::Read)).await.unwrap();

        store.delete(stored.id).await.unwrap();
        store.delete(stored.id).await.unwrap();

        assert!(store.is_empty().await);
        assert_eq!(store.write_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_store_unavailable() {
        let store = MockClaimStore::new();
        store.set_unavailable(true);

        let err = store.list_all().await.unwrap_err();
        assert!(err.is_transient());
        assert!(!store.health_check().await.is_operational());
    }

    #[tokio::test]
    async fn test_with_records_continues_id_sequence() {
        let seeded = new_record(5, ClaimType::Read).into_record(ClaimId::new(10));
        let store = MockClaimStore::with_records(vec![seeded]).await;

        let next = store.insert(new_record(5, ClaimType::Write)).await.unwrap();
        assert_eq!(next.id, ClaimId::new(11));
    }
}
