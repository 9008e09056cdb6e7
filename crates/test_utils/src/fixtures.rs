//! Pre-built Test Fixtures
//!
//! Ready-to-use claim data. Values are fixed so assertions can compare
//! against literals.

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;

use core_kernel::{ClaimId, FixedClock, UserId};
use domain_claims::ports::mock::MockClaimStore;
use domain_claims::{ClaimRecord, ClaimService, ClaimType};

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Creation time used by seeded records
    pub fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
    }

    /// Time the service clock reports in tests
    pub fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 30, 0).unwrap()
    }

    /// A clock frozen at [`TemporalFixtures::now`]
    pub fn clock() -> Arc<FixedClock> {
        Arc::new(FixedClock::new(Self::now()))
    }
}

/// Fixture for identifiers
pub struct IdFixtures;

impl IdFixtures {
    pub fn user() -> UserId {
        UserId::new(9)
    }

    pub fn other_user() -> UserId {
        UserId::new(10)
    }

    pub fn claim() -> ClaimId {
        ClaimId::new(1)
    }

    /// An id no fixture store ever assigns
    pub fn missing_claim() -> ClaimId {
        ClaimId::new(999)
    }
}

/// Fixture for claim value lists
pub struct ValueFixtures;

impl ValueFixtures {
    /// Topic filters for a sensor reader
    pub fn sensor_topics() -> Vec<String> {
        vec!["sensors/+/temp".to_string(), "sensors/+/humidity".to_string()]
    }

    /// Topic filters overlapping [`ValueFixtures::sensor_topics`] by one entry
    pub fn overlapping_topics() -> Vec<String> {
        vec!["sensors/+/humidity".to_string(), "alerts/#".to_string()]
    }

    /// The distinct union of the two lists above, in first-seen order
    pub fn merged_topics() -> Vec<String> {
        vec![
            "sensors/+/temp".to_string(),
            "sensors/+/humidity".to_string(),
            "alerts/#".to_string(),
        ]
    }
}

/// Fixture for complete claim records
pub struct ClaimFixtures;

impl ClaimFixtures {
    /// A `Read` claim for [`IdFixtures::user`] holding the sensor topics
    pub fn read_record() -> ClaimRecord {
        crate::builders::ClaimRecordBuilder::new()
            .with_id(IdFixtures::claim())
            .with_values(ValueFixtures::sensor_topics())
            .build()
    }

    /// A `PublishWhitelist` claim for another user
    pub fn publish_record() -> ClaimRecord {
        crate::builders::ClaimRecordBuilder::new()
            .with_id(ClaimId::new(2))
            .with_user(IdFixtures::other_user())
            .with_type(ClaimType::PublishWhitelist)
            .with_values(vec!["devices/10/status".to_string()])
            .updated_at(TemporalFixtures::created())
            .build()
    }

    /// Both records above, in id order
    pub fn seeded() -> Vec<ClaimRecord> {
        vec![Self::read_record(), Self::publish_record()]
    }
}

/// Creates an in-memory store and a service over it with a frozen clock
///
/// # Example
///
/// ```rust,ignore
/// let (store, service) = test_utils::mock_service(ClaimFixtures::seeded()).await;
/// ```
pub async fn mock_service(records: Vec<ClaimRecord>) -> (Arc<MockClaimStore>, ClaimService) {
    let store = Arc::new(MockClaimStore::with_records(records).await);
    let service = ClaimService::with_clock(store.clone(), TemporalFixtures::clock());
    (store, service)
}
