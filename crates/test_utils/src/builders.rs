//! Test Data Builders
//!
//! Builder patterns for claim inputs and records with sensible defaults.
//! Tests specify only the fields they care about.

use chrono::{DateTime, Utc};

use core_kernel::{ClaimId, UserId};
use domain_claims::codec::encode_claim_values;
use domain_claims::{ClaimInput, ClaimRecord, ClaimType};

use crate::fixtures::{IdFixtures, TemporalFixtures, ValueFixtures};

/// Builder for constructing claim inputs
#[derive(Debug, Clone)]
pub struct ClaimInputBuilder {
    user_id: UserId,
    claim_type: ClaimType,
    claim_values: Vec<String>,
}

impl Default for ClaimInputBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimInputBuilder {
    /// Creates a new builder: a `Read` claim for the fixture user
    pub fn new() -> Self {
        Self {
            user_id: IdFixtures::user(),
            claim_type: ClaimType::Read,
            claim_values: ValueFixtures::sensor_topics(),
        }
    }

    pub fn with_user(mut self, user_id: impl Into<UserId>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn with_type(mut self, claim_type: ClaimType) -> Self {
        self.claim_type = claim_type;
        self
    }

    /// Replaces the value list
    pub fn with_values<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
        self.claim_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Appends one value, duplicates included
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.claim_values.push(value.into());
        self
    }

    pub fn build(self) -> ClaimInput {
        ClaimInput::new(self.user_id, self.claim_type, self.claim_values)
    }
}

/// Builder for stored claim records
///
/// The value list is encoded on [`ClaimRecordBuilder::build`]; use
/// [`ClaimRecordBuilder::with_raw_value`] to seed a blob that does not decode.
#[derive(Debug, Clone)]
pub struct ClaimRecordBuilder {
    id: ClaimId,
    user_id: UserId,
    claim_type: ClaimType,
    claim_values: Vec<String>,
    raw_value: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl Default for ClaimRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimRecordBuilder {
    pub fn new() -> Self {
        Self {
            id: IdFixtures::claim(),
            user_id: IdFixtures::user(),
            claim_type: ClaimType::Read,
            claim_values: ValueFixtures::sensor_topics(),
            raw_value: None,
            created_at: TemporalFixtures::created(),
            updated_at: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<ClaimId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_user(mut self, user_id: impl Into<UserId>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn with_type(mut self, claim_type: ClaimType) -> Self {
        self.claim_type = claim_type;
        self
    }

    pub fn with_values<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
        self.claim_values = values.into_iter().map(Into::into).collect();
        self.raw_value = None;
        self
    }

    /// Stores `blob` verbatim as the encoded value
    pub fn with_raw_value(mut self, blob: impl Into<String>) -> Self {
        self.raw_value = Some(blob.into());
        self
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self
    }

    pub fn updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.updated_at = Some(at);
        self
    }

    /// Builds the record
    ///
    /// # Panics
    ///
    /// Panics if the value list cannot be encoded
    pub fn build(self) -> ClaimRecord {
        let claim_value = match self.raw_value {
            Some(blob) => blob,
            None => encode_claim_values(&self.claim_values).expect("claim values must encode"),
        };

        ClaimRecord {
            id: self.id,
            user_id: self.user_id,
            claim_type: self.claim_type,
            claim_value,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_builder_defaults() {
        let input = ClaimInputBuilder::new().build();
        assert_eq!(input.user_id, IdFixtures::user());
        assert_eq!(input.claim_type, ClaimType::Read);
        assert_eq!(input.claim_values, ValueFixtures::sensor_topics());
    }

    #[test]
    fn test_input_builder_keeps_duplicates() {
        let input = ClaimInputBuilder::new()
            .with_values(["a"])
            .with_value("a")
            .build();
        assert_eq!(input.claim_values, vec!["a", "a"]);
    }

    #[test]
    fn test_record_builder_encodes_values() {
        let record = ClaimRecordBuilder::new().with_values(["x", "y"]).build();
        assert_eq!(record.decode_values().unwrap(), vec!["x", "y"]);
        assert!(record.updated_at.is_none());
    }

    #[test]
    fn test_record_builder_raw_value() {
        let record = ClaimRecordBuilder::new().with_raw_value("not json").build();
        assert_eq!(record.claim_value, "not json");
        assert!(record.decode_values().is_err());
    }
}
