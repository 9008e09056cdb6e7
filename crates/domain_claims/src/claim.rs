//! Claim record and its read/write shapes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{ClaimId, CoreError, UserId};
use crate::codec;
use crate::error::ClaimError;

/// Category of a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimType {
    /// Topics the user may read
    Read,
    /// Topics the user may write
    Write,
    /// Topic filters the user may not subscribe to
    SubscriptionBlacklist,
    /// Topic filters the user may subscribe to
    SubscriptionWhitelist,
    /// Topics the user may not publish to
    PublishBlacklist,
    /// Topics the user may publish to
    PublishWhitelist,
}

impl ClaimType {
    pub const ALL: [ClaimType; 6] = [
        ClaimType::Read,
        ClaimType::Write,
        ClaimType::SubscriptionBlacklist,
        ClaimType::SubscriptionWhitelist,
        ClaimType::PublishBlacklist,
        ClaimType::PublishWhitelist,
    ];

    /// Symbolic name, identical to the wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimType::Read => "Read",
            ClaimType::Write => "Write",
            ClaimType::SubscriptionBlacklist => "SubscriptionBlacklist",
            ClaimType::SubscriptionWhitelist => "SubscriptionWhitelist",
            ClaimType::PublishBlacklist => "PublishBlacklist",
            ClaimType::PublishWhitelist => "PublishWhitelist",
        }
    }
}

impl fmt::Display for ClaimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClaimType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::validation(format!("Unknown claim type: {}", s)))
    }
}

/// A persisted claim
///
/// `claim_value` holds the encoded value list exactly as stored; use
/// [`ClaimRecord::decode_values`] or convert into a [`ClaimView`] to read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimRecord {
    pub id: ClaimId,
    pub user_id: UserId,
    pub claim_type: ClaimType,
    pub claim_value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ClaimRecord {
    pub fn decode_values(&self) -> Result<Vec<String>, ClaimError> {
        codec::decode_claim_value(&self.claim_value)
    }
}

/// A claim that has not been persisted yet; the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClaimRecord {
    pub user_id: UserId,
    pub claim_type: ClaimType,
    pub claim_value: String,
    pub created_at: DateTime<Utc>,
}

impl NewClaimRecord {
    /// Attaches a store-assigned id
    pub fn into_record(self, id: ClaimId) -> ClaimRecord {
        ClaimRecord {
            id,
            user_id: self.user_id,
            claim_type: self.claim_type,
            claim_value: self.claim_value,
            created_at: self.created_at,
            updated_at: None,
        }
    }
}

/// Write-side shape: what a caller submits to create, merge or replace a claim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimInput {
    pub user_id: UserId,
    pub claim_type: ClaimType,
    /// May contain duplicates
    pub claim_values: Vec<String>,
}

impl ClaimInput {
    pub fn new(user_id: UserId, claim_type: ClaimType, claim_values: Vec<String>) -> Self {
        Self {
            user_id,
            claim_type,
            claim_values,
        }
    }
}

impl fmt::Display for ClaimInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UserId: {}, ClaimType: {}, ClaimValues: [{}]",
            self.user_id,
            self.claim_type,
            self.claim_values.join(", ")
        )
    }
}

/// Read-side shape: a record with its value list decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimView {
    pub id: ClaimId,
    pub user_id: UserId,
    pub claim_type: ClaimType,
    pub claim_values: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl fmt::Display for ClaimView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Id: {}, UserId: {}, ClaimType: {}, ClaimValues: [{}], CreatedAt: {}, UpdatedAt: {}",
            self.id,
            self.user_id,
            self.claim_type,
            self.claim_values.join(", "),
            self.created_at.to_rfc3339(),
            self.updated_at
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "-".to_string())
        )
    }
}

impl TryFrom<ClaimRecord> for ClaimView {
    type Error = ClaimError;

    fn try_from(record: ClaimRecord) -> Result<Self, Self::Error> {
        let claim_values = record.decode_values()?;
        Ok(ClaimView {
            id: record.id,
            user_id: record.user_id,
            claim_type: record.claim_type,
            claim_values,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

impl TryFrom<ClaimView> for ClaimRecord {
    type Error = ClaimError;

    fn try_from(view: ClaimView) -> Result<Self, Self::Error> {
        Ok(ClaimRecord {
            id: view.id,
            user_id: view.user_id,
            claim_type: view.claim_type,
            claim_value: codec::encode_claim_values(&view.claim_values)?,
            created_at: view.created_at,
            updated_at: view.updated_at,
        })
    }
}

impl From<ClaimView> for ClaimInput {
    fn from(view: ClaimView) -> Self {
        ClaimInput {
            user_id: view.user_id,
            claim_type: view.claim_type,
            claim_values: view.claim_values,
        }
    }
}
