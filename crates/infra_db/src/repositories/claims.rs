//! Claims repository implementation
//!
//! Database access for the `user_claims` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;

use crate::error::DatabaseError;

const CLAIM_COLUMNS: &str = "id, user_id, claim_type, claim_value, created_at, updated_at";

/// Repository for managing claim rows
#[derive(Debug, Clone)]
pub struct ClaimsRepository {
    pool: PgPool,
}

impl ClaimsRepository {
    /// Creates a new ClaimsRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Retrieves every claim ordered by id
    pub async fn list_all(&self) -> Result<Vec<ClaimRow>, DatabaseError> {
        let query = format!("SELECT {CLAIM_COLUMNS} FROM user_claims ORDER BY id");
        sqlx::query_as::<_, ClaimRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::classify)
    }

    /// Retrieves a claim by its identifier
    pub async fn find_by_id(&self, id: i64) -> Result<Option<ClaimRow>, DatabaseError> {
        let query = format!("SELECT {CLAIM_COLUMNS} FROM user_claims WHERE id = $1");
        sqlx::query_as::<_, ClaimRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::classify)
    }

    /// Retrieves the claim of a given type owned by a user
    pub async fn find_by_user_and_type(
        &self,
        user_id: i64,
        claim_type: ClaimTypeDb,
    ) -> Result<Option<ClaimRow>, DatabaseError> {
        let query = format!(
            "SELECT {CLAIM_COLUMNS} FROM user_claims WHERE user_id = $1 AND claim_type = $2"
        );
        sqlx::query_as::<_, ClaimRow>(&query)
            .bind(user_id)
            .bind(claim_type)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::classify)
    }

    /// Inserts a new claim
    ///
    /// # Returns
    ///
    /// The stored row with its generated id, or `DuplicateEntry` when the
    /// `(user_id, claim_type)` slot is already taken
    pub async fn insert(&self, claim: NewClaimRow) -> Result<ClaimRow, DatabaseError> {
        let query = format!(
            r#"
            INSERT INTO user_claims (user_id, claim_type, claim_value, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NULL)
            RETURNING {CLAIM_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, ClaimRow>(&query)
            .bind(claim.user_id)
            .bind(claim.claim_type)
            .bind(&claim.claim_value)
            .bind(claim.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::classify)?;

        debug!(claim_id = row.id, "Inserted claim row");
        Ok(row)
    }

    /// Overwrites every column of an existing claim
    ///
    /// # Returns
    ///
    /// The stored row, or `NotFound` when no row has the given id
    pub async fn replace(&self, claim: ClaimRow) -> Result<ClaimRow, DatabaseError> {
        let query = format!(
            r#"
            UPDATE user_claims
            SET user_id = $2, claim_type = $3, claim_value = $4, created_at = $5, updated_at = $6
            WHERE id = $1
            RETURNING {CLAIM_COLUMNS}
            "#
        );
        sqlx::query_as::<_, ClaimRow>(&query)
            .bind(claim.id)
            .bind(claim.user_id)
            .bind(claim.claim_type)
            .bind(&claim.claim_value)
            .bind(claim.created_at)
            .bind(claim.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::classify)?
            .ok_or_else(|| DatabaseError::not_found("Claim", claim.id))
    }

    /// Writes a new value list only while the stored one still equals
    /// `expected_value`
    ///
    /// # Returns
    ///
    /// The stored row, `None` when the value changed since it was read, or
    /// `NotFound` when the row is gone
    pub async fn compare_and_set_value(
        &self,
        id: i64,
        claim_value: &str,
        updated_at: Option<DateTime<Utc>>,
        expected_value: &str,
    ) -> Result<Option<ClaimRow>, DatabaseError> {
        let query = format!(
            r#"
            UPDATE user_claims
            SET claim_value = $2, updated_at = $3
            WHERE id = $1 AND claim_value = $4
            RETURNING {CLAIM_COLUMNS}
            "#
        );
        let swapped = sqlx::query_as::<_, ClaimRow>(&query)
            .bind(id)
            .bind(claim_value)
            .bind(updated_at)
            .bind(expected_value)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::classify)?;

        if swapped.is_some() {
            return Ok(swapped);
        }
        match self.find_by_id(id).await? {
            Some(_) => {
                debug!(claim_id = id, "Claim value changed since read");
                Ok(None)
            }
            None => Err(DatabaseError::not_found("Claim", id)),
        }
    }

    /// Deletes a claim
    ///
    /// # Returns
    ///
    /// Whether a row was removed
    pub async fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM user_claims WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::classify)?;

        Ok(result.rows_affected() > 0)
    }
}

/// Claim type enumeration as stored in PostgreSQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "claim_type", rename_all = "snake_case")]
pub enum ClaimTypeDb {
    Read,
    Write,
    SubscriptionBlacklist,
    SubscriptionWhitelist,
    PublishBlacklist,
    PublishWhitelist,
}

/// Database row for a claim
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ClaimRow {
    pub id: i64,
    pub user_id: i64,
    pub claim_type: ClaimTypeDb,
    pub claim_value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Data for creating a new claim
#[derive(Debug, Clone)]
pub struct NewClaimRow {
    pub user_id: i64,
    pub claim_type: ClaimTypeDb,
    pub claim_value: String,
    pub created_at: DateTime<Utc>,
}
