//! Claim service
//!
//! The five claim operations and the create-or-merge decision behind upsert.
//!
//! Upsert never drops stored values: an incoming set is unioned into the
//! existing one. `update_by_id` is the only path that replaces values
//! wholesale.

use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use core_kernel::{ClaimId, Clock, PortError, SystemClock};

use crate::claim::{ClaimInput, ClaimRecord, ClaimView, NewClaimRecord};
use crate::codec::{decode_claim_value, encode_claim_values};
use crate::error::ClaimError;
use crate::merge::{distinct_in_order, merge_values};
use crate::ports::ClaimStore;

/// Rounds of find-then-write before an upsert gives up on a contended slot
const MAX_UPSERT_ATTEMPTS: usize = 5;

/// Application service for claim records
#[derive(Clone)]
pub struct ClaimService {
    store: Arc<dyn ClaimStore>,
    clock: Arc<dyn Clock>,
}

impl ClaimService {
    /// Creates a service backed by the given store and the system clock
    pub fn new(store: Arc<dyn ClaimStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn ClaimStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// The store behind this service, for health checks
    pub fn store(&self) -> &Arc<dyn ClaimStore> {
        &self.store
    }

    /// Lists every claim; an empty store yields an empty list
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<ClaimView>, ClaimError> {
        info!("Executed list claims");

        let result = async {
            self.store
                .list_all()
                .await?
                .into_iter()
                .map(ClaimView::try_from)
                .collect::<Result<Vec<_>, _>>()
        }
        .await;

        log_outcome("list", result)
    }

    /// Gets a claim by id
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: ClaimId) -> Result<ClaimView, ClaimError> {
        info!(claim_id = %id, "Executed get claim by id");

        let result = async {
            let record = self.store.find_by_id(id).await?.ok_or(ClaimError::NotFound(id))?;
            ClaimView::try_from(record)
        }
        .await;

        log_outcome("get_by_id", result)
    }

    /// Creates the claim for `(user_id, claim_type)` or merges values into it
    #[instrument(skip(self, input), fields(user_id = %input.user_id, claim_type = %input.claim_type))]
    pub async fn upsert(&self, input: ClaimInput) -> Result<ClaimView, ClaimError> {
        info!(%input, "Executed create or update claim");

        let result = self.create_or_merge(&input).await;
        log_outcome("upsert", result)
    }

    /// Replaces the values of an existing claim wholesale
    #[instrument(skip(self, input), fields(user_id = %input.user_id, claim_type = %input.claim_type))]
    pub async fn update_by_id(&self, id: ClaimId, input: ClaimInput) -> Result<ClaimView, ClaimError> {
        info!(claim_id = %id, %input, "Executed update claim");

        let result = async {
            let existing = self.store.find_by_id(id).await?.ok_or(ClaimError::NotFound(id))?;

            let replacement = ClaimRecord {
                id,
                user_id: input.user_id,
                claim_type: input.claim_type,
                claim_value: encode_claim_values(&input.claim_values)?,
                created_at: existing.created_at,
                updated_at: Some(self.clock.now()),
            };

            let stored = self.store.replace(replacement).await?;
            ClaimView::try_from(stored)
        }
        .await;

        log_outcome("update_by_id", result)
    }

    /// Deletes a claim; deleting a missing id succeeds as well
    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: ClaimId) -> Result<ClaimId, ClaimError> {
        info!(claim_id = %id, "Executed delete claim by id");

        let result = async {
            match self.store.find_by_id(id).await? {
                Some(_) => self.store.delete(id).await?,
                None => {
                    debug!(claim_id = %id, "Claim already absent");
                }
            }
            Ok::<_, ClaimError>(id)
        }
        .await;

        log_outcome("delete_by_id", result)
    }

    async fn create_or_merge(&self, input: &ClaimInput) -> Result<ClaimView, ClaimError> {
        for attempt in 1..=MAX_UPSERT_ATTEMPTS {
            if let Some(view) = self.try_create_or_merge(input).await? {
                return Ok(view);
            }
            warn!(attempt, "Claim changed concurrently, retrying upsert");
        }

        Err(PortError::conflict(format!(
            "claim {} for user {} kept changing during {} upsert attempts",
            input.claim_type, input.user_id, MAX_UPSERT_ATTEMPTS
        ))
        .into())
    }

    /// One round of find, then insert or merge
    ///
    /// `Ok(None)` means a concurrent writer got in between and the round
    /// must be repeated against fresh state.
    async fn try_create_or_merge(&self, input: &ClaimInput) -> Result<Option<ClaimView>, ClaimError> {
        if let Some(existing) = self
            .store
            .find_by_user_and_type(input.user_id, input.claim_type)
            .await?
        {
            return self.merge_into(existing, &input.claim_values).await;
        }

        let values = distinct_in_order(input.claim_values.iter().cloned());
        let new_record = NewClaimRecord {
            user_id: input.user_id,
            claim_type: input.claim_type,
            claim_value: encode_claim_values(&values)?,
            created_at: self.clock.now(),
        };

        match self.store.insert(new_record).await {
            Ok(stored) => {
                debug!(claim_id = %stored.id, "Claim created");
                ClaimView::try_from(stored).map(Some)
            }
            Err(err) if err.is_conflict() => {
                debug!(error = %err, "Claim created concurrently");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn merge_into(
        &self,
        mut existing: ClaimRecord,
        incoming: &[String],
    ) -> Result<Option<ClaimView>, ClaimError> {
        let current = decode_claim_value(&existing.claim_value)?;
        let merged = merge_values(current, incoming);

        let expected = std::mem::replace(&mut existing.claim_value, encode_claim_values(&merged)?);
        existing.updated_at = Some(self.clock.now());

        match self.store.compare_and_set_value(existing, &expected).await {
            Ok(Some(stored)) => {
                debug!(claim_id = %stored.id, values = merged.len(), "Claim merged");
                ClaimView::try_from(stored).map(Some)
            }
            Ok(None) => Ok(None),
            Err(err) if err.is_not_found() => {
                debug!(error = %err, "Claim deleted concurrently");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }
}

fn log_outcome<T>(operation: &'static str, result: Result<T, ClaimError>) -> Result<T, ClaimError> {
    match &result {
        Ok(_) => {
            debug!(operation, "Claim operation succeeded");
        }
        Err(ClaimError::NotFound(id)) => {
            warn!(operation, claim_id = %id, "Claim with identifier {} not found", id);
        }
        Err(err) => {
            error!(operation, error = ?err, "Claim operation failed: {}", err);
        }
    }
    result
}
