//! Claims handlers

use axum::{extract::{Path, State}, Json};

use core_kernel::ClaimId;

use crate::{AppState, error::ApiError};
use crate::dto::claims::*;

/// Lists every claim
pub async fn list_claims(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    let claims = state.service.list().await?;
    Ok(Json(claims.into_iter().map(ClaimResponse::from).collect()))
}

/// Gets a claim by ID
pub async fn get_claim(
    State(state): State<AppState>,
    Path(id): Path<ClaimId>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state.service.get_by_id(id).await?;
    Ok(Json(claim.into()))
}

/// Creates a claim, or merges the submitted values into the existing one
pub async fn upsert_claim(
    State(state): State<AppState>,
    Json(request): Json<ClaimRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state.service.upsert(request.into()).await?;
    Ok(Json(claim.into()))
}

/// Replaces a claim's values
pub async fn update_claim(
    State(state): State<AppState>,
    Path(id): Path<ClaimId>,
    Json(request): Json<ClaimRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state.service.update_by_id(id, request.into()).await?;
    Ok(Json(claim.into()))
}

/// Deletes a claim and echoes its id
pub async fn delete_claim(
    State(state): State<AppState>,
    Path(id): Path<ClaimId>,
) -> Result<Json<ClaimId>, ApiError> {
    let id = state.service.delete_by_id(id).await?;
    Ok(Json(id))
}
