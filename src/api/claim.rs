//! Claim API handlers

use crate::api::{parse_id, IdResponse};
use crate::domain::{CreateClaimInput, Principal, UpdateClaimInput};
use crate::error::Result;
use crate::state::HasServices;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

/// List the tenant's claims
pub async fn list<S: HasServices>(
    State(state): State<S>,
    principal: Principal,
) -> Result<impl IntoResponse> {
    let claims = state.claim_service().get_all(principal).await?;
    Ok(Json(claims))
}

/// Create a claim
pub async fn create<S: HasServices>(
    State(state): State<S>,
    principal: Principal,
    Json(input): Json<CreateClaimInput>,
) -> Result<impl IntoResponse> {
    let id = state.claim_service().create(principal, input).await?;
    Ok(Json(IdResponse { id }))
}

/// Partially update a claim
pub async fn update<S: HasServices>(
    State(state): State<S>,
    principal: Principal,
    Path(id): Path<String>,
    Json(input): Json<UpdateClaimInput>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&id)?;
    let id = state.claim_service().update(principal, id, input).await?;
    Ok(Json(IdResponse { id }))
}

/// Delete a claim
pub async fn delete<S: HasServices>(
    State(state): State<S>,
    principal: Principal,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&id)?;
    let id = state.claim_service().delete(principal, id).await?;
    Ok(Json(IdResponse { id }))
}
