//! Role API handlers

use crate::api::{parse_id, IdResponse};
use crate::domain::{CreateRoleInput, Principal, UpdateRoleInput};
use crate::error::Result;
use crate::state::HasServices;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

/// List the tenant's roles
pub async fn list<S: HasServices>(
    State(state): State<S>,
    principal: Principal,
) -> Result<impl IntoResponse> {
    let roles = state.role_service().get_all(principal).await?;
    Ok(Json(roles))
}

/// Create a role
pub async fn create<S: HasServices>(
    State(state): State<S>,
    principal: Principal,
    Json(input): Json<CreateRoleInput>,
) -> Result<impl IntoResponse> {
    let id = state.role_service().create(principal, input).await?;
    Ok(Json(IdResponse { id }))
}

/// Partially update a role
pub async fn update<S: HasServices>(
    State(state): State<S>,
    principal: Principal,
    Path(id): Path<String>,
    Json(input): Json<UpdateRoleInput>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&id)?;
    let id = state.role_service().update(principal, id, input).await?;
    Ok(Json(IdResponse { id }))
}

/// Delete a role
pub async fn delete<S: HasServices>(
    State(state): State<S>,
    principal: Principal,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&id)?;
    let id = state.role_service().delete(principal, id).await?;
    Ok(Json(IdResponse { id }))
}
