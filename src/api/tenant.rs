//! Tenant API handlers

use crate::api::{parse_id, IdResponse};
use crate::domain::{CreateTenantInput, UpdateTenantInput};
use crate::error::Result;
use crate::state::HasServices;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

/// List all tenants
pub async fn list<S: HasServices>(State(state): State<S>) -> Result<impl IntoResponse> {
    let tenants = state.tenant_service().get_all().await?;
    Ok(Json(tenants))
}

/// Create a tenant
pub async fn create<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<CreateTenantInput>,
) -> Result<impl IntoResponse> {
    let id = state.tenant_service().create(input).await?;
    Ok(Json(IdResponse { id }))
}

/// Partially update a tenant
pub async fn update<S: HasServices>(
    State(state): State<S>,
    Path(id): Path<String>,
    Json(input): Json<UpdateTenantInput>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&id)?;
    let id = state.tenant_service().update(id, input).await?;
    Ok(Json(IdResponse { id }))
}

/// Delete a tenant
pub async fn delete<S: HasServices>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&id)?;
    let id = state.tenant_service().delete(id).await?;
    Ok(Json(IdResponse { id }))
}
