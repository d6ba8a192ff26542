//! User API handlers

use crate::api::{parse_id, IdResponse};
use crate::domain::{Principal, UpdateUserInput};
use crate::error::Result;
use crate::state::HasServices;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

/// List the tenant's users, each with its role
pub async fn list<S: HasServices>(
    State(state): State<S>,
    principal: Principal,
) -> Result<impl IntoResponse> {
    let users = state.user_service().get_all(principal).await?;
    Ok(Json(users))
}

/// Fetch a single user
pub async fn get<S: HasServices>(
    State(state): State<S>,
    principal: Principal,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&id)?;
    let user = state.user_service().get(principal, id).await?;
    Ok(Json(user))
}

/// Partially update a user
pub async fn update<S: HasServices>(
    State(state): State<S>,
    principal: Principal,
    Path(id): Path<String>,
    Json(input): Json<UpdateUserInput>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&id)?;
    let id = state.user_service().update(principal, id, input).await?;
    Ok(Json(IdResponse { id }))
}

/// Delete a user
pub async fn delete<S: HasServices>(
    State(state): State<S>,
    principal: Principal,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&id)?;
    let id = state.user_service().delete(principal, id).await?;
    Ok(Json(IdResponse { id }))
}
