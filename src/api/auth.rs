//! Authentication API handlers (login, register)

use crate::api::{RegisterResponse, TokenResponse};
use crate::domain::{LoginInput, RegisterInput};
use crate::error::Result;
use crate::state::HasServices;
use axum::{extract::State, response::IntoResponse, Json};

/// Authenticate with email and password
pub async fn login<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<LoginInput>,
) -> Result<impl IntoResponse> {
    let token = state.auth_service().login(input).await?;
    Ok(Json(TokenResponse { token }))
}

/// Register a new user
pub async fn register<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<RegisterInput>,
) -> Result<impl IntoResponse> {
    let registered = state.auth_service().register(input).await?;
    Ok(Json(RegisterResponse {
        id: registered.id,
        token: registered.token,
    }))
}
