//! REST API handlers and shared response types

pub mod auth;
pub mod claim;
pub mod health;
pub mod role;
pub mod tenant;
pub mod topic;
pub mod user;

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response carrying the id of a created, updated or deleted entity
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IdResponse {
    pub id: i64,
}

/// Response carrying a freshly minted access token
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// Registration response: the new user's id plus a token identical in
/// shape to the login token
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub id: i64,
    pub token: String,
}

/// Parse a path segment as a positive entity id.
pub(crate) fn parse_id(raw: &str) -> Result<i64> {
    let id: i64 = raw.trim().parse().map_err(|_| AppError::InvalidId)?;
    if id <= 0 {
        return Err(AppError::InvalidId);
    }
    Ok(id)
}
