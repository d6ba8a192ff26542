//! Shared domain types: the request principal and name canonicalization

use crate::error::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};
use serde::{Deserialize, Serialize};

/// Canonical form of a unique entity name.
///
/// Applied uniformly to every name field that carries a uniqueness
/// constraint, before any comparison or persistence. One policy everywhere:
/// trim surrounding whitespace, uppercase.
pub fn canonicalize_name(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Output of the token gate: the verified subject and the raw bearer token,
/// carried in request extensions for the tenant gate and handlers.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// The token's `sub` claim, a stringified user id
    pub subject: String,
    /// The raw bearer token string
    pub token: String,
}

/// The request-scoped principal resolved by the tenant gate.
///
/// Every tenant-scoped query takes its tenant id from this value, never
/// from a client-supplied body or query field. A handler running without a
/// principal is a programming error (gate missing or mis-ordered), surfaced
/// as an internal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: i64,
    pub tenant_id: i64,
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Principal>().copied().ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!(
                "no principal in request extensions; tenant gate did not run"
            ))
        })
    }
}
