//! Token gate: JWT authentication middleware
//!
//! Verifies the Bearer token on every non-exempt request and injects the
//! verified subject into request extensions for downstream middleware.

use crate::domain::AuthContext;
use crate::error::{AppError, Result};
use crate::state::HasServices;
use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tracing::debug;

/// Authentication middleware.
///
/// Exempt paths are skipped by exact match before any token parsing. On
/// success, the subject claim and the raw token are stored in request
/// extensions as [`AuthContext`].
pub async fn token_gate<S: HasServices>(
    State(state): State<S>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response> {
    if state.config().exempt_paths.is_exempt(request.uri().path()) {
        return Ok(next.run(request).await);
    }

    let token = bearer_token_from_header(request.headers().get(AUTHORIZATION))?;
    let claims = state.jwt_manager().verify(&token)?;

    debug!(subject = %claims.sub, "token validation successful");

    request.extensions_mut().insert(AuthContext {
        subject: claims.sub,
        token,
    });

    Ok(next.run(request).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// Absent or empty header is `MissingHeader`; a non-Bearer scheme (matched
/// case-insensitively) or an empty token is `InvalidHeader`.
fn bearer_token_from_header(header: Option<&HeaderValue>) -> Result<String> {
    let value = header
        .ok_or(AppError::MissingHeader)?
        .to_str()
        .map_err(|_| AppError::InvalidHeader)?
        .trim();

    if value.is_empty() {
        return Err(AppError::MissingHeader);
    }

    let mut parts = value.splitn(2, ' ');
    let scheme = parts.next().unwrap_or_default();
    let token = parts.next().unwrap_or_default().trim();

    if !scheme.eq_ignore_ascii_case("Bearer") || token.is_empty() {
        return Err(AppError::InvalidHeader);
    }

    Ok(token.to_string())
}
