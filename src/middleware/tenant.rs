//! Tenant gate: tenant-membership middleware
//!
//! Runs strictly after the token gate. Validates the X-TENANT-ID header,
//! reads the subject the token gate wrote into request extensions, and
//! performs exactly one existence query to confirm the user belongs to the
//! claimed tenant. On success the resolved [`Principal`] is injected for
//! handlers.

use crate::domain::{AuthContext, Principal};
use crate::error::{AppError, Result};
use crate::repository::UserRepository;
use crate::state::HasServices;
use axum::{
    body::Body,
    extract::State,
    http::{Extensions, HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use tracing::debug;

/// Header carrying the claimed tenant id
pub const TENANT_HEADER: &str = "X-TENANT-ID";

pub async fn tenant_gate<S: HasServices>(
    State(state): State<S>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response> {
    if state.config().exempt_paths.is_exempt(request.uri().path()) {
        return Ok(next.run(request).await);
    }

    let tenant_id = extract_tenant_id(request.headers())?;
    let user_id = extract_user_id(request.extensions())?;

    // Exactly one existence query; data-access errors propagate unmodified.
    let is_member = state
        .user_repo()
        .exists_in_tenant(user_id, tenant_id)
        .await?;

    if !is_member {
        debug!(user_id, tenant_id, "user not a member of claimed tenant");
        return Err(AppError::Forbidden);
    }

    debug!(user_id, tenant_id, "tenant validation successful");

    request.extensions_mut().insert(Principal {
        user_id,
        tenant_id,
    });

    Ok(next.run(request).await)
}

/// Parse the tenant header as a positive i64.
fn extract_tenant_id(headers: &HeaderMap) -> Result<i64> {
    let raw = headers
        .get(TENANT_HEADER)
        .ok_or(AppError::MissingHeader)?
        .to_str()
        .map_err(|_| AppError::InvalidHeader)?;

    let tenant_id: i64 = raw.trim().parse().map_err(|_| AppError::InvalidHeader)?;
    if tenant_id <= 0 {
        return Err(AppError::InvalidHeader);
    }

    Ok(tenant_id)
}

/// Read the user id the token gate stored in request extensions.
///
/// A missing context means the token gate did not run or ran out of order;
/// both that and a non-numeric subject are authentication failures.
fn extract_user_id(extensions: &Extensions) -> Result<i64> {
    let auth = extensions
        .get::<AuthContext>()
        .ok_or(AppError::Unauthorized)?;

    let user_id: i64 = auth
        .subject
        .trim()
        .parse()
        .map_err(|_| AppError::Unauthorized)?;
    if user_id <= 0 {
        return Err(AppError::Unauthorized);
    }

    Ok(user_id)
}
