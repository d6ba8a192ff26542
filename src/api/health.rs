//! Health endpoint

use axum::{response::IntoResponse, Json};
use serde_json::json;

/// Root health check; exempt from authentication.
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "service": "tenantd",
        "status": "ok",
    }))
}
