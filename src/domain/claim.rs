//! Claim domain models
//!
//! A claim here is a named permission/capability entity scoped to a tenant,
//! distinct from JWT claims.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Claim entity, unique by (name, tenant_id)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Claim {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub tenant_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for Claim {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            description: None,
            tenant_id: 0,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

/// Claim response shape
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClaimDto {
    pub id: i64,
    pub name: String,
    pub description: String,
}

impl From<&Claim> for ClaimDto {
    fn from(claim: &Claim) -> Self {
        Self {
            id: claim.id,
            name: claim.name.clone(),
            description: claim.description.clone().unwrap_or_default(),
        }
    }
}

/// Input for creating a claim
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClaimInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(max = 1024))]
    pub description: Option<String>,
}

/// Input for updating a claim (partial patch)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClaimInput {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(max = 1024))]
    pub description: Option<String>,
}
