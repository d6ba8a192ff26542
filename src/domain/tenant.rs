//! Tenant domain models
//!
//! Tenant is the root of multi-tenancy and the one entity that is not
//! itself tenant-scoped; its name is unique across the whole installation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Tenant entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tenant {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for Tenant {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

/// Tenant response shape
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TenantDto {
    pub id: i64,
    pub name: String,
}

impl From<&Tenant> for TenantDto {
    fn from(tenant: &Tenant) -> Self {
        Self {
            id: tenant.id,
            name: tenant.name.clone(),
        }
    }
}

/// Input for creating a tenant
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTenantInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

/// Input for updating a tenant (partial patch)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTenantInput {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
}
