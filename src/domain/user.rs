//! User domain models

use super::role::RoleDto;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// User entity. Email and vsc_account are unique per tenant; the password
/// column holds an Argon2id PHC hash string, never plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub vsc_account: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role_id: i64,
    pub tenant_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            email: String::new(),
            vsc_account: String::new(),
            password: String::new(),
            role_id: 0,
            tenant_id: 0,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

/// User row joined with its role's name
#[derive(Debug, Clone, FromRow)]
pub struct UserWithRole {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub vsc_account: String,
    pub role_id: i64,
    pub role_name: String,
}

/// User response shape, embedding the role
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub vsc_account: String,
    pub role: RoleDto,
}

impl From<&UserWithRole> for UserDto {
    fn from(row: &UserWithRole) -> Self {
        Self {
            id: row.id,
            name: row.name.clone(),
            email: row.email.clone(),
            vsc_account: row.vsc_account.clone(),
            role: RoleDto {
                id: row.role_id,
                name: row.role_name.clone(),
            },
        }
    }
}

/// Input for updating a user (partial patch)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserInput {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub vsc_account: Option<String>,
    pub role_id: Option<i64>,
}

/// Login request body
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Registration request body
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 255))]
    pub password: String,
    #[validate(length(max = 255))]
    #[serde(default)]
    pub vsc_account: String,
    pub role_id: i64,
    pub tenant_id: i64,
}
