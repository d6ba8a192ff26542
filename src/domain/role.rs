//! Role domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Role entity, unique by (name, tenant_id)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub tenant_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for Role {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            tenant_id: 0,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

/// Role response shape
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleDto {
    pub id: i64,
    pub name: String,
}

impl From<&Role> for RoleDto {
    fn from(role: &Role) -> Self {
        Self {
            id: role.id,
            name: role.name.clone(),
        }
    }
}

/// Input for creating a role
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoleInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

/// Input for updating a role (partial patch)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoleInput {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_dto_from_entity() {
        let role = Role {
            id: 1,
            name: "ADMIN".to_string(),
            tenant_id: 9,
            ..Default::default()
        };
        let dto = RoleDto::from(&role);
        assert_eq!(dto.id, 1);
        assert_eq!(dto.name, "ADMIN");
    }

    #[test]
    fn test_create_input_validation() {
        assert!(CreateRoleInput {
            name: "viewer".to_string()
        }
        .validate()
        .is_ok());
        assert!(CreateRoleInput {
            name: String::new()
        }
        .validate()
        .is_err());
    }
}
