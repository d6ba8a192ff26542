//! Role business logic

use crate::domain::{canonicalize_name, CreateRoleInput, Principal, RoleDto, UpdateRoleInput};
use crate::error::{AppError, Duplicate, Resource, Result};
use crate::repository::RoleRepository;
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

pub struct RoleService<R: RoleRepository> {
    repo: Arc<R>,
}

impl<R: RoleRepository> RoleService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn get_all(&self, principal: Principal) -> Result<Vec<RoleDto>> {
        let roles = self.repo.find_all(principal.tenant_id).await?;
        Ok(roles.iter().map(RoleDto::from).collect())
    }

    pub async fn create(&self, principal: Principal, input: CreateRoleInput) -> Result<i64> {
        input.validate()?;
        let name = canonicalize_name(&input.name);

        if self
            .repo
            .exists_by_name(&name, principal.tenant_id, None)
            .await?
        {
            debug!(name = %name, tenant_id = principal.tenant_id, "role already exists");
            return Err(AppError::Conflict(Duplicate::Role));
        }

        let id = self.repo.create(&name, principal.tenant_id).await?;
        Ok(id)
    }

    pub async fn update(
        &self,
        principal: Principal,
        id: i64,
        input: UpdateRoleInput,
    ) -> Result<i64> {
        input.validate()?;

        let role = self
            .repo
            .find_by_id(id, principal.tenant_id)
            .await?
            .ok_or(AppError::NotFound(Resource::Role))?;

        let mut staged_name = None;
        if let Some(name) = &input.name {
            let name = canonicalize_name(name);
            if name != role.name {
                if self
                    .repo
                    .exists_by_name(&name, principal.tenant_id, Some(id))
                    .await?
                {
                    debug!(name = %name, "role name already in use");
                    return Err(AppError::Conflict(Duplicate::Role));
                }
                staged_name = Some(name);
            }
        }

        // No-op short-circuit: identical input performs zero writes.
        let Some(name) = staged_name else {
            return Ok(role.id);
        };

        self.repo.update_name(id, &name).await?;
        Ok(role.id)
    }

    pub async fn delete(&self, principal: Principal, id: i64) -> Result<i64> {
        let role = self
            .repo
            .find_by_id(id, principal.tenant_id)
            .await?
            .ok_or(AppError::NotFound(Resource::Role))?;

        self.repo.delete(role.id).await?;
        debug!(id, "role deleted");
        Ok(role.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::repository::role::MockRoleRepository;
    use mockall::predicate::*;

    const PRINCIPAL: Principal = Principal {
        user_id: 7,
        tenant_id: 1,
    };

    fn service(repo: MockRoleRepository) -> RoleService<MockRoleRepository> {
        RoleService::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn test_create_role_scopes_to_principal_tenant() {
        let mut mock = MockRoleRepository::new();

        mock.expect_exists_by_name()
            .with(eq("ADMIN"), eq(1), eq(None))
            .returning(|_, _, _| Ok(false));
        mock.expect_create()
            .with(eq("ADMIN"), eq(1))
            .returning(|_, _| Ok(3));

        let id = service(mock)
            .create(
                PRINCIPAL,
                CreateRoleInput {
                    name: "admin".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(id, 3);
    }

    #[tokio::test]
    async fn test_create_role_conflict_same_tenant() {
        let mut mock = MockRoleRepository::new();
        mock.expect_exists_by_name()
            .with(eq("ADMIN"), eq(1), eq(None))
            .returning(|_, _, _| Ok(true));

        let result = service(mock)
            .create(
                PRINCIPAL,
                CreateRoleInput {
                    name: "Admin".to_string(),
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::Conflict(Duplicate::Role))));
    }

    #[tokio::test]
    async fn test_create_role_same_name_other_tenant_succeeds() {
        // The uniqueness predicate carries the tenant id, so the same name
        // in a different tenant passes the pre-check.
        let other = Principal {
            user_id: 8,
            tenant_id: 2,
        };
        let mut mock = MockRoleRepository::new();
        mock.expect_exists_by_name()
            .with(eq("ADMIN"), eq(2), eq(None))
            .returning(|_, _, _| Ok(false));
        mock.expect_create()
            .with(eq("ADMIN"), eq(2))
            .returning(|_, _| Ok(9));

        let id = service(mock)
            .create(
                other,
                CreateRoleInput {
                    name: "admin".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(id, 9);
    }

    #[tokio::test]
    async fn test_update_role_not_found() {
        let mut mock = MockRoleRepository::new();
        mock.expect_find_by_id()
            .with(eq(4), eq(1))
            .returning(|_, _| Ok(None));

        let result = service(mock)
            .update(PRINCIPAL, 4, UpdateRoleInput { name: None })
            .await;
        assert!(matches!(result, Err(AppError::NotFound(Resource::Role))));
    }

    #[tokio::test]
    async fn test_update_role_noop_performs_zero_writes() {
        let mut mock = MockRoleRepository::new();
        mock.expect_find_by_id().with(eq(4), eq(1)).returning(|_, _| {
            Ok(Some(Role {
                id: 4,
                name: "VIEWER".to_string(),
                tenant_id: 1,
                ..Default::default()
            }))
        });
        // No update_name expectation: any write would panic the mock.

        let id = service(mock)
            .update(
                PRINCIPAL,
                4,
                UpdateRoleInput {
                    name: Some("viewer".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(id, 4);
    }

    #[tokio::test]
    async fn test_update_role_rename_collision_leaves_name() {
        let mut mock = MockRoleRepository::new();
        mock.expect_find_by_id().with(eq(4), eq(1)).returning(|_, _| {
            Ok(Some(Role {
                id: 4,
                name: "VIEWER".to_string(),
                tenant_id: 1,
                ..Default::default()
            }))
        });
        mock.expect_exists_by_name()
            .with(eq("ADMIN"), eq(1), eq(Some(4)))
            .returning(|_, _, _| Ok(true));

        let result = service(mock)
            .update(
                PRINCIPAL,
                4,
                UpdateRoleInput {
                    name: Some("admin".to_string()),
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::Conflict(Duplicate::Role))));
    }

    #[tokio::test]
    async fn test_update_role_rename_success() {
        let mut mock = MockRoleRepository::new();
        mock.expect_find_by_id().with(eq(4), eq(1)).returning(|_, _| {
            Ok(Some(Role {
                id: 4,
                name: "VIEWER".to_string(),
                tenant_id: 1,
                ..Default::default()
            }))
        });
        mock.expect_exists_by_name()
            .with(eq("EDITOR"), eq(1), eq(Some(4)))
            .returning(|_, _, _| Ok(false));
        mock.expect_update_name()
            .with(eq(4), eq("EDITOR"))
            .returning(|_, _| Ok(()));

        let id = service(mock)
            .update(
                PRINCIPAL,
                4,
                UpdateRoleInput {
                    name: Some("editor".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(id, 4);
    }

    #[tokio::test]
    async fn test_delete_role_not_found() {
        let mut mock = MockRoleRepository::new();
        mock.expect_find_by_id()
            .with(eq(12), eq(1))
            .returning(|_, _| Ok(None));

        let result = service(mock).delete(PRINCIPAL, 12).await;
        assert!(matches!(result, Err(AppError::NotFound(Resource::Role))));
    }

    #[tokio::test]
    async fn test_get_all_scoped_to_tenant() {
        let mut mock = MockRoleRepository::new();
        mock.expect_find_all().with(eq(1)).returning(|tenant_id| {
            Ok(vec![Role {
                id: 1,
                name: "ADMIN".to_string(),
                tenant_id,
                ..Default::default()
            }])
        });

        let dtos = service(mock).get_all(PRINCIPAL).await.unwrap();
        assert_eq!(dtos.len(), 1);
        assert_eq!(dtos[0].name, "ADMIN");
    }
}
