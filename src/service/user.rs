//! User business logic

use crate::domain::{Principal, UpdateUserInput, UserDto};
use crate::error::{AppError, Duplicate, Resource, Result};
use crate::repository::{RoleRepository, UserChanges, UserRepository};
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

pub struct UserService<U: UserRepository, R: RoleRepository> {
    users: Arc<U>,
    roles: Arc<R>,
}

impl<U: UserRepository, R: RoleRepository> UserService<U, R> {
    pub fn new(users: Arc<U>, roles: Arc<R>) -> Self {
        Self { users, roles }
    }

    pub async fn get_all(&self, principal: Principal) -> Result<Vec<UserDto>> {
        let users = self.users.find_all(principal.tenant_id).await?;
        Ok(users.iter().map(UserDto::from).collect())
    }

    pub async fn get(&self, principal: Principal, id: i64) -> Result<UserDto> {
        let user = self
            .users
            .find_with_role(id, principal.tenant_id)
            .await?
            .ok_or(AppError::NotFound(Resource::User))?;
        Ok(UserDto::from(&user))
    }

    pub async fn update(
        &self,
        principal: Principal,
        id: i64,
        input: UpdateUserInput,
    ) -> Result<i64> {
        input.validate()?;

        let user = self
            .users
            .find_by_id(id, principal.tenant_id)
            .await?
            .ok_or(AppError::NotFound(Resource::User))?;

        let mut changes = UserChanges::default();

        if let Some(name) = &input.name {
            if *name != user.name {
                changes.name = Some(name.clone());
            }
        }

        if let Some(email) = &input.email {
            if *email != user.email {
                if self
                    .users
                    .exists_by_email_in_tenant(email, principal.tenant_id, id)
                    .await?
                {
                    debug!(email = %email, "user email already exists");
                    return Err(AppError::Conflict(Duplicate::UserEmail));
                }
                changes.email = Some(email.clone());
            }
        }

        if let Some(vsc_account) = &input.vsc_account {
            if *vsc_account != user.vsc_account {
                if self
                    .users
                    .exists_by_vsc_account(vsc_account, principal.tenant_id, id)
                    .await?
                {
                    debug!(vsc_account = %vsc_account, "user vsc account already exists");
                    return Err(AppError::Conflict(Duplicate::UserVscAccount));
                }
                changes.vsc_account = Some(vsc_account.clone());
            }
        }

        if let Some(role_id) = input.role_id {
            if role_id != user.role_id {
                // The new role must exist within the same tenant.
                if !self.roles.exists_by_id(role_id, principal.tenant_id).await? {
                    debug!(role_id, "role not found");
                    return Err(AppError::NotFound(Resource::Role));
                }
                changes.role_id = Some(role_id);
            }
        }

        // No-op short-circuit: identical input performs zero writes.
        if changes.is_empty() {
            return Ok(user.id);
        }

        self.users.update(id, &changes).await?;
        Ok(user.id)
    }

    pub async fn delete(&self, principal: Principal, id: i64) -> Result<i64> {
        let user = self
            .users
            .find_by_id(id, principal.tenant_id)
            .await?
            .ok_or(AppError::NotFound(Resource::User))?;

        self.users.delete(user.id).await?;
        debug!(id, "user deleted");
        Ok(user.id)
    }
}
