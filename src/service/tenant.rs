//! Tenant business logic

use crate::domain::{canonicalize_name, CreateTenantInput, TenantDto, UpdateTenantInput};
use crate::error::{AppError, Duplicate, Resource, Result};
use crate::repository::TenantRepository;
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

pub struct TenantService<R: TenantRepository> {
    repo: Arc<R>,
}

impl<R: TenantRepository> TenantService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn get_all(&self) -> Result<Vec<TenantDto>> {
        let tenants = self.repo.find_all().await?;
        Ok(tenants.iter().map(TenantDto::from).collect())
    }

    pub async fn create(&self, input: CreateTenantInput) -> Result<i64> {
        input.validate()?;
        let name = canonicalize_name(&input.name);

        if self.repo.exists_by_name(&name, None).await? {
            debug!(name = %name, "tenant already exists");
            return Err(AppError::Conflict(Duplicate::Tenant));
        }

        let id = self.repo.create(&name).await?;
        debug!(id, "tenant created");
        Ok(id)
    }

    pub async fn update(&self, id: i64, input: UpdateTenantInput) -> Result<i64> {
        input.validate()?;

        let tenant = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(Resource::Tenant))?;

        let mut staged_name = None;
        if let Some(name) = &input.name {
            let name = canonicalize_name(name);
            if name != tenant.name {
                if self.repo.exists_by_name(&name, Some(id)).await? {
                    debug!(name = %name, "tenant name already in use");
                    return Err(AppError::Conflict(Duplicate::Tenant));
                }
                staged_name = Some(name);
            }
        }

        // No-op short-circuit: identical input performs zero writes.
        let Some(name) = staged_name else {
            return Ok(tenant.id);
        };

        self.repo.update_name(id, &name).await?;
        Ok(tenant.id)
    }

    pub async fn delete(&self, id: i64) -> Result<i64> {
        let tenant = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(Resource::Tenant))?;

        self.repo.delete(tenant.id).await?;
        debug!(id, "tenant deleted");
        Ok(tenant.id)
    }
}
