//! Claim business logic

use crate::domain::{canonicalize_name, ClaimDto, CreateClaimInput, Principal, UpdateClaimInput};
use crate::error::{AppError, Duplicate, Resource, Result};
use crate::repository::{ClaimChanges, ClaimRepository};
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

pub struct ClaimService<R: ClaimRepository> {
    repo: Arc<R>,
}

impl<R: ClaimRepository> ClaimService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn get_all(&self, principal: Principal) -> Result<Vec<ClaimDto>> {
        let claims = self.repo.find_all(principal.tenant_id).await?;
        Ok(claims.iter().map(ClaimDto::from).collect())
    }

    pub async fn create(&self, principal: Principal, input: CreateClaimInput) -> Result<i64> {
        input.validate()?;
        let name = canonicalize_name(&input.name);

        if self
            .repo
            .exists_by_name(&name, principal.tenant_id, None)
            .await?
        {
            debug!(name = %name, "claim already exists");
            return Err(AppError::Conflict(Duplicate::Claim));
        }

        let id = self
            .repo
            .create(&name, input.description.as_deref(), principal.tenant_id)
            .await?;
        Ok(id)
    }

    pub async fn update(
        &self,
        principal: Principal,
        id: i64,
        input: UpdateClaimInput,
    ) -> Result<i64> {
        input.validate()?;

        let claim = self
            .repo
            .find_by_id(id, principal.tenant_id)
            .await?
            .ok_or(AppError::NotFound(Resource::Claim))?;

        let mut changes = ClaimChanges::default();

        if let Some(name) = &input.name {
            let name = canonicalize_name(name);
            if name != claim.name {
                if self
                    .repo
                    .exists_by_name(&name, principal.tenant_id, Some(id))
                    .await?
                {
                    debug!(name = %name, "claim name already in use");
                    return Err(AppError::Conflict(Duplicate::Claim));
                }
                changes.name = Some(name);
            }
        }

        if let Some(description) = &input.description {
            if claim.description.as_deref().unwrap_or_default() != description.as_str() {
                changes.description = Some(description.clone());
            }
        }

        // No-op short-circuit: identical input performs zero writes.
        if changes.is_empty() {
            return Ok(claim.id);
        }

        self.repo.update(id, &changes).await?;
        Ok(claim.id)
    }

    pub async fn delete(&self, principal: Principal, id: i64) -> Result<i64> {
        let claim = self
            .repo
            .find_by_id(id, principal.tenant_id)
            .await?
            .ok_or(AppError::NotFound(Resource::Claim))?;

        self.repo.delete(claim.id).await?;
        Ok(claim.id)
    }
}
