//! Claim repository

use crate::domain::Claim;
use crate::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::MySqlPool;

/// Staged claim columns; only the fields present are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimChanges {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ClaimChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClaimRepository: Send + Sync {
    async fn find_all(&self, tenant_id: i64) -> Result<Vec<Claim>>;
    async fn find_by_id(&self, id: i64, tenant_id: i64) -> Result<Option<Claim>>;
    async fn exists_by_name(
        &self,
        name: &str,
        tenant_id: i64,
        exclude_id: Option<i64>,
    ) -> Result<bool>;
    async fn create<'a>(
        &self,
        name: &str,
        description: Option<&'a str>,
        tenant_id: i64,
    ) -> Result<i64>;
    async fn update(&self, id: i64, changes: &ClaimChanges) -> Result<()>;
    async fn delete(&self, id: i64) -> Result<()>;
}

pub struct ClaimRepositoryImpl {
    pool: MySqlPool,
}

impl ClaimRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClaimRepository for ClaimRepositoryImpl {
    async fn find_all(&self, tenant_id: i64) -> Result<Vec<Claim>> {
        let claims = sqlx::query_as::<_, Claim>(
            r#"
            SELECT id, name, description, tenant_id, created_at, updated_at
            FROM claims
            WHERE tenant_id = ?
            ORDER BY id
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(claims)
    }

    async fn find_by_id(&self, id: i64, tenant_id: i64) -> Result<Option<Claim>> {
        let claim = sqlx::query_as::<_, Claim>(
            r#"
            SELECT id, name, description, tenant_id, created_at, updated_at
            FROM claims
            WHERE id = ? AND tenant_id = ?
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(claim)
    }

    async fn exists_by_name(
        &self,
        name: &str,
        tenant_id: i64,
        exclude_id: Option<i64>,
    ) -> Result<bool> {
        let row: (i64,) = match exclude_id {
            Some(id) => {
                sqlx::query_as(
                    "SELECT COUNT(*) FROM claims WHERE name = ? AND tenant_id = ? AND id <> ?",
                )
                .bind(name)
                .bind(tenant_id)
                .bind(id)
                .fetch_one(&self.pool)
                .await?
            }
            None => sqlx::query_as("SELECT COUNT(*) FROM claims WHERE name = ? AND tenant_id = ?")
                .bind(name)
                .bind(tenant_id)
                .fetch_one(&self.pool)
                .await?,
        };
        Ok(row.0 > 0)
    }

    async fn create<'a>(
        &self,
        name: &str,
        description: Option<&'a str>,
        tenant_id: i64,
    ) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO claims (name, description, tenant_id, created_at)
            VALUES (?, ?, ?, NOW())
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(tenant_id)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_id() as i64)
    }

    async fn update(&self, id: i64, changes: &ClaimChanges) -> Result<()> {
        if changes.is_empty() {
            return Ok(());
        }

        // Write only the staged columns plus the updated-at timestamp.
        let mut builder = sqlx::QueryBuilder::<sqlx::MySql>::new("UPDATE claims SET ");
        let mut columns = builder.separated(", ");
        if let Some(name) = &changes.name {
            columns.push("name = ");
            columns.push_bind_unseparated(name);
        }
        if let Some(description) = &changes.description {
            columns.push("description = ");
            columns.push_bind_unseparated(description);
        }
        columns.push("updated_at = ");
        columns.push_bind_unseparated(Utc::now());
        builder.push(" WHERE id = ");
        builder.push_bind(id);

        builder.build().execute(&self.pool).await?;

        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM claims WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
