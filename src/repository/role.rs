//! Role repository

use crate::domain::Role;
use crate::error::Result;
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn find_all(&self, tenant_id: i64) -> Result<Vec<Role>>;
    async fn find_by_id(&self, id: i64, tenant_id: i64) -> Result<Option<Role>>;
    /// Uniqueness pre-check within the tenant; `exclude_id` skips the row
    /// being renamed.
    async fn exists_by_name(
        &self,
        name: &str,
        tenant_id: i64,
        exclude_id: Option<i64>,
    ) -> Result<bool>;
    /// Referential check used when assigning a role to a user.
    async fn exists_by_id(&self, id: i64, tenant_id: i64) -> Result<bool>;
    async fn create(&self, name: &str, tenant_id: i64) -> Result<i64>;
    async fn update_name(&self, id: i64, name: &str) -> Result<()>;
    async fn delete(&self, id: i64) -> Result<()>;
}

pub struct RoleRepositoryImpl {
    pool: MySqlPool,
}

impl RoleRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleRepository for RoleRepositoryImpl {
    async fn find_all(&self, tenant_id: i64) -> Result<Vec<Role>> {
        let roles = sqlx::query_as::<_, Role>(
            r#"
            SELECT id, name, tenant_id, created_at, updated_at
            FROM roles
            WHERE tenant_id = ?
            ORDER BY id
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(roles)
    }

    async fn find_by_id(&self, id: i64, tenant_id: i64) -> Result<Option<Role>> {
        let role = sqlx::query_as::<_, Role>(
            r#"
            SELECT id, name, tenant_id, created_at, updated_at
            FROM roles
            WHERE id = ? AND tenant_id = ?
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(role)
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
                    "SELECT COUNT(*) FROM roles WHERE name = ? AND tenant_id = ? AND id <> ?",
                )
                .bind(name)
                .bind(tenant_id)
                .bind(id)
                .fetch_one(&self.pool)
                .await?
            }
            None => sqlx::query_as("SELECT COUNT(*) FROM roles WHERE name = ? AND tenant_id = ?")
                .bind(name)
                .bind(tenant_id)
                .fetch_one(&self.pool)
                .await?,
        };
        Ok(row.0 > 0)
    }

    async fn exists_by_id(&self, id: i64, tenant_id: i64) -> Result<bool> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM roles WHERE id = ? AND tenant_id = ?")
                .bind(id)
                .bind(tenant_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(row.0 > 0)
    }

    async fn create(&self, name: &str, tenant_id: i64) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO roles (name, tenant_id, created_at)
            VALUES (?, ?, NOW())
            "#,
        )
        .bind(name)
        .bind(tenant_id)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_id() as i64)
    }

    async fn update_name(&self, id: i64, name: &str) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE roles
            SET name = ?, updated_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(name)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM roles WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
