//! Tenant repository

use crate::domain::Tenant;
use crate::error::Result;
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TenantRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Tenant>>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Tenant>>;
    /// Uniqueness pre-check; `exclude_id` skips the row being renamed.
    async fn exists_by_name(&self, name: &str, exclude_id: Option<i64>) -> Result<bool>;
    async fn create(&self, name: &str) -> Result<i64>;
    async fn update_name(&self, id: i64, name: &str) -> Result<()>;
    async fn delete(&self, id: i64) -> Result<()>;
}

pub struct TenantRepositoryImpl {
    pool: MySqlPool,
}

impl TenantRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TenantRepository for TenantRepositoryImpl {
    async fn find_all(&self) -> Result<Vec<Tenant>> {
        let tenants = sqlx::query_as::<_, Tenant>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM tenants
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tenants)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Tenant>> {
        let tenant = sqlx::query_as::<_, Tenant>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM tenants
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tenant)
    }

    async fn exists_by_name(&self, name: &str, exclude_id: Option<i64>) -> Result<bool> {
        let row: (i64,) = match exclude_id {
            Some(id) => {
                sqlx::query_as("SELECT COUNT(*) FROM tenants WHERE name = ? AND id <> ?")
                    .bind(name)
                    .bind(id)
                    .fetch_one(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_as("SELECT COUNT(*) FROM tenants WHERE name = ?")
                    .bind(name)
                    .fetch_one(&self.pool)
                    .await?
            }
        };
        Ok(row.0 > 0)
    }

    async fn create(&self, name: &str) -> Result<i64> {
        // Scoped transaction: commits on success, rolls back on drop.
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO tenants (name, created_at)
            VALUES (?, NOW())
            "#,
        )
        .bind(name)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(result.last_insert_id() as i64)
    }

    async fn update_name(&self, id: i64, name: &str) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE tenants
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
        sqlx::query("DELETE FROM tenants WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
