//! User repository
//!
//! Also hosts the single membership query the tenant gate depends on:
//! `exists_in_tenant(user_id, tenant_id)`.

use crate::domain::{User, UserWithRole};
use crate::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::MySqlPool;

/// Fields for inserting a new user row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub vsc_account: String,
    /// Argon2id PHC hash string, already derived by the caller
    pub password: String,
    pub role_id: i64,
    pub tenant_id: i64,
}

/// Staged user columns; only the fields present are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub vsc_account: Option<String>,
    pub role_id: Option<i64>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.vsc_account.is_none()
            && self.role_id.is_none()
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Login lookup; email is globally unique enough for authentication.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    /// Registration pre-check.
    async fn exists_by_email(&self, email: &str) -> Result<bool>;
    /// The tenant-membership check: does a user row exist with this id AND
    /// this tenant id?
    async fn exists_in_tenant(&self, user_id: i64, tenant_id: i64) -> Result<bool>;
    async fn find_all(&self, tenant_id: i64) -> Result<Vec<UserWithRole>>;
    async fn find_with_role(&self, id: i64, tenant_id: i64) -> Result<Option<UserWithRole>>;
    async fn find_by_id(&self, id: i64, tenant_id: i64) -> Result<Option<User>>;
    async fn exists_by_email_in_tenant(
        &self,
        email: &str,
        tenant_id: i64,
        exclude_id: i64,
    ) -> Result<bool>;
    async fn exists_by_vsc_account(
        &self,
        vsc_account: &str,
        tenant_id: i64,
        exclude_id: i64,
    ) -> Result<bool>;
    async fn create(&self, input: &NewUser) -> Result<i64>;
    async fn update(&self, id: i64, changes: &UserChanges) -> Result<()>;
    async fn delete(&self, id: i64) -> Result<()>;
}

pub struct UserRepositoryImpl {
    pool: MySqlPool,
}

impl UserRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str =
    "id, name, email, vsc_account, password, role_id, tenant_id, created_at, updated_at";

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0 > 0)
    }

    async fn exists_in_tenant(&self, user_id: i64, tenant_id: i64) -> Result<bool> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM users WHERE id = ? AND tenant_id = ?")
                .bind(user_id)
                .bind(tenant_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(row.0 > 0)
    }

    async fn find_all(&self, tenant_id: i64) -> Result<Vec<UserWithRole>> {
        let users = sqlx::query_as::<_, UserWithRole>(
            r#"
            SELECT u.id, u.name, u.email, u.vsc_account, u.role_id, r.name AS role_name
            FROM users u
            INNER JOIN roles r ON r.id = u.role_id
            WHERE u.tenant_id = ?
            ORDER BY u.id
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn find_with_role(&self, id: i64, tenant_id: i64) -> Result<Option<UserWithRole>> {
        let user = sqlx::query_as::<_, UserWithRole>(
            r#"
            SELECT u.id, u.name, u.email, u.vsc_account, u.role_id, r.name AS role_name
            FROM users u
            INNER JOIN roles r ON r.id = u.role_id
            WHERE u.id = ? AND u.tenant_id = ?
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: i64, tenant_id: i64) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ? AND tenant_id = ?");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(tenant_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn exists_by_email_in_tenant(
        &self,
        email: &str,
        tenant_id: i64,
        exclude_id: i64,
    ) -> Result<bool> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM users WHERE email = ? AND tenant_id = ? AND id <> ?",
        )
        .bind(email)
        .bind(tenant_id)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.0 > 0)
    }

    async fn exists_by_vsc_account(
        &self,
        vsc_account: &str,
        tenant_id: i64,
        exclude_id: i64,
    ) -> Result<bool> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM users WHERE vsc_account = ? AND tenant_id = ? AND id <> ?",
        )
        .bind(vsc_account)
        .bind(tenant_id)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.0 > 0)
    }

    async fn create(&self, input: &NewUser) -> Result<i64> {
        // Scoped transaction: commits on success, rolls back on drop.
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO users (name, email, vsc_account, password, role_id, tenant_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?, NOW())
            "#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.vsc_account)
        .bind(&input.password)
        .bind(input.role_id)
        .bind(input.tenant_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(result.last_insert_id() as i64)
    }

    async fn update(&self, id: i64, changes: &UserChanges) -> Result<()> {
        if changes.is_empty() {
            return Ok(());
        }

        // Write only the staged columns plus the updated-at timestamp.
        let mut builder = sqlx::QueryBuilder::<sqlx::MySql>::new("UPDATE users SET ");
        let mut columns = builder.separated(", ");
        if let Some(name) = &changes.name {
            columns.push("name = ");
            columns.push_bind_unseparated(name);
        }
        if let Some(email) = &changes.email {
            columns.push("email = ");
            columns.push_bind_unseparated(email);
        }
        if let Some(vsc_account) = &changes.vsc_account {
            columns.push("vsc_account = ");
            columns.push_bind_unseparated(vsc_account);
        }
        if let Some(role_id) = changes.role_id {
            columns.push("role_id = ");
            columns.push_bind_unseparated(role_id);
        }
        columns.push("updated_at = ");
        columns.push_bind_unseparated(Utc::now());
        builder.push(" WHERE id = ");
        builder.push_bind(id);

        builder.build().execute(&self.pool).await?;

        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
