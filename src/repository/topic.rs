//! Topic and sub-topic repository

use crate::domain::{SubTopic, SubTopicWithTopic, Topic};
use crate::error::Result;
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TopicRepository: Send + Sync {
    async fn find_all(&self, tenant_id: i64) -> Result<Vec<Topic>>;
    async fn find_by_id(&self, id: i64, tenant_id: i64) -> Result<Option<Topic>>;
    async fn exists_by_name(
        &self,
        name: &str,
        tenant_id: i64,
        exclude_id: Option<i64>,
    ) -> Result<bool>;
    async fn create(&self, name: &str, tenant_id: i64) -> Result<i64>;
    async fn update_name(&self, id: i64, name: &str) -> Result<()>;
    async fn delete(&self, id: i64) -> Result<()>;

    /// Sub-topics of a topic, each joined with the parent topic's name.
    async fn find_sub_topics(&self, topic_id: i64, tenant_id: i64)
        -> Result<Vec<SubTopicWithTopic>>;
    async fn find_sub_topic(
        &self,
        id: i64,
        topic_id: i64,
        tenant_id: i64,
    ) -> Result<Option<SubTopic>>;
    /// Sub-topic uniqueness is per (name, topic, tenant).
    async fn sub_topic_exists_by_name(
        &self,
        name: &str,
        topic_id: i64,
        tenant_id: i64,
        exclude_id: Option<i64>,
    ) -> Result<bool>;
    async fn create_sub_topic(&self, name: &str, topic_id: i64, tenant_id: i64) -> Result<i64>;
    async fn update_sub_topic_name(&self, id: i64, name: &str) -> Result<()>;
    async fn delete_sub_topic(&self, id: i64) -> Result<()>;
}

pub struct TopicRepositoryImpl {
    pool: MySqlPool,
}

impl TopicRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TopicRepository for TopicRepositoryImpl {
    async fn find_all(&self, tenant_id: i64) -> Result<Vec<Topic>> {
        let topics = sqlx::query_as::<_, Topic>(
            r#"
            SELECT id, name, tenant_id, created_at, updated_at
            FROM topics
            WHERE tenant_id = ?
            ORDER BY id
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(topics)
    }

    async fn find_by_id(&self, id: i64, tenant_id: i64) -> Result<Option<Topic>> {
        let topic = sqlx::query_as::<_, Topic>(
            r#"
            SELECT id, name, tenant_id, created_at, updated_at
            FROM topics
            WHERE id = ? AND tenant_id = ?
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(topic)
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
                    "SELECT COUNT(*) FROM topics WHERE name = ? AND tenant_id = ? AND id <> ?",
                )
                .bind(name)
                .bind(tenant_id)
                .bind(id)
                .fetch_one(&self.pool)
                .await?
            }
            None => sqlx::query_as("SELECT COUNT(*) FROM topics WHERE name = ? AND tenant_id = ?")
                .bind(name)
                .bind(tenant_id)
                .fetch_one(&self.pool)
                .await?,
        };
        Ok(row.0 > 0)
    }

    async fn create(&self, name: &str, tenant_id: i64) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO topics (name, tenant_id, created_at)
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
            UPDATE topics
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
        sqlx::query("DELETE FROM topics WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn find_sub_topics(
        &self,
        topic_id: i64,
        tenant_id: i64,
    ) -> Result<Vec<SubTopicWithTopic>> {
        let sub_topics = sqlx::query_as::<_, SubTopicWithTopic>(
            r#"
            SELECT s.id, s.name, s.topic_id, t.name AS topic_name
            FROM sub_topics s
            INNER JOIN topics t ON t.id = s.topic_id
            WHERE s.topic_id = ? AND s.tenant_id = ?
            ORDER BY s.id
            "#,
        )
        .bind(topic_id)
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sub_topics)
    }

    async fn find_sub_topic(
        &self,
        id: i64,
        topic_id: i64,
        tenant_id: i64,
    ) -> Result<Option<SubTopic>> {
        let sub_topic = sqlx::query_as::<_, SubTopic>(
            r#"
            SELECT id, name, topic_id, tenant_id, created_at, updated_at
            FROM sub_topics
            WHERE id = ? AND topic_id = ? AND tenant_id = ?
            "#,
        )
        .bind(id)
        .bind(topic_id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sub_topic)
    }

    async fn sub_topic_exists_by_name(
        &self,
        name: &str,
        topic_id: i64,
        tenant_id: i64,
        exclude_id: Option<i64>,
    ) -> Result<bool> {
        let row: (i64,) = match exclude_id {
            Some(id) => {
                sqlx::query_as(
                    r#"
                    SELECT COUNT(*) FROM sub_topics
                    WHERE name = ? AND topic_id = ? AND tenant_id = ? AND id <> ?
                    "#,
                )
                .bind(name)
                .bind(topic_id)
                .bind(tenant_id)
                .bind(id)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as(
                    r#"
                    SELECT COUNT(*) FROM sub_topics
                    WHERE name = ? AND topic_id = ? AND tenant_id = ?
                    "#,
                )
                .bind(name)
                .bind(topic_id)
                .bind(tenant_id)
                .fetch_one(&self.pool)
                .await?
            }
        };
        Ok(row.0 > 0)
    }

    async fn create_sub_topic(&self, name: &str, topic_id: i64, tenant_id: i64) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO sub_topics (name, topic_id, tenant_id, created_at)
            VALUES (?, ?, ?, NOW())
            "#,
        )
        .bind(name)
        .bind(topic_id)
        .bind(tenant_id)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_id() as i64)
    }

    async fn update_sub_topic_name(&self, id: i64, name: &str) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE sub_topics
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

    async fn delete_sub_topic(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM sub_topics WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
