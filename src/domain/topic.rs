//! Topic and sub-topic domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Topic entity, unique by (name, tenant_id)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Topic {
    pub id: i64,
    pub name: String,
    pub tenant_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for Topic {
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

/// Sub-topic entity, unique by (name, topic_id, tenant_id)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SubTopic {
    pub id: i64,
    pub name: String,
    pub topic_id: i64,
    pub tenant_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for SubTopic {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            topic_id: 0,
            tenant_id: 0,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

/// Sub-topic row joined with its parent topic's name
#[derive(Debug, Clone, FromRow)]
pub struct SubTopicWithTopic {
    pub id: i64,
    pub name: String,
    pub topic_id: i64,
    pub topic_name: String,
}

/// Topic response shape
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopicDto {
    pub id: i64,
    pub name: String,
}

impl From<&Topic> for TopicDto {
    fn from(topic: &Topic) -> Self {
        Self {
            id: topic.id,
            name: topic.name.clone(),
        }
    }
}

/// Sub-topic response shape, embedding the parent topic
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubTopicDto {
    pub id: i64,
    pub name: String,
    pub topic: TopicDto,
}

impl From<&SubTopicWithTopic> for SubTopicDto {
    fn from(row: &SubTopicWithTopic) -> Self {
        Self {
            id: row.id,
            name: row.name.clone(),
            topic: TopicDto {
                id: row.topic_id,
                name: row.topic_name.clone(),
            },
        }
    }
}

/// Input for creating a topic
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTopicInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

/// Input for updating a topic (partial patch)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTopicInput {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
}

/// Input for creating a sub-topic under a topic
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubTopicInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

/// Input for updating a sub-topic (partial patch)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubTopicInput {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
}
