//! Topic and sub-topic business logic

use crate::domain::{
    canonicalize_name, CreateSubTopicInput, CreateTopicInput, Principal, SubTopicDto, TopicDto,
    UpdateSubTopicInput, UpdateTopicInput,
};
use crate::error::{AppError, Duplicate, Resource, Result};
use crate::repository::TopicRepository;
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

pub struct TopicService<R: TopicRepository> {
    repo: Arc<R>,
}

impl<R: TopicRepository> TopicService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn get_all(&self, principal: Principal) -> Result<Vec<TopicDto>> {
        let topics = self.repo.find_all(principal.tenant_id).await?;
        Ok(topics.iter().map(TopicDto::from).collect())
    }

    pub async fn create(&self, principal: Principal, input: CreateTopicInput) -> Result<i64> {
        input.validate()?;
        let name = canonicalize_name(&input.name);

        if self
            .repo
            .exists_by_name(&name, principal.tenant_id, None)
            .await?
        {
            debug!(name = %name, "topic already exists");
            return Err(AppError::Conflict(Duplicate::Topic));
        }

        let id = self.repo.create(&name, principal.tenant_id).await?;
        Ok(id)
    }

    pub async fn update(
        &self,
        principal: Principal,
        id: i64,
        input: UpdateTopicInput,
    ) -> Result<i64> {
        input.validate()?;

        let topic = self
            .repo
            .find_by_id(id, principal.tenant_id)
            .await?
            .ok_or(AppError::NotFound(Resource::Topic))?;

        let mut staged_name = None;
        if let Some(name) = &input.name {
            let name = canonicalize_name(name);
            if name != topic.name {
                if self
                    .repo
                    .exists_by_name(&name, principal.tenant_id, Some(id))
                    .await?
                {
                    debug!(name = %name, "topic name already in use");
                    return Err(AppError::Conflict(Duplicate::Topic));
                }
                staged_name = Some(name);
            }
        }

        // No-op short-circuit: identical input performs zero writes.
        let Some(name) = staged_name else {
            return Ok(topic.id);
        };

        self.repo.update_name(id, &name).await?;
        Ok(topic.id)
    }

    pub async fn delete(&self, principal: Principal, id: i64) -> Result<i64> {
        let topic = self
            .repo
            .find_by_id(id, principal.tenant_id)
            .await?
            .ok_or(AppError::NotFound(Resource::Topic))?;

        self.repo.delete(topic.id).await?;
        Ok(topic.id)
    }

    pub async fn get_sub_topics(
        &self,
        principal: Principal,
        topic_id: i64,
    ) -> Result<Vec<SubTopicDto>> {
        let rows = self
            .repo
            .find_sub_topics(topic_id, principal.tenant_id)
            .await?;
        Ok(rows.iter().map(SubTopicDto::from).collect())
    }

    pub async fn create_sub_topic(
        &self,
        principal: Principal,
        topic_id: i64,
        input: CreateSubTopicInput,
    ) -> Result<i64> {
        input.validate()?;
        let name = canonicalize_name(&input.name);

        if self
            .repo
            .sub_topic_exists_by_name(&name, topic_id, principal.tenant_id, None)
            .await?
        {
            debug!(name = %name, topic_id, "sub topic already exists");
            return Err(AppError::Conflict(Duplicate::SubTopic));
        }

        let id = self
            .repo
            .create_sub_topic(&name, topic_id, principal.tenant_id)
            .await?;
        Ok(id)
    }

    pub async fn update_sub_topic(
        &self,
        principal: Principal,
        topic_id: i64,
        id: i64,
        input: UpdateSubTopicInput,
    ) -> Result<i64> {
        input.validate()?;

        let sub_topic = self
            .repo
            .find_sub_topic(id, topic_id, principal.tenant_id)
            .await?
            .ok_or(AppError::NotFound(Resource::SubTopic))?;

        let mut staged_name = None;
        if let Some(name) = &input.name {
            let name = canonicalize_name(name);
            if name != sub_topic.name {
                if self
                    .repo
                    .sub_topic_exists_by_name(&name, topic_id, principal.tenant_id, Some(id))
                    .await?
                {
                    debug!(name = %name, "sub topic name already in use");
                    return Err(AppError::Conflict(Duplicate::SubTopic));
                }
                staged_name = Some(name);
            }
        }

        // No-op short-circuit: identical input performs zero writes.
        let Some(name) = staged_name else {
            return Ok(sub_topic.id);
        };

        self.repo.update_sub_topic_name(id, &name).await?;
        Ok(sub_topic.id)
    }

    pub async fn delete_sub_topic(
        &self,
        principal: Principal,
        topic_id: i64,
        id: i64,
    ) -> Result<i64> {
        let sub_topic = self
            .repo
            .find_sub_topic(id, topic_id, principal.tenant_id)
            .await?
            .ok_or(AppError::NotFound(Resource::SubTopic))?;

        self.repo.delete_sub_topic(sub_topic.id).await?;
        Ok(sub_topic.id)
    }
}
