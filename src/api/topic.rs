//! Topic and sub-topic API handlers

use crate::api::{parse_id, IdResponse};
use crate::domain::{
    CreateSubTopicInput, CreateTopicInput, Principal, UpdateSubTopicInput, UpdateTopicInput,
};
use crate::error::Result;
use crate::state::HasServices;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

/// List the tenant's topics
pub async fn list<S: HasServices>(
    State(state): State<S>,
    principal: Principal,
) -> Result<impl IntoResponse> {
    let topics = state.topic_service().get_all(principal).await?;
    Ok(Json(topics))
}

/// Create a topic
pub async fn create<S: HasServices>(
    State(state): State<S>,
    principal: Principal,
    Json(input): Json<CreateTopicInput>,
) -> Result<impl IntoResponse> {
    let id = state.topic_service().create(principal, input).await?;
    Ok(Json(IdResponse { id }))
}

/// Partially update a topic
pub async fn update<S: HasServices>(
    State(state): State<S>,
    principal: Principal,
    Path(id): Path<String>,
    Json(input): Json<UpdateTopicInput>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&id)?;
    let id = state.topic_service().update(principal, id, input).await?;
    Ok(Json(IdResponse { id }))
}

/// Delete a topic
pub async fn delete<S: HasServices>(
    State(state): State<S>,
    principal: Principal,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&id)?;
    let id = state.topic_service().delete(principal, id).await?;
    Ok(Json(IdResponse { id }))
}

/// List a topic's sub-topics
pub async fn list_sub_topics<S: HasServices>(
    State(state): State<S>,
    principal: Principal,
    Path(topic_id): Path<String>,
) -> Result<impl IntoResponse> {
    let topic_id = parse_id(&topic_id)?;
    let sub_topics = state
        .topic_service()
        .get_sub_topics(principal, topic_id)
        .await?;
    Ok(Json(sub_topics))
}

/// Create a sub-topic under a topic
pub async fn create_sub_topic<S: HasServices>(
    State(state): State<S>,
    principal: Principal,
    Path(topic_id): Path<String>,
    Json(input): Json<CreateSubTopicInput>,
) -> Result<impl IntoResponse> {
    let topic_id = parse_id(&topic_id)?;
    let id = state
        .topic_service()
        .create_sub_topic(principal, topic_id, input)
        .await?;
    Ok(Json(IdResponse { id }))
}

/// Partially update a sub-topic
pub async fn update_sub_topic<S: HasServices>(
    State(state): State<S>,
    principal: Principal,
    Path((topic_id, sub_id)): Path<(String, String)>,
    Json(input): Json<UpdateSubTopicInput>,
) -> Result<impl IntoResponse> {
    let topic_id = parse_id(&topic_id)?;
    let sub_id = parse_id(&sub_id)?;
    let id = state
        .topic_service()
        .update_sub_topic(principal, topic_id, sub_id, input)
        .await?;
    Ok(Json(IdResponse { id }))
}

/// Delete a sub-topic
pub async fn delete_sub_topic<S: HasServices>(
    State(state): State<S>,
    principal: Principal,
    Path((topic_id, sub_id)): Path<(String, String)>,
) -> Result<impl IntoResponse> {
    let topic_id = parse_id(&topic_id)?;
    let sub_id = parse_id(&sub_id)?;
    let id = state
        .topic_service()
        .delete_sub_topic(principal, topic_id, sub_id)
        .await?;
    Ok(Json(IdResponse { id }))
}
