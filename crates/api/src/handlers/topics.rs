//! Handlers for topic CRUD.
//!
//! Plain repository glue; topics do not go through the publishing
//! dispatcher.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use devdocs_core::error::CoreError;
use devdocs_core::types::DbId;
use devdocs_db::models::topic::{CreateTopic, UpdateTopic};
use devdocs_db::repositories::TopicRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/topics
///
/// List all topics ordered for display.
pub async fn list_topics(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let topics = TopicRepo::list(&state.pool).await?;

    Ok(Json(DataResponse { data: topics }))
}

/// POST /api/v1/topics
///
/// Create a new topic. 409 on a duplicate slug.
pub async fn create_topic(
    State(state): State<AppState>,
    Json(input): Json<CreateTopic>,
) -> AppResult<impl IntoResponse> {
    let topic = TopicRepo::create(&state.pool, &input).await?;

    tracing::info!(topic_id = topic.id, slug = %topic.slug, "Topic created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: topic })))
}

/// GET /api/v1/topics/by-category/:category_id
///
/// List the topics of one category.
pub async fn list_topics_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let topics = TopicRepo::list_by_category(&state.pool, category_id).await?;

    Ok(Json(DataResponse { data: topics }))
}

/// GET /api/v1/topics/:id
///
/// Retrieve a single topic by ID.
pub async fn get_topic(
    State(state): State<AppState>,
    Path(topic_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let topic = TopicRepo::find_by_id(&state.pool, topic_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Topic",
            id: topic_id,
        }))?;

    Ok(Json(DataResponse { data: topic }))
}

/// PUT /api/v1/topics/:id
///
/// Partially update a topic; unset fields keep their current values.
pub async fn update_topic(
    State(state): State<AppState>,
    Path(topic_id): Path<DbId>,
    Json(input): Json<UpdateTopic>,
) -> AppResult<impl IntoResponse> {
    // fetch_one surfaces a missing row as RowNotFound -> 404.
    let topic = TopicRepo::update(&state.pool, topic_id, &input).await?;

    tracing::info!(topic_id = topic.id, "Topic updated");

    Ok(Json(DataResponse { data: topic }))
}

/// DELETE /api/v1/topics/:id
///
/// Delete a topic; its content goes with it.
pub async fn delete_topic(
    State(state): State<AppState>,
    Path(topic_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = TopicRepo::delete(&state.pool, topic_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Topic",
            id: topic_id,
        }));
    }

    tracing::info!(topic_id, "Topic deleted");

    Ok(StatusCode::NO_CONTENT)
}
