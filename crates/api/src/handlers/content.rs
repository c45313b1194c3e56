//! Handlers for the content publishing pipeline.
//!
//! Thin HTTP adapters: each handler builds the typed command or query,
//! hands it to the dispatcher, and wraps the result in the response
//! envelope. All business rules live in `devdocs_core`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use devdocs_core::commands::{ArchiveContent, CreateContent, PublishContent, UnpublishContent};
use devdocs_core::content::ContentStatus;
use devdocs_core::queries::{GetContent, GetPublishedContent, GetTopicContent};
use devdocs_core::types::DbId;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/content
///
/// Create a new content item (draft unless the payload says otherwise).
pub async fn create_content(
    State(state): State<AppState>,
    Json(input): Json<CreateContent>,
) -> AppResult<impl IntoResponse> {
    let record = state.dispatcher.execute(input).await?;

    tracing::info!(
        content_id = record.id,
        topic_id = record.topic_id,
        status = %record.status.as_str(),
        "Content created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}

/// Query parameters for the published-content listing.
#[derive(Debug, Deserialize)]
pub struct PublishedParams {
    pub topic_id: Option<DbId>,
}

/// GET /api/v1/content/published
///
/// List published content, optionally scoped to one topic. Served from
/// the published-list cache when warm.
pub async fn list_published(
    State(state): State<AppState>,
    Query(params): Query<PublishedParams>,
) -> AppResult<impl IntoResponse> {
    let records = state
        .dispatcher
        .execute(GetPublishedContent {
            topic_id: params.topic_id,
        })
        .await?;

    Ok(Json(DataResponse { data: records }))
}

/// Query parameters for the by-topic listing.
#[derive(Debug, Deserialize)]
pub struct TopicContentParams {
    pub status: Option<ContentStatus>,
}

/// GET /api/v1/content/by-topic/:topic_id
///
/// List a topic's content in an explicit status (default `published`).
pub async fn list_topic_content(
    State(state): State<AppState>,
    Path(topic_id): Path<DbId>,
    Query(params): Query<TopicContentParams>,
) -> AppResult<impl IntoResponse> {
    let records = state
        .dispatcher
        .execute(GetTopicContent {
            topic_id,
            status: params.status.unwrap_or(ContentStatus::Published),
        })
        .await?;

    Ok(Json(DataResponse { data: records }))
}

/// GET /api/v1/content/:id
///
/// Retrieve a single content item with its owning topic embedded.
pub async fn get_content(
    State(state): State<AppState>,
    Path(content_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let result = state.dispatcher.execute(GetContent { content_id }).await?;

    Ok(Json(DataResponse { data: result }))
}

/// POST /api/v1/content/:id/publish
///
/// Publish a content item. 409 if already published or concurrently
/// modified.
pub async fn publish_content(
    State(state): State<AppState>,
    Path(content_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let record = state.dispatcher.execute(PublishContent { content_id }).await?;

    tracing::info!(content_id = record.id, version = record.version, "Content published");

    Ok(Json(DataResponse { data: record }))
}

/// POST /api/v1/content/:id/unpublish
///
/// Revert a published content item to draft.
pub async fn unpublish_content(
    State(state): State<AppState>,
    Path(content_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let record = state
        .dispatcher
        .execute(UnpublishContent { content_id })
        .await?;

    tracing::info!(content_id = record.id, "Content unpublished");

    Ok(Json(DataResponse { data: record }))
}

/// POST /api/v1/content/:id/archive
///
/// Archive a content item. 409 if already archived.
pub async fn archive_content(
    State(state): State<AppState>,
    Path(content_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let record = state.dispatcher.execute(ArchiveContent { content_id }).await?;

    tracing::info!(content_id = record.id, "Content archived");

    Ok(Json(DataResponse { data: record }))
}
