//! Route definitions for the content publishing pipeline.
//!
//! Everything here goes through the typed dispatcher; there are no direct
//! repository calls in the content handlers.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::content;
use crate::state::AppState;

/// Content routes mounted at `/content`.
///
/// ```text
/// POST /                       -> create_content
/// GET  /published              -> list_published (?topic_id=)
/// GET  /by-topic/{topic_id}    -> list_topic_content (?status=)
/// GET  /{id}                   -> get_content
/// POST /{id}/publish           -> publish_content
/// POST /{id}/unpublish         -> unpublish_content
/// POST /{id}/archive           -> archive_content
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(content::create_content))
        .route("/published", get(content::list_published))
        .route("/by-topic/{topic_id}", get(content::list_topic_content))
        .route("/{id}", get(content::get_content))
        .route("/{id}/publish", post(content::publish_content))
        .route("/{id}/unpublish", post(content::unpublish_content))
        .route("/{id}/archive", post(content::archive_content))
}
