//! Route definitions for topic CRUD.

use axum::routing::get;
use axum::Router;

use crate::handlers::topics;
use crate::state::AppState;

/// Topic routes mounted at `/topics`.
///
/// ```text
/// GET    /                             -> list_topics
/// POST   /                             -> create_topic
/// GET    /by-category/{category_id}    -> list_topics_by_category
/// GET    /{id}                         -> get_topic
/// PUT    /{id}                         -> update_topic
/// DELETE /{id}                         -> delete_topic
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(topics::list_topics).post(topics::create_topic))
        .route(
            "/by-category/{category_id}",
            get(topics::list_topics_by_category),
        )
        .route(
            "/{id}",
            get(topics::get_topic)
                .put(topics::update_topic)
                .delete(topics::delete_topic),
        )
}
