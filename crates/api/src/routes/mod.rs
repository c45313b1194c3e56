pub mod categories;
pub mod content;
pub mod health;
pub mod topics;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /content                          create (POST)
/// /content/published                published list (?topic_id=)
/// /content/by-topic/{topic_id}      topic content (?status=, default published)
/// /content/{id}                     get with owning topic
/// /content/{id}/publish             publish (POST)
/// /content/{id}/unpublish           unpublish (POST)
/// /content/{id}/archive             archive (POST)
///
/// /topics                           list, create
/// /topics/by-category/{category_id} list by category
/// /topics/{id}                      get, update, delete
///
/// /categories                       list, create
/// /categories/{id}                  get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Publishing pipeline: commands and queries via the dispatcher.
        .nest("/content", content::router())
        // Topic and category CRUD (plain repository glue).
        .nest("/topics", topics::router())
        .nest("/categories", categories::router())
}
