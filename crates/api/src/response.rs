//! Response envelope for API handlers.
//!
//! Every successful devdocs response wraps its payload in `{ "data": ... }`,
//! whether it is a single content record, a published list, or a topic.
//! [`DataResponse`] is that envelope as a typed struct; handlers use it
//! instead of building `serde_json::json!({ "data": ... })` values by hand,
//! so payload types stay checked at compile time.

use serde::Serialize;

/// Standard `{ "data": T }` success envelope.
///
/// # Example
///
/// ```ignore
/// let record = state.dispatcher.execute(GetContent { content_id }).await?;
/// Ok(Json(DataResponse { data: record }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
