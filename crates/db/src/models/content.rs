//! Content row model and its conversion into the core record.
//!
//! The create/command DTOs for content live in `devdocs_core::commands`;
//! content mutations all flow through the publishing core rather than a
//! generic update DTO.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

use devdocs_core::content::{CodeExample, ContentRecord, ContentStatus};
use devdocs_core::error::StoreError;
use devdocs_core::types::{DbId, Timestamp};

/// A row from the `contents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContentRow {
    pub id: DbId,
    pub topic_id: DbId,
    pub title: String,
    pub body: String,
    pub code_examples: Option<Json<Vec<CodeExample>>>,
    #[sqlx(rename = "order_number")]
    pub order: i32,
    pub status: String,
    pub published_at: Option<Timestamp>,
    pub version: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ContentRow {
    /// Convert into the core record, parsing the status text.
    pub fn into_record(self) -> Result<ContentRecord, StoreError> {
        let status = ContentStatus::parse(&self.status).ok_or_else(|| {
            StoreError::backend(format!(
                "content {} has unknown status '{}'",
                self.id, self.status
            ))
        })?;
        Ok(ContentRecord {
            id: self.id,
            topic_id: self.topic_id,
            title: self.title,
            body: self.body,
            code_examples: self.code_examples.map(|j| j.0).unwrap_or_default(),
            order: self.order,
            status,
            published_at: self.published_at,
            version: self.version,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
