//! Topic models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use devdocs_core::error::StoreError;
use devdocs_core::topic::{TopicDifficulty, TopicRecord};
use devdocs_core::types::{DbId, Timestamp};

/// A row from the `topics` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TopicRow {
    pub id: DbId,
    pub category_id: DbId,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    #[sqlx(rename = "order_number")]
    #[serde(rename = "order")]
    pub order: i32,
    pub difficulty: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TopicRow {
    /// Convert into the core record, rejecting rows with a difficulty the
    /// domain does not know (possible only if the CHECK constraint and
    /// this enum drift apart).
    pub fn into_record(self) -> Result<TopicRecord, StoreError> {
        let difficulty = TopicDifficulty::parse(&self.difficulty).ok_or_else(|| {
            StoreError::backend(format!(
                "topic {} has unknown difficulty '{}'",
                self.id, self.difficulty
            ))
        })?;
        Ok(TopicRecord {
            id: self.id,
            category_id: self.category_id,
            title: self.title,
            slug: self.slug,
            description: self.description,
            order: self.order,
            difficulty,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// DTO for creating a topic.
#[derive(Debug, Deserialize)]
pub struct CreateTopic {
    pub category_id: DbId,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub order: Option<i32>,
    pub difficulty: Option<TopicDifficulty>,
}

/// DTO for updating a topic.
#[derive(Debug, Deserialize)]
pub struct UpdateTopic {
    pub category_id: Option<DbId>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub order: Option<i32>,
    pub difficulty: Option<TopicDifficulty>,
}
