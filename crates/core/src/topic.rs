//! Topic records as seen by the domain core.
//!
//! Topics own content items and are looked up through the
//! [`TopicLookup`](crate::store::TopicLookup) collaborator; their CRUD
//! lives outside the publishing core.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// Difficulty rating of a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicDifficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl TopicDifficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            TopicDifficulty::Beginner => "beginner",
            TopicDifficulty::Intermediate => "intermediate",
            TopicDifficulty::Advanced => "advanced",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "beginner" => Some(TopicDifficulty::Beginner),
            "intermediate" => Some(TopicDifficulty::Intermediate),
            "advanced" => Some(TopicDifficulty::Advanced),
            _ => None,
        }
    }
}

/// A persisted topic, denormalised into query results that embed the
/// owning topic next to a content record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicRecord {
    pub id: DbId,
    pub category_id: DbId,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub order: i32,
    pub difficulty: TopicDifficulty,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
