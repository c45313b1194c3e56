//! Queries and their handlers: read-only projections over the content
//! store.

use serde::Serialize;

use crate::content::{ContentRecord, ContentStatus};
use crate::error::CoreError;
use crate::store::{SharedContentStore, SharedPublishedCache, SharedTopicLookup};
use crate::topic::TopicRecord;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Query value objects
// ---------------------------------------------------------------------------

/// Request for a single content item with its owning topic embedded.
#[derive(Debug, Clone, Copy)]
pub struct GetContent {
    pub content_id: DbId,
}

/// Request for the published-content list, optionally scoped to a topic.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetPublishedContent {
    pub topic_id: Option<DbId>,
}

/// Request for a topic's content in an explicit status.
#[derive(Debug, Clone, Copy)]
pub struct GetTopicContent {
    pub topic_id: DbId,
    pub status: ContentStatus,
}

/// A content record denormalised with its owning topic.
#[derive(Debug, Clone, Serialize)]
pub struct ContentWithTopic {
    #[serde(flatten)]
    pub content: ContentRecord,
    pub topic: TopicRecord,
}

/// Cache key for a published-content list: `published_content_<topic>` or
/// `published_content_all` when unfiltered.
pub fn published_cache_key(topic_id: Option<DbId>) -> String {
    match topic_id {
        Some(id) => format!("published_content_{id}"),
        None => "published_content_all".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Handles [`GetContent`].
pub struct GetContentHandler {
    store: SharedContentStore,
    topics: SharedTopicLookup,
}

impl GetContentHandler {
    pub fn new(store: SharedContentStore, topics: SharedTopicLookup) -> Self {
        Self { store, topics }
    }

    pub async fn execute(&self, query: GetContent) -> Result<ContentWithTopic, CoreError> {
        let content = self
            .store
            .find_by_id(query.content_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Content",
                id: query.content_id,
            })?;

        // A dangling topic_id means the store broke referential integrity;
        // surface it as not-found rather than panicking.
        let topic = self
            .topics
            .find_by_id(content.topic_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Topic",
                id: content.topic_id,
            })?;

        Ok(ContentWithTopic { content, topic })
    }
}

/// Handles [`GetPublishedContent`], consulting the shared list cache
/// before touching the store.
pub struct GetPublishedContentHandler {
    store: SharedContentStore,
    cache: SharedPublishedCache,
}

impl GetPublishedContentHandler {
    pub fn new(store: SharedContentStore, cache: SharedPublishedCache) -> Self {
        Self { store, cache }
    }

    pub async fn execute(
        &self,
        query: GetPublishedContent,
    ) -> Result<Vec<ContentRecord>, CoreError> {
        let key = published_cache_key(query.topic_id);

        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached);
        }

        let records = self
            .store
            .list_by_status(ContentStatus::Published, query.topic_id)
            .await?;
        self.cache.put(&key, records.clone());

        Ok(records)
    }
}

/// Handles [`GetTopicContent`]: the explicit get-by-status listing.
/// Uncached; only published lists get the cache treatment.
pub struct GetTopicContentHandler {
    store: SharedContentStore,
    topics: SharedTopicLookup,
}

impl GetTopicContentHandler {
    pub fn new(store: SharedContentStore, topics: SharedTopicLookup) -> Self {
        Self { store, topics }
    }

    pub async fn execute(&self, query: GetTopicContent) -> Result<Vec<ContentRecord>, CoreError> {
        self.topics
            .find_by_id(query.topic_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Topic",
                id: query.topic_id,
            })?;

        Ok(self
            .store
            .list_by_status(query.status, Some(query.topic_id))
            .await?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
