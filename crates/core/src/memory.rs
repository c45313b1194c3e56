//! In-memory reference implementations of the collaborator traits.
//!
//! These back the unit tests here and the HTTP integration tests in the
//! `api` crate, and double as documentation of the store contract (id and
//! version assignment, listing order, version-conflict behaviour). None of
//! them perform I/O; locking is plain `std::sync::Mutex` since no lock is
//! held across an await point.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::content::{ContentEvent, ContentRecord, ContentStatus, NewContent};
use crate::error::StoreError;
use crate::store::{ContentStore, EventSink, PublishedCache, TopicLookup};
use crate::topic::{TopicDifficulty, TopicRecord};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Content store
// ---------------------------------------------------------------------------

/// Vec-backed [`ContentStore`] with BIGSERIAL-style id assignment.
#[derive(Default)]
pub struct InMemoryContentStore {
    inner: Mutex<ContentTable>,
}

#[derive(Default)]
struct ContentTable {
    rows: Vec<ContentRecord>,
    next_id: DbId,
}

impl InMemoryContentStore {
    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn insert(&self, content: &NewContent) -> Result<ContentRecord, StoreError> {
        let mut table = self.inner.lock().unwrap();
        table.next_id += 1;

        let now = Utc::now();
        let record = ContentRecord {
            id: table.next_id,
            topic_id: content.topic_id,
            title: content.title.clone(),
            body: content.body.clone(),
            code_examples: content.code_examples.clone(),
            order: content.order,
            status: content.status,
            published_at: content.published_at,
            version: 1,
            created_at: now,
            updated_at: now,
        };
        table.rows.push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<ContentRecord>, StoreError> {
        let table = self.inner.lock().unwrap();
        Ok(table.rows.iter().find(|r| r.id == id).cloned())
    }

    async fn list_by_status(
        &self,
        status: ContentStatus,
        topic_id: Option<DbId>,
    ) -> Result<Vec<ContentRecord>, StoreError> {
        let table = self.inner.lock().unwrap();
        let mut records: Vec<ContentRecord> = table
            .rows
            .iter()
            .filter(|r| r.status == status)
            .filter(|r| topic_id.map_or(true, |t| r.topic_id == t))
            .cloned()
            .collect();
        // order ASC, then title ASC (bytewise, i.e. case-sensitive).
        records.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.title.cmp(&b.title)));
        Ok(records)
    }

    async fn save(&self, record: &ContentRecord) -> Result<ContentRecord, StoreError> {
        let mut table = self.inner.lock().unwrap();
        let row = table
            .rows
            .iter_mut()
            .find(|r| r.id == record.id)
            .ok_or_else(|| {
                StoreError::backend(format!("content {} no longer exists", record.id))
            })?;

        if row.version != record.version {
            // Report the version the store currently holds, as the
            // Postgres implementation does.
            return Err(StoreError::VersionConflict {
                id: record.id,
                expected: row.version,
            });
        }

        let mut updated = record.clone();
        updated.version += 1;
        updated.updated_at = Utc::now();
        *row = updated.clone();
        Ok(updated)
    }
}

// ---------------------------------------------------------------------------
// Topic lookup
// ---------------------------------------------------------------------------

/// Map-backed [`TopicLookup`].
#[derive(Default)]
pub struct InMemoryTopics {
    rows: Mutex<HashMap<DbId, TopicRecord>>,
}

impl InMemoryTopics {
    /// Register a stub topic under the given id.
    pub fn add(&self, id: DbId) {
        let now = Utc::now();
        self.insert(TopicRecord {
            id,
            category_id: 1,
            title: format!("Topic {id}"),
            slug: format!("topic-{id}"),
            description: None,
            order: 0,
            difficulty: TopicDifficulty::Beginner,
            created_at: now,
            updated_at: now,
        });
    }

    /// Register a fully specified topic.
    pub fn insert(&self, topic: TopicRecord) {
        self.rows.lock().unwrap().insert(topic.id, topic);
    }
}

#[async_trait]
impl TopicLookup for InMemoryTopics {
    async fn find_by_id(&self, id: DbId) -> Result<Option<TopicRecord>, StoreError> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }
}

// ---------------------------------------------------------------------------
// Published-list cache
// ---------------------------------------------------------------------------

/// Map-backed [`PublishedCache`] without expiry (the api crate adds TTL).
#[derive(Default)]
pub struct InMemoryPublishedCache {
    entries: Mutex<HashMap<String, Vec<ContentRecord>>>,
}

impl PublishedCache for InMemoryPublishedCache {
    fn get(&self, key: &str) -> Option<Vec<ContentRecord>> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn put(&self, key: &str, records: Vec<ContentRecord>) {
        self.entries.lock().unwrap().insert(key.to_string(), records);
    }

    fn invalidate(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}

// ---------------------------------------------------------------------------
// Event sink
// ---------------------------------------------------------------------------

/// [`EventSink`] that records every emitted event for assertions.
#[derive(Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<ContentEvent>>,
}

impl RecordingEventSink {
    /// All events emitted so far, in order.
    pub fn events(&self) -> Vec<ContentEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventSink for RecordingEventSink {
    fn emit(&self, event: ContentEvent) {
        self.events.lock().unwrap().push(event);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn fresh() -> NewContent {
        NewContent::new(
            1,
            "Intro".to_string(),
            "body".to_string(),
            vec![],
            0,
            ContentStatus::Draft,
        )
    }

    #[tokio::test]
    async fn save_bumps_the_version() {
        let store = InMemoryContentStore::default();
        let record = store.insert(&fresh()).await.unwrap();
        assert_eq!(record.version, 1);

        let saved = store.save(&record).await.unwrap();
        assert_eq!(saved.version, 2);
    }

    #[tokio::test]
    async fn saving_a_stale_snapshot_is_rejected() {
        let store = InMemoryContentStore::default();
        let record = store.insert(&fresh()).await.unwrap();

        // A concurrent writer got there first; the store now holds v2.
        store.save(&record).await.unwrap();

        // The stale v1 snapshot must be rejected, reporting the stored
        // version, and must not overwrite the winner's write.
        assert_matches!(
            store.save(&record).await.unwrap_err(),
            StoreError::VersionConflict { id, expected } if id == record.id && expected == 2
        );
        let current = store.find_by_id(record.id).await.unwrap().unwrap();
        assert_eq!(current.version, 2);
    }

    #[tokio::test]
    async fn saving_a_missing_record_is_a_backend_error() {
        let store = InMemoryContentStore::default();
        let record = store.insert(&fresh()).await.unwrap();
        let mut gone = record.clone();
        gone.id = 999;

        assert_matches!(
            store.save(&gone).await.unwrap_err(),
            StoreError::Backend(_)
        );
    }
}
