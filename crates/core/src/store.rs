//! Collaborator traits the command/query handlers depend on.
//!
//! Handlers receive these as `Arc<dyn …>` so the persistence backend, the
//! cache, and the event transport can each be swapped without touching
//! business logic. Production implementations live in the `db`, `api`, and
//! `events` crates; in-memory reference implementations live in
//! [`crate::memory`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::content::{ContentEvent, ContentRecord, ContentStatus, NewContent};
use crate::error::StoreError;
use crate::topic::TopicRecord;
use crate::types::DbId;

/// Persistence interface for content records.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Insert a fresh record; the store assigns id, version (starting at
    /// 1), and timestamps.
    async fn insert(&self, content: &NewContent) -> Result<ContentRecord, StoreError>;

    /// Look up a single record by id.
    async fn find_by_id(&self, id: DbId) -> Result<Option<ContentRecord>, StoreError>;

    /// List records in a given status, optionally filtered to one topic,
    /// ordered by `order` ascending then `title` ascending
    /// (case-sensitive).
    async fn list_by_status(
        &self,
        status: ContentStatus,
        topic_id: Option<DbId>,
    ) -> Result<Vec<ContentRecord>, StoreError>;

    /// Persist a mutated record, checking `record.version` against the
    /// stored row. On success the returned record carries `version + 1`
    /// and a fresh `updated_at`; a stale version yields
    /// [`StoreError::VersionConflict`].
    async fn save(&self, record: &ContentRecord) -> Result<ContentRecord, StoreError>;
}

/// Read-only topic lookup used to verify `topic_id` references and to
/// embed the owning topic in query results.
#[async_trait]
pub trait TopicLookup: Send + Sync {
    async fn find_by_id(&self, id: DbId) -> Result<Option<TopicRecord>, StoreError>;
}

/// Shared cache for published-content lists.
///
/// Only query handlers populate entries; command handlers invalidate the
/// keys their state change affects.
pub trait PublishedCache: Send + Sync {
    fn get(&self, key: &str) -> Option<Vec<ContentRecord>>;
    fn put(&self, key: &str, records: Vec<ContentRecord>);
    fn invalidate(&self, key: &str);
}

/// Destination for domain events flushed after a successful persist.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ContentEvent);
}

/// Shorthand for the trait-object handles the handlers hold.
pub type SharedContentStore = Arc<dyn ContentStore>;
pub type SharedTopicLookup = Arc<dyn TopicLookup>;
pub type SharedPublishedCache = Arc<dyn PublishedCache>;
pub type SharedEventSink = Arc<dyn EventSink>;
