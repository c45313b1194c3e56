//! Postgres-backed implementations of the core collaborator traits.
//!
//! Thin adapters over the repositories: they translate rows into core
//! records and sqlx failures into [`StoreError`] values the core
//! understands.

use async_trait::async_trait;

use devdocs_core::content::{ContentRecord, ContentStatus, NewContent};
use devdocs_core::error::StoreError;
use devdocs_core::store::{ContentStore, TopicLookup};
use devdocs_core::topic::TopicRecord;
use devdocs_core::types::DbId;

use crate::repositories::{ContentRepo, TopicRepo};
use crate::DbPool;

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::backend(err)
}

/// [`ContentStore`] over the `contents` table.
#[derive(Clone)]
pub struct PgContentStore {
    pool: DbPool,
}

impl PgContentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentStore for PgContentStore {
    async fn insert(&self, content: &NewContent) -> Result<ContentRecord, StoreError> {
        let row = ContentRepo::insert(&self.pool, content)
            .await
            .map_err(backend)?;
        row.into_record()
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<ContentRecord>, StoreError> {
        let row = ContentRepo::find_by_id(&self.pool, id)
            .await
            .map_err(backend)?;
        row.map(|r| r.into_record()).transpose()
    }

    async fn list_by_status(
        &self,
        status: ContentStatus,
        topic_id: Option<DbId>,
    ) -> Result<Vec<ContentRecord>, StoreError> {
        let rows = ContentRepo::list_by_status(&self.pool, status.as_str(), topic_id)
            .await
            .map_err(backend)?;
        rows.into_iter().map(|r| r.into_record()).collect()
    }

    async fn save(&self, record: &ContentRecord) -> Result<ContentRecord, StoreError> {
        let updated = ContentRepo::update_with_version(&self.pool, record)
            .await
            .map_err(backend)?;
        match updated {
            Some(row) => row.into_record(),
            // No row matched id + version. Re-read by id to tell a stale
            // version apart from a vanished row.
            None => match ContentRepo::find_by_id(&self.pool, record.id)
                .await
                .map_err(backend)?
            {
                Some(current) => Err(StoreError::VersionConflict {
                    id: record.id,
                    expected: current.version,
                }),
                None => Err(StoreError::backend(format!(
                    "content {} no longer exists",
                    record.id
                ))),
            },
        }
    }
}

/// [`TopicLookup`] over the `topics` table.
#[derive(Clone)]
pub struct PgTopicLookup {
    pool: DbPool,
}

impl PgTopicLookup {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TopicLookup for PgTopicLookup {
    async fn find_by_id(&self, id: DbId) -> Result<Option<TopicRecord>, StoreError> {
        let row = TopicRepo::find_by_id(&self.pool, id)
            .await
            .map_err(backend)?;
        row.map(|r| r.into_record()).transpose()
    }
}
