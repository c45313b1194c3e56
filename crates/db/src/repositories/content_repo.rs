//! Repository for the `contents` table.
//!
//! Content rows are only mutated through the optimistic-version update;
//! there is no unconditional UPDATE, and the core never deletes content.

use sqlx::types::Json;
use sqlx::PgPool;

use devdocs_core::content::{ContentRecord, NewContent};
use devdocs_core::types::DbId;

use crate::models::content::ContentRow;

/// Column list for contents queries.
const COLUMNS: &str = "id, topic_id, title, body, code_examples, order_number, \
    status, published_at, version, created_at, updated_at";

/// Provides data access for content records.
pub struct ContentRepo;

impl ContentRepo {
    /// Insert a fresh content record; the database assigns id, version,
    /// and timestamps.
    pub async fn insert(pool: &PgPool, content: &NewContent) -> Result<ContentRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO contents
                (topic_id, title, body, code_examples, order_number, status, published_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentRow>(&query)
            .bind(content.topic_id)
            .bind(&content.title)
            .bind(&content.body)
            .bind(Json(&content.code_examples))
            .bind(content.order)
            .bind(content.status.as_str())
            .bind(content.published_at)
            .fetch_one(pool)
            .await
    }

    /// Find a content record by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ContentRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contents WHERE id = $1");
        sqlx::query_as::<_, ContentRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List records in one status, optionally scoped to a topic, ordered
    /// by `order_number` ascending then `title` ascending.
    pub async fn list_by_status(
        pool: &PgPool,
        status: &str,
        topic_id: Option<DbId>,
    ) -> Result<Vec<ContentRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contents
             WHERE status = $1
               AND ($2::BIGINT IS NULL OR topic_id = $2)
             ORDER BY order_number ASC, title ASC"
        );
        sqlx::query_as::<_, ContentRow>(&query)
            .bind(status)
            .bind(topic_id)
            .fetch_all(pool)
            .await
    }

    /// Persist a mutated record iff the stored row still carries the
    /// expected version; bumps `version` and `updated_at` atomically.
    ///
    /// Returns `None` when no row matched, which means either the id is
    /// gone or the version is stale — the caller distinguishes the two.
    pub async fn update_with_version(
        pool: &PgPool,
        record: &ContentRecord,
    ) -> Result<Option<ContentRow>, sqlx::Error> {
        let query = format!(
            "UPDATE contents SET
                topic_id = $2,
                title = $3,
                body = $4,
                code_examples = $5,
                order_number = $6,
                status = $7,
                published_at = $8,
                version = version + 1,
                updated_at = now()
             WHERE id = $1 AND version = $9
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentRow>(&query)
            .bind(record.id)
            .bind(record.topic_id)
            .bind(&record.title)
            .bind(&record.body)
            .bind(Json(&record.code_examples))
            .bind(record.order)
            .bind(record.status.as_str())
            .bind(record.published_at)
            .bind(record.version)
            .fetch_optional(pool)
            .await
    }
}
