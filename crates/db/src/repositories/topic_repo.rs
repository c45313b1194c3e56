//! Repository for the `topics` table.

use sqlx::PgPool;

use devdocs_core::topic::TopicDifficulty;
use devdocs_core::types::DbId;

use crate::models::topic::{CreateTopic, TopicRow, UpdateTopic};

/// Column list for topics queries.
const COLUMNS: &str = "id, category_id, title, slug, description, order_number, \
    difficulty, created_at, updated_at";

/// Provides CRUD operations for topics.
pub struct TopicRepo;

impl TopicRepo {
    /// Create a new topic. A duplicate slug violates `uq_topics_slug`.
    pub async fn create(pool: &PgPool, input: &CreateTopic) -> Result<TopicRow, sqlx::Error> {
        let difficulty = input.difficulty.unwrap_or(TopicDifficulty::Beginner);
        let query = format!(
            "INSERT INTO topics (category_id, title, slug, description, order_number, difficulty)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TopicRow>(&query)
            .bind(input.category_id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(input.order.unwrap_or(0))
            .bind(difficulty.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find a topic by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TopicRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM topics WHERE id = $1");
        sqlx::query_as::<_, TopicRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a topic by slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<TopicRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM topics WHERE slug = $1");
        sqlx::query_as::<_, TopicRow>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List all topics ordered for display.
    pub async fn list(pool: &PgPool) -> Result<Vec<TopicRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM topics ORDER BY order_number ASC, title ASC");
        sqlx::query_as::<_, TopicRow>(&query).fetch_all(pool).await
    }

    /// List the topics of one category, ordered for display.
    pub async fn list_by_category(
        pool: &PgPool,
        category_id: DbId,
    ) -> Result<Vec<TopicRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM topics
             WHERE category_id = $1
             ORDER BY order_number ASC, title ASC"
        );
        sqlx::query_as::<_, TopicRow>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// Update a topic; unset DTO fields keep their current values.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTopic,
    ) -> Result<TopicRow, sqlx::Error> {
        let query = format!(
            "UPDATE topics SET
                category_id = COALESCE($1, category_id),
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                order_number = COALESCE($5, order_number),
                difficulty = COALESCE($6, difficulty),
                updated_at = now()
             WHERE id = $7
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TopicRow>(&query)
            .bind(input.category_id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(input.order)
            .bind(input.difficulty.map(|d| d.as_str()))
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Delete a topic (cascades to its content).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM topics WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
