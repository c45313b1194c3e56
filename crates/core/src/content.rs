//! Content records, validation, and the publishing aggregate.
//!
//! A content item belongs to a topic and moves through a three-state
//! lifecycle (`draft` → `published` → `archived`, with `published` → `draft`
//! as the only backwards edge). [`ContentAggregate`] owns the transition
//! rules and buffers domain events; command handlers drain the buffer with
//! [`ContentAggregate::take_events`] after a successful persist.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Maximum length of a content title.
pub const MAX_TITLE_LEN: usize = 200;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status of a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Draft,
    Published,
    Archived,
}

impl ContentStatus {
    /// Database/wire representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentStatus::Draft => "draft",
            ContentStatus::Published => "published",
            ContentStatus::Archived => "archived",
        }
    }

    /// Parse the database/wire representation back into a status.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(ContentStatus::Draft),
            "published" => Some(ContentStatus::Published),
            "archived" => Some(ContentStatus::Archived),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// An ordered code snippet attached to a content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeExample {
    pub language: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A persisted content item, as returned by the content store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentRecord {
    pub id: DbId,
    pub topic_id: DbId,
    pub title: String,
    pub body: String,
    pub code_examples: Vec<CodeExample>,
    pub order: i32,
    pub status: ContentStatus,
    pub published_at: Option<Timestamp>,
    /// Optimistic concurrency token; the store bumps it by 1 on every save.
    pub version: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A content item that has not been persisted yet.
///
/// Carries no id, version, or timestamps; the store assigns those on
/// insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewContent {
    pub topic_id: DbId,
    pub title: String,
    pub body: String,
    pub code_examples: Vec<CodeExample>,
    pub order: i32,
    pub status: ContentStatus,
    pub published_at: Option<Timestamp>,
}

impl NewContent {
    /// Build a fresh, unpersisted content item.
    ///
    /// When the caller asks for `published` directly, `published_at` is set
    /// here so the `published ⇔ published_at` invariant holds from the
    /// first save. No event is raised for content born published.
    pub fn new(
        topic_id: DbId,
        title: String,
        body: String,
        code_examples: Vec<CodeExample>,
        order: i32,
        status: ContentStatus,
    ) -> Self {
        let published_at = match status {
            ContentStatus::Published => Some(Utc::now()),
            _ => None,
        };
        Self {
            topic_id,
            title,
            body,
            code_examples,
            order,
            status,
            published_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a content title (non-empty, <= 200 chars).
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    if title.len() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a content body (non-empty).
pub fn validate_body(body: &str) -> Result<(), CoreError> {
    if body.trim().is_empty() {
        return Err(CoreError::Validation("Body must not be empty".into()));
    }
    Ok(())
}

/// Validate the sibling ordering value (non-negative).
pub fn validate_order(order: i32) -> Result<(), CoreError> {
    if order < 0 {
        return Err(CoreError::Validation("Order must not be negative".into()));
    }
    Ok(())
}

/// Validate code examples (language and code non-empty for each entry).
pub fn validate_code_examples(examples: &[CodeExample]) -> Result<(), CoreError> {
    for example in examples {
        if example.language.trim().is_empty() {
            return Err(CoreError::Validation(
                "Code example language must not be empty".into(),
            ));
        }
        if example.code.trim().is_empty() {
            return Err(CoreError::Validation(
                "Code example code must not be empty".into(),
            ));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Domain events
// ---------------------------------------------------------------------------

/// A fact raised by the aggregate for interested collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentEvent {
    /// The content item transitioned to `published`.
    Published { content_id: DbId },
}

// ---------------------------------------------------------------------------
// Aggregate
// ---------------------------------------------------------------------------

/// In-memory aggregate over a persisted content record.
///
/// Transition methods are pure, synchronous state changes: they either
/// mutate the wrapped record and possibly buffer an event, or fail with a
/// [`CoreError::Conflict`] and leave the record untouched. Nothing here
/// performs I/O; persisting the record and flushing the buffered events is
/// the calling command handler's job, in that order.
#[derive(Debug)]
pub struct ContentAggregate {
    record: ContentRecord,
    pending_events: Vec<ContentEvent>,
}

impl ContentAggregate {
    /// Rebuild the aggregate from a previously persisted record.
    ///
    /// All fields are copied verbatim; no re-validation happens on this
    /// path, so version and timestamps survive a round-trip unchanged.
    pub fn reconstitute(record: ContentRecord) -> Self {
        Self {
            record,
            pending_events: Vec::new(),
        }
    }

    /// The current state of the wrapped record.
    pub fn record(&self) -> &ContentRecord {
        &self.record
    }

    /// Consume the aggregate, yielding the wrapped record.
    pub fn into_record(self) -> ContentRecord {
        self.record
    }

    /// Drain the buffered domain events.
    ///
    /// Call only after the record has been durably saved — an event must
    /// never be observed for state that was not committed.
    pub fn take_events(&mut self) -> Vec<ContentEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Transition to `published`.
    ///
    /// Sets `published_at` and buffers a [`ContentEvent::Published`].
    /// Fails when already published.
    pub fn publish(&mut self) -> Result<(), CoreError> {
        if self.record.status == ContentStatus::Published {
            return Err(CoreError::Conflict("Content is already published".into()));
        }

        self.record.status = ContentStatus::Published;
        self.record.published_at = Some(Utc::now());
        self.pending_events.push(ContentEvent::Published {
            content_id: self.record.id,
        });
        Ok(())
    }

    /// Revert `published` back to `draft`, clearing `published_at`.
    ///
    /// Fails unless currently published.
    pub fn unpublish(&mut self) -> Result<(), CoreError> {
        if self.record.status != ContentStatus::Published {
            return Err(CoreError::Conflict("Content is not published".into()));
        }

        self.record.status = ContentStatus::Draft;
        self.record.published_at = None;
        Ok(())
    }

    /// Transition to `archived` from either `draft` or `published`.
    ///
    /// `published_at` is cleared so the `published ⇔ published_at`
    /// invariant keeps holding; the historical publish timestamp is
    /// intentionally dropped with it. Fails when already archived.
    pub fn archive(&mut self) -> Result<(), CoreError> {
        if self.record.status == ContentStatus::Archived {
            return Err(CoreError::Conflict("Content is already archived".into()));
        }

        self.record.status = ContentStatus::Archived;
        self.record.published_at = None;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
