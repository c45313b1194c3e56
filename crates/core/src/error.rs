use crate::types::DbId;

/// Domain-level error taxonomy.
///
/// Client-input failures (not-found, validation, invalid state transition)
/// and store failures are kept distinct so the API layer can map them to
/// the right HTTP status without string matching.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failure from a content/topic store implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A save was attempted against a stale optimistic version token.
    #[error("Version conflict for content {id}: expected version {expected}")]
    VersionConflict { id: DbId, expected: i32 },

    /// Any other backend failure (connection, query, decode).
    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Wrap an arbitrary backend error.
    pub fn backend(err: impl std::fmt::Display) -> Self {
        StoreError::Backend(err.to_string())
    }
}
