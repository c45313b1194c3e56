use std::sync::Arc;

use devdocs_core::dispatch::ContentDispatcher;
use devdocs_events::EventBus;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (topic/category CRUD and the health check).
    pub pool: devdocs_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Typed command/query dispatcher for the publishing core.
    pub dispatcher: Arc<ContentDispatcher>,
    /// Centralized event bus for domain events.
    pub event_bus: Arc<EventBus>,
}
