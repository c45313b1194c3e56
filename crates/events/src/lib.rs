//! Devdocs event bus infrastructure.
//!
//! Building blocks for the in-process domain event system:
//!
//! - [`EventBus`] — publish/subscribe hub backed by
//!   `tokio::sync::broadcast`, also the command pipeline's event sink.
//! - [`DomainEvent`] — the canonical domain event envelope.
//! - [`ContentPublishedListener`] — background task reacting to
//!   `content.published` events.

pub mod bus;
pub mod listener;

pub use bus::{DomainEvent, EventBus, CONTENT_PUBLISHED};
pub use listener::ContentPublishedListener;
