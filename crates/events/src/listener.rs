//! Background listener for content publication events.
//!
//! [`ContentPublishedListener`] subscribes to the
//! [`EventBus`](crate::bus::EventBus) broadcast channel and reacts to
//! every `content.published` event it receives. It runs as a long-lived
//! background task and shuts down gracefully when the bus sender is
//! dropped.

use tokio::sync::broadcast;

use crate::bus::{DomainEvent, CONTENT_PUBLISHED};

/// Background service that reacts to published-content events.
///
/// Currently the reaction is an audit log line; downstream side effects
/// (search indexing, notifications) would hang off this loop.
pub struct ContentPublishedListener;

impl ContentPublishedListener {
    /// Run the listener loop.
    ///
    /// Consumes events from the provided `receiver`. The loop exits when
    /// the channel is closed (i.e. the [`EventBus`](crate::bus::EventBus)
    /// is dropped).
    pub async fn run(mut receiver: broadcast::Receiver<DomainEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => Self::handle(&event),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Event listener lagged, some events were missed");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, listener shutting down");
                    break;
                }
            }
        }
    }

    fn handle(event: &DomainEvent) {
        if event.event_type != CONTENT_PUBLISHED {
            return;
        }
        tracing::info!(
            content_id = ?event.source_entity_id,
            timestamp = %event.timestamp,
            "Content published"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::EventBus;
    use devdocs_core::content::ContentEvent;
    use devdocs_core::store::EventSink;

    #[tokio::test]
    async fn listener_exits_when_bus_is_dropped() {
        let bus = EventBus::default();
        let rx = bus.subscribe();

        bus.emit(ContentEvent::Published { content_id: 1 });
        drop(bus);

        // With the sender gone the loop drains the buffered event and
        // returns instead of hanging.
        ContentPublishedListener::run(rx).await;
    }
}
