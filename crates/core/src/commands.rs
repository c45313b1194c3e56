//! Commands and their handlers.
//!
//! Each command is a plain value object; each handler owns exactly the
//! collaborators it needs. Mutating handlers follow the same shape: load,
//! reconstitute the aggregate, run the transition, persist with the
//! version check, and only then flush buffered events and invalidate the
//! published-list cache keys the change affects. A failed persist
//! therefore guarantees zero event emission.

use serde::Deserialize;
use validator::Validate;

use crate::content::{
    validate_body, validate_code_examples, validate_order, validate_title, CodeExample,
    ContentAggregate, ContentRecord, ContentStatus, NewContent,
};
use crate::error::CoreError;
use crate::queries::published_cache_key;
use crate::store::{SharedContentStore, SharedEventSink, SharedPublishedCache, SharedTopicLookup};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Command value objects
// ---------------------------------------------------------------------------

/// Request to create a new content item (also the HTTP request body).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateContent {
    pub topic_id: DbId,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub body: String,
    pub code_examples: Option<Vec<CodeExample>>,
    #[validate(range(min = 0))]
    pub order: Option<i32>,
    pub status: Option<ContentStatus>,
}

/// Request to publish an existing content item.
#[derive(Debug, Clone, Copy)]
pub struct PublishContent {
    pub content_id: DbId,
}

/// Request to revert a published content item to draft.
#[derive(Debug, Clone, Copy)]
pub struct UnpublishContent {
    pub content_id: DbId,
}

/// Request to archive a content item.
#[derive(Debug, Clone, Copy)]
pub struct ArchiveContent {
    pub content_id: DbId,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Handles [`CreateContent`]: verifies the owning topic, validates the
/// payload, and inserts the fresh record. Plain creation raises no events.
pub struct CreateContentHandler {
    store: SharedContentStore,
    topics: SharedTopicLookup,
}

impl CreateContentHandler {
    pub fn new(store: SharedContentStore, topics: SharedTopicLookup) -> Self {
        Self { store, topics }
    }

    pub async fn execute(&self, input: CreateContent) -> Result<ContentRecord, CoreError> {
        input
            .validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;
        validate_title(&input.title)?;
        validate_body(&input.body)?;

        let order = input.order.unwrap_or(0);
        validate_order(order)?;

        let code_examples = input.code_examples.unwrap_or_default();
        validate_code_examples(&code_examples)?;

        // The topic reference must resolve before anything is written.
        self.topics
            .find_by_id(input.topic_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Topic",
                id: input.topic_id,
            })?;

        let fresh = NewContent::new(
            input.topic_id,
            input.title,
            input.body,
            code_examples,
            order,
            input.status.unwrap_or(ContentStatus::Draft),
        );

        Ok(self.store.insert(&fresh).await?)
    }
}

/// Handles [`PublishContent`]: persist-then-flush around
/// [`ContentAggregate::publish`].
pub struct PublishContentHandler {
    store: SharedContentStore,
    events: SharedEventSink,
    cache: SharedPublishedCache,
}

impl PublishContentHandler {
    pub fn new(
        store: SharedContentStore,
        events: SharedEventSink,
        cache: SharedPublishedCache,
    ) -> Self {
        Self {
            store,
            events,
            cache,
        }
    }

    pub async fn execute(&self, command: PublishContent) -> Result<ContentRecord, CoreError> {
        let record = load_content(&self.store, command.content_id).await?;
        let mut aggregate = ContentAggregate::reconstitute(record);

        aggregate.publish()?;

        let saved = self.store.save(aggregate.record()).await?;

        // Persistence happens-before event flush.
        for event in aggregate.take_events() {
            self.events.emit(event);
        }
        invalidate_published_keys(&self.cache, saved.topic_id);

        Ok(saved)
    }
}

/// Handles [`UnpublishContent`]. No event is raised; the published list
/// cache is invalidated because the item leaves it.
pub struct UnpublishContentHandler {
    store: SharedContentStore,
    cache: SharedPublishedCache,
}

impl UnpublishContentHandler {
    pub fn new(store: SharedContentStore, cache: SharedPublishedCache) -> Self {
        Self { store, cache }
    }

    pub async fn execute(&self, command: UnpublishContent) -> Result<ContentRecord, CoreError> {
        let record = load_content(&self.store, command.content_id).await?;
        let mut aggregate = ContentAggregate::reconstitute(record);

        aggregate.unpublish()?;

        let saved = self.store.save(aggregate.record()).await?;
        invalidate_published_keys(&self.cache, saved.topic_id);

        Ok(saved)
    }
}

/// Handles [`ArchiveContent`].
pub struct ArchiveContentHandler {
    store: SharedContentStore,
    cache: SharedPublishedCache,
}

impl ArchiveContentHandler {
    pub fn new(store: SharedContentStore, cache: SharedPublishedCache) -> Self {
        Self { store, cache }
    }

    pub async fn execute(&self, command: ArchiveContent) -> Result<ContentRecord, CoreError> {
        let record = load_content(&self.store, command.content_id).await?;
        let mut aggregate = ContentAggregate::reconstitute(record);

        aggregate.archive()?;

        let saved = self.store.save(aggregate.record()).await?;
        invalidate_published_keys(&self.cache, saved.topic_id);

        Ok(saved)
    }
}

/// Fetch a content record or fail with a not-found error.
async fn load_content(store: &SharedContentStore, id: DbId) -> Result<ContentRecord, CoreError> {
    store.find_by_id(id).await?.ok_or(CoreError::NotFound {
        entity: "Content",
        id,
    })
}

/// Drop the published-list cache entries a state change can affect: the
/// topic-scoped key and the unfiltered key.
fn invalidate_published_keys(cache: &SharedPublishedCache, topic_id: DbId) {
    cache.invalidate(&published_cache_key(Some(topic_id)));
    cache.invalidate(&published_cache_key(None));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_matches::assert_matches;
    use async_trait::async_trait;

    use super::*;
    use crate::content::ContentEvent;
    use crate::error::StoreError;
    use crate::memory::{
        InMemoryContentStore, InMemoryPublishedCache, InMemoryTopics, RecordingEventSink,
    };
    use crate::store::{ContentStore, PublishedCache};

    fn create_input(topic_id: DbId) -> CreateContent {
        CreateContent {
            topic_id,
            title: "Intro".to_string(),
            body: "# Welcome".to_string(),
            code_examples: None,
            order: None,
            status: None,
        }
    }

    fn collaborators() -> (
        Arc<InMemoryContentStore>,
        Arc<InMemoryTopics>,
        Arc<RecordingEventSink>,
        Arc<InMemoryPublishedCache>,
    ) {
        let topics = Arc::new(InMemoryTopics::default());
        topics.add(1);
        (
            Arc::new(InMemoryContentStore::default()),
            topics,
            Arc::new(RecordingEventSink::default()),
            Arc::new(InMemoryPublishedCache::default()),
        )
    }

    // -- create --------------------------------------------------------------

    #[tokio::test]
    async fn create_defaults_to_draft() {
        let (store, topics, _, _) = collaborators();
        let handler = CreateContentHandler::new(store.clone(), topics);

        let record = handler.execute(create_input(1)).await.unwrap();

        assert_eq!(record.status, ContentStatus::Draft);
        assert_eq!(record.published_at, None);
        assert_eq!(record.version, 1);
        assert_eq!(record.order, 0);
        assert!(store.find_by_id(record.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn create_with_unknown_topic_fails_and_writes_nothing() {
        let (store, topics, _, _) = collaborators();
        let handler = CreateContentHandler::new(store.clone(), topics);

        let err = handler.execute(create_input(999)).await.unwrap_err();

        assert_matches!(
            err,
            CoreError::NotFound {
                entity: "Topic",
                id: 999
            }
        );
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn create_rejects_invalid_payloads() {
        let (store, topics, _, _) = collaborators();
        let handler = CreateContentHandler::new(store, topics);

        let blank_title = CreateContent {
            title: "   ".into(),
            ..create_input(1)
        };
        assert_matches!(
            handler.execute(blank_title).await.unwrap_err(),
            CoreError::Validation(_)
        );

        let negative_order = CreateContent {
            order: Some(-3),
            ..create_input(1)
        };
        assert_matches!(
            handler.execute(negative_order).await.unwrap_err(),
            CoreError::Validation(_)
        );

        let bad_example = CreateContent {
            code_examples: Some(vec![CodeExample {
                language: String::new(),
                code: "x".into(),
                description: None,
            }]),
            ..create_input(1)
        };
        assert_matches!(
            handler.execute(bad_example).await.unwrap_err(),
            CoreError::Validation(_)
        );
    }

    #[tokio::test]
    async fn create_born_published_sets_published_at() {
        let (store, topics, _, _) = collaborators();
        let handler = CreateContentHandler::new(store, topics);

        let input = CreateContent {
            status: Some(ContentStatus::Published),
            ..create_input(1)
        };
        let record = handler.execute(input).await.unwrap();

        assert_eq!(record.status, ContentStatus::Published);
        assert!(record.published_at.is_some());
    }

    // -- publish -------------------------------------------------------------

    #[tokio::test]
    async fn publish_persists_bumps_version_and_emits_once() {
        let (store, topics, sink, cache) = collaborators();
        let create = CreateContentHandler::new(store.clone(), topics);
        let publish = PublishContentHandler::new(store.clone(), sink.clone(), cache);

        let draft = create.execute(create_input(1)).await.unwrap();
        let published = publish
            .execute(PublishContent {
                content_id: draft.id,
            })
            .await
            .unwrap();

        assert_eq!(published.status, ContentStatus::Published);
        assert!(published.published_at.is_some());
        assert_eq!(published.version, draft.version + 1);
        assert_eq!(
            sink.events(),
            vec![ContentEvent::Published {
                content_id: draft.id
            }]
        );
    }

    #[tokio::test]
    async fn publish_twice_is_a_conflict_with_no_second_event() {
        let (store, topics, sink, cache) = collaborators();
        let create = CreateContentHandler::new(store.clone(), topics);
        let publish = PublishContentHandler::new(store.clone(), sink.clone(), cache);

        let draft = create.execute(create_input(1)).await.unwrap();
        let command = PublishContent {
            content_id: draft.id,
        };
        let first = publish.execute(command).await.unwrap();

        let err = publish.execute(command).await.unwrap_err();
        assert_matches!(err, CoreError::Conflict(_));

        // State and version are untouched by the failed attempt.
        let stored = store.find_by_id(draft.id).await.unwrap().unwrap();
        assert_eq!(stored, first);
        assert_eq!(sink.events().len(), 1);
    }

    #[tokio::test]
    async fn publish_unknown_content_is_not_found() {
        let (store, _, sink, cache) = collaborators();
        let publish = PublishContentHandler::new(store, sink.clone(), cache);

        let err = publish
            .execute(PublishContent { content_id: 42 })
            .await
            .unwrap_err();

        assert_matches!(
            err,
            CoreError::NotFound {
                entity: "Content",
                id: 42
            }
        );
        assert!(sink.events().is_empty());
    }

    #[tokio::test]
    async fn failed_persist_emits_no_event() {
        // A store whose save always fails: the flush step must never run.
        struct BrokenSave(Arc<InMemoryContentStore>);

        #[async_trait]
        impl ContentStore for BrokenSave {
            async fn insert(&self, content: &NewContent) -> Result<ContentRecord, StoreError> {
                self.0.insert(content).await
            }
            async fn find_by_id(&self, id: DbId) -> Result<Option<ContentRecord>, StoreError> {
                self.0.find_by_id(id).await
            }
            async fn list_by_status(
                &self,
                status: ContentStatus,
                topic_id: Option<DbId>,
            ) -> Result<Vec<ContentRecord>, StoreError> {
                self.0.list_by_status(status, topic_id).await
            }
            async fn save(&self, _record: &ContentRecord) -> Result<ContentRecord, StoreError> {
                Err(StoreError::Backend("disk on fire".into()))
            }
        }

        let (inner, topics, sink, cache) = collaborators();
        let create = CreateContentHandler::new(inner.clone(), topics);
        let draft = create.execute(create_input(1)).await.unwrap();

        let publish =
            PublishContentHandler::new(Arc::new(BrokenSave(inner)), sink.clone(), cache);
        let err = publish
            .execute(PublishContent {
                content_id: draft.id,
            })
            .await
            .unwrap_err();

        assert_matches!(err, CoreError::Store(StoreError::Backend(_)));
        assert!(sink.events().is_empty(), "no phantom notification");
    }

    #[tokio::test]
    async fn publish_invalidates_published_cache_keys() {
        let (store, topics, sink, cache) = collaborators();
        let create = CreateContentHandler::new(store.clone(), topics);
        let publish = PublishContentHandler::new(store, sink, cache.clone());

        cache.put(&published_cache_key(Some(1)), vec![]);
        cache.put(&published_cache_key(None), vec![]);

        let draft = create.execute(create_input(1)).await.unwrap();
        publish
            .execute(PublishContent {
                content_id: draft.id,
            })
            .await
            .unwrap();

        assert!(cache.get(&published_cache_key(Some(1))).is_none());
        assert!(cache.get(&published_cache_key(None)).is_none());
    }

    // -- unpublish / archive -------------------------------------------------

    #[tokio::test]
    async fn unpublish_returns_to_draft() {
        let (store, topics, sink, cache) = collaborators();
        let create = CreateContentHandler::new(store.clone(), topics);
        let publish = PublishContentHandler::new(store.clone(), sink, cache.clone());
        let unpublish = UnpublishContentHandler::new(store.clone(), cache);

        let draft = create.execute(create_input(1)).await.unwrap();
        publish
            .execute(PublishContent {
                content_id: draft.id,
            })
            .await
            .unwrap();

        let reverted = unpublish
            .execute(UnpublishContent {
                content_id: draft.id,
            })
            .await
            .unwrap();

        assert_eq!(reverted.status, ContentStatus::Draft);
        assert_eq!(reverted.published_at, None);
        assert_eq!(reverted.version, draft.version + 2);
    }

    #[tokio::test]
    async fn unpublish_draft_is_a_conflict() {
        let (store, topics, _, cache) = collaborators();
        let create = CreateContentHandler::new(store.clone(), topics);
        let unpublish = UnpublishContentHandler::new(store, cache);

        let draft = create.execute(create_input(1)).await.unwrap();
        let err = unpublish
            .execute(UnpublishContent {
                content_id: draft.id,
            })
            .await
            .unwrap_err();

        assert_matches!(err, CoreError::Conflict(_));
    }

    #[tokio::test]
    async fn archive_twice_is_a_conflict() {
        let (store, topics, _, cache) = collaborators();
        let create = CreateContentHandler::new(store.clone(), topics);
        let archive = ArchiveContentHandler::new(store, cache);

        let draft = create.execute(create_input(1)).await.unwrap();
        let command = ArchiveContent {
            content_id: draft.id,
        };

        let archived = archive.execute(command).await.unwrap();
        assert_eq!(archived.status, ContentStatus::Archived);

        assert_matches!(
            archive.execute(command).await.unwrap_err(),
            CoreError::Conflict(_)
        );
    }
}
