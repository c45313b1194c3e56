//! Typed request dispatch.
//!
//! Replaces a framework message bus with a compile-time registry: each
//! command/query type implements [`Request`], and [`ContentDispatcher`]
//! implements [`Handle`] for it exactly once. `dispatcher.execute(req)`
//! therefore routes a typed request to its one handler, and a request type
//! without a registered handler is a compile error rather than a runtime
//! lookup failure.

use async_trait::async_trait;

use crate::commands::{
    ArchiveContent, ArchiveContentHandler, CreateContent, CreateContentHandler, PublishContent,
    PublishContentHandler, UnpublishContent, UnpublishContentHandler,
};
use crate::content::ContentRecord;
use crate::error::CoreError;
use crate::queries::{
    ContentWithTopic, GetContent, GetContentHandler, GetPublishedContent,
    GetPublishedContentHandler, GetTopicContent, GetTopicContentHandler,
};
use crate::store::{SharedContentStore, SharedEventSink, SharedPublishedCache, SharedTopicLookup};

/// A dispatchable command or query.
pub trait Request: Send {
    /// What the handler returns on success.
    type Output: Send;
}

/// Routing seam: implemented by the dispatcher once per request type.
#[async_trait]
pub trait Handle<R: Request> {
    async fn handle(&self, request: R) -> Result<R::Output, CoreError>;
}

/// Owns one handler per request type and their shared collaborators.
pub struct ContentDispatcher {
    create: CreateContentHandler,
    publish: PublishContentHandler,
    unpublish: UnpublishContentHandler,
    archive: ArchiveContentHandler,
    get_content: GetContentHandler,
    get_published: GetPublishedContentHandler,
    get_topic_content: GetTopicContentHandler,
}

impl ContentDispatcher {
    /// Wire every handler against the given collaborators.
    pub fn new(
        store: SharedContentStore,
        topics: SharedTopicLookup,
        cache: SharedPublishedCache,
        events: SharedEventSink,
    ) -> Self {
        Self {
            create: CreateContentHandler::new(store.clone(), topics.clone()),
            publish: PublishContentHandler::new(store.clone(), events, cache.clone()),
            unpublish: UnpublishContentHandler::new(store.clone(), cache.clone()),
            archive: ArchiveContentHandler::new(store.clone(), cache.clone()),
            get_content: GetContentHandler::new(store.clone(), topics.clone()),
            get_published: GetPublishedContentHandler::new(store.clone(), cache),
            get_topic_content: GetTopicContentHandler::new(store, topics),
        }
    }

    /// Route a request to its registered handler.
    pub async fn execute<R>(&self, request: R) -> Result<R::Output, CoreError>
    where
        R: Request,
        Self: Handle<R>,
    {
        Handle::handle(self, request).await
    }
}

// ---------------------------------------------------------------------------
// Registrations
// ---------------------------------------------------------------------------

impl Request for CreateContent {
    type Output = ContentRecord;
}

#[async_trait]
impl Handle<CreateContent> for ContentDispatcher {
    async fn handle(&self, request: CreateContent) -> Result<ContentRecord, CoreError> {
        self.create.execute(request).await
    }
}

impl Request for PublishContent {
    type Output = ContentRecord;
}

#[async_trait]
impl Handle<PublishContent> for ContentDispatcher {
    async fn handle(&self, request: PublishContent) -> Result<ContentRecord, CoreError> {
        self.publish.execute(request).await
    }
}

impl Request for UnpublishContent {
    type Output = ContentRecord;
}

#[async_trait]
impl Handle<UnpublishContent> for ContentDispatcher {
    async fn handle(&self, request: UnpublishContent) -> Result<ContentRecord, CoreError> {
        self.unpublish.execute(request).await
    }
}

impl Request for ArchiveContent {
    type Output = ContentRecord;
}

#[async_trait]
impl Handle<ArchiveContent> for ContentDispatcher {
    async fn handle(&self, request: ArchiveContent) -> Result<ContentRecord, CoreError> {
        self.archive.execute(request).await
    }
}

impl Request for GetContent {
    type Output = ContentWithTopic;
}

#[async_trait]
impl Handle<GetContent> for ContentDispatcher {
    async fn handle(&self, request: GetContent) -> Result<ContentWithTopic, CoreError> {
        self.get_content.execute(request).await
    }
}

impl Request for GetPublishedContent {
    type Output = Vec<ContentRecord>;
}

#[async_trait]
impl Handle<GetPublishedContent> for ContentDispatcher {
    async fn handle(&self, request: GetPublishedContent) -> Result<Vec<ContentRecord>, CoreError> {
        self.get_published.execute(request).await
    }
}

impl Request for GetTopicContent {
    type Output = Vec<ContentRecord>;
}

#[async_trait]
impl Handle<GetTopicContent> for ContentDispatcher {
    async fn handle(&self, request: GetTopicContent) -> Result<Vec<ContentRecord>, CoreError> {
        self.get_topic_content.execute(request).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
