//! Test helpers for integration tests
//!
//! Wires an engine (or individual services) over the in-memory backend with
//! switchable viewer identity and a recording contact channel.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use feed_backend::MemoryBackend;
use feed_core::entities::FeedItem;
use feed_core::error::DomainError;
use feed_core::traits::{BackendResult, ContactChannel, FeedItemSource, IdentityProvider};
use feed_core::value_objects::FeedId;
use feed_engine::{EngineContext, FeedEngine, VisibilityReport};

/// Identity provider whose viewer can be swapped mid-test
#[derive(Default)]
pub struct TestIdentity {
    viewer: Mutex<Option<FeedId>>,
}

impl TestIdentity {
    pub fn signed_in(viewer: FeedId) -> Arc<Self> {
        Arc::new(Self {
            viewer: Mutex::new(Some(viewer)),
        })
    }

    pub fn anonymous() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn switch_to(&self, viewer: Option<FeedId>) {
        *self.viewer.lock() = viewer;
    }
}

impl IdentityProvider for TestIdentity {
    fn current_viewer(&self) -> Option<FeedId> {
        *self.viewer.lock()
    }
}

/// Contact channel that records every opened link
#[derive(Default)]
pub struct RecordingChannel {
    opened: Mutex<Vec<String>>,
}

impl RecordingChannel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().clone()
    }
}

impl ContactChannel for RecordingChannel {
    fn open(&self, uri: &str) -> BackendResult<()> {
        self.opened.lock().push(uri.to_string());
        Ok(())
    }
}

/// Item source that always fails, for initial-load failure scenarios
pub struct FailingSource;

#[async_trait]
impl FeedItemSource for FailingSource {
    async fn fetch_active_items(
        &self,
        _limit: usize,
        _now: DateTime<Utc>,
    ) -> BackendResult<Vec<FeedItem>> {
        Err(DomainError::BackendError("connection refused".to_string()))
    }

    async fn remove_item(&self, id: FeedId) -> BackendResult<()> {
        Err(DomainError::ItemNotFound(id))
    }
}

/// Item source that succeeds once, then fails every subsequent fetch
pub struct FlakySource {
    inner: Arc<MemoryBackend>,
    calls: std::sync::atomic::AtomicUsize,
}

impl FlakySource {
    pub fn new(inner: Arc<MemoryBackend>) -> Arc<Self> {
        Arc::new(Self {
            inner,
            calls: std::sync::atomic::AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl FeedItemSource for FlakySource {
    async fn fetch_active_items(
        &self,
        limit: usize,
        now: DateTime<Utc>,
    ) -> BackendResult<Vec<FeedItem>> {
        if self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst) == 0 {
            self.inner.fetch_active_items(limit, now).await
        } else {
            Err(DomainError::BackendError("connection reset".to_string()))
        }
    }

    async fn remove_item(&self, id: FeedId) -> BackendResult<()> {
        self.inner.remove_item(id).await
    }
}

/// Engagement store whose every write fails, for best-effort paths
pub struct FailingEngagement;

#[async_trait]
impl feed_core::traits::EngagementStore for FailingEngagement {
    async fn insert_view(&self, _event: &feed_core::entities::ViewEvent) -> BackendResult<()> {
        Err(DomainError::BackendError("write failed".to_string()))
    }

    async fn insert_contact(
        &self,
        _event: &feed_core::entities::ContactEvent,
    ) -> BackendResult<()> {
        Err(DomainError::BackendError("write failed".to_string()))
    }

    async fn find_reaction(
        &self,
        _item_id: FeedId,
        _viewer_id: FeedId,
        _kind: feed_core::entities::ReactionKind,
    ) -> BackendResult<Option<feed_core::entities::Reaction>> {
        Err(DomainError::BackendError("read failed".to_string()))
    }

    async fn upsert_reaction(&self, _reaction: &feed_core::entities::Reaction) -> BackendResult<()> {
        Err(DomainError::BackendError("write failed".to_string()))
    }

    async fn delete_reaction(
        &self,
        _item_id: FeedId,
        _viewer_id: FeedId,
        _kind: feed_core::entities::ReactionKind,
    ) -> BackendResult<()> {
        Err(DomainError::BackendError("write failed".to_string()))
    }

    async fn insert_comment(&self, _comment: &feed_core::entities::Comment) -> BackendResult<()> {
        Err(DomainError::BackendError("write failed".to_string()))
    }

    async fn find_comment(
        &self,
        _id: FeedId,
    ) -> BackendResult<Option<feed_core::entities::Comment>> {
        Err(DomainError::BackendError("read failed".to_string()))
    }

    async fn delete_comment(&self, _id: FeedId) -> BackendResult<()> {
        Err(DomainError::BackendError("write failed".to_string()))
    }

    async fn list_comments(
        &self,
        _item_id: FeedId,
    ) -> BackendResult<Vec<feed_core::entities::Comment>> {
        Err(DomainError::BackendError("read failed".to_string()))
    }
}

/// Everything a test needs to drive the engine
pub struct TestHarness {
    pub backend: Arc<MemoryBackend>,
    pub identity: Arc<TestIdentity>,
    pub channel: Arc<RecordingChannel>,
    pub ctx: EngineContext,
}

impl TestHarness {
    /// Build a harness with a signed-in viewer
    pub fn signed_in(viewer: FeedId) -> Self {
        Self::build(TestIdentity::signed_in(viewer))
    }

    /// Build a harness with an anonymous viewer
    pub fn anonymous() -> Self {
        Self::build(TestIdentity::anonymous())
    }

    fn build(identity: Arc<TestIdentity>) -> Self {
        let backend = Arc::new(MemoryBackend::new());
        let channel = RecordingChannel::new();

        let ctx = EngineContext::builder()
            .items(backend.clone())
            .engagement(backend.clone())
            .identity(identity.clone())
            .contact_channel(channel.clone())
            .build()
            .expect("context should build");

        Self {
            backend,
            identity,
            channel,
            ctx,
        }
    }

    /// Seed the backend with items
    pub fn seed(&self, items: Vec<FeedItem>) {
        for item in items {
            self.backend.insert_item(item);
        }
    }

    /// Build an engine over this harness
    pub fn engine(&self) -> FeedEngine {
        FeedEngine::new(self.ctx.clone())
    }
}

/// Visibility reports giving one rendered element full dominance
pub fn dominant_at(rendered_index: usize) -> Vec<VisibilityReport> {
    vec![
        VisibilityReport::new(rendered_index, 0.9),
        VisibilityReport::new(rendered_index + 1, 0.1),
    ]
}

/// Let spawned best-effort tasks (view tracking, reactions) run to completion
pub async fn drain_tasks() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}
