//! Engine context - dependency container for services
//!
//! Holds the backend ports, the feed store, the event bus, and configuration.

use std::sync::Arc;

use feed_common::config::{EngagementConfig, FeedConfig, GestureConfig, ViewportConfig};
use feed_core::traits::{ContactChannel, EngagementStore, FeedItemSource, IdentityProvider};

use crate::events::EventBus;
use crate::state::FeedStore;

/// Engine context containing all dependencies
///
/// This is the dependency container passed to every service. It provides
/// access to:
/// - The backend ports (item source, engagement store, identity, contact)
/// - The single-owner feed store
/// - The event bus for UI callbacks
/// - Timing/policy configuration
#[derive(Clone)]
pub struct EngineContext {
    items: Arc<dyn FeedItemSource>,
    engagement: Arc<dyn EngagementStore>,
    identity: Arc<dyn IdentityProvider>,
    contact_channel: Arc<dyn ContactChannel>,

    store: Arc<FeedStore>,
    events: EventBus,

    feed: FeedConfig,
    viewport: ViewportConfig,
    gesture: GestureConfig,
    engagement_cfg: EngagementConfig,
}

impl EngineContext {
    /// Start building an engine context
    #[must_use]
    pub fn builder() -> EngineContextBuilder {
        EngineContextBuilder::new()
    }

    // === Backend ports ===

    /// Get the feed item source
    pub fn items(&self) -> &dyn FeedItemSource {
        self.items.as_ref()
    }

    /// Get the engagement store
    pub fn engagement(&self) -> &dyn EngagementStore {
        self.engagement.as_ref()
    }

    /// Get the identity provider
    pub fn identity(&self) -> &dyn IdentityProvider {
        self.identity.as_ref()
    }

    /// Get the contact channel
    pub fn contact_channel(&self) -> &dyn ContactChannel {
        self.contact_channel.as_ref()
    }

    // === Shared state ===

    /// Get the feed store
    pub fn store(&self) -> &FeedStore {
        self.store.as_ref()
    }

    /// Get the event bus
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    // === Configuration ===

    /// Feed TTL/refresh configuration
    pub fn feed_config(&self) -> &FeedConfig {
        &self.feed
    }

    /// Viewport focus configuration
    pub fn viewport_config(&self) -> &ViewportConfig {
        &self.viewport
    }

    /// Gesture timing configuration
    pub fn gesture_config(&self) -> &GestureConfig {
        &self.gesture
    }

    /// Engagement policy configuration
    pub fn engagement_config(&self) -> &EngagementConfig {
        &self.engagement_cfg
    }
}

impl std::fmt::Debug for EngineContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineContext")
            .field("store_len", &self.store.len())
            .field("feed", &self.feed)
            .finish()
    }
}

/// Builder for creating an EngineContext
pub struct EngineContextBuilder {
    items: Option<Arc<dyn FeedItemSource>>,
    engagement: Option<Arc<dyn EngagementStore>>,
    identity: Option<Arc<dyn IdentityProvider>>,
    contact_channel: Option<Arc<dyn ContactChannel>>,
    feed: FeedConfig,
    viewport: ViewportConfig,
    gesture: GestureConfig,
    engagement_cfg: EngagementConfig,
}

impl EngineContextBuilder {
    pub fn new() -> Self {
        Self {
            items: None,
            engagement: None,
            identity: None,
            contact_channel: None,
            feed: FeedConfig::default(),
            viewport: ViewportConfig::default(),
            gesture: GestureConfig::default(),
            engagement_cfg: EngagementConfig::default(),
        }
    }

    pub fn items(mut self, source: Arc<dyn FeedItemSource>) -> Self {
        self.items = Some(source);
        self
    }

    pub fn engagement(mut self, store: Arc<dyn EngagementStore>) -> Self {
        self.engagement = Some(store);
        self
    }

    pub fn identity(mut self, identity: Arc<dyn IdentityProvider>) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn contact_channel(mut self, channel: Arc<dyn ContactChannel>) -> Self {
        self.contact_channel = Some(channel);
        self
    }

    pub fn feed_config(mut self, config: FeedConfig) -> Self {
        self.feed = config;
        self
    }

    pub fn viewport_config(mut self, config: ViewportConfig) -> Self {
        self.viewport = config;
        self
    }

    pub fn gesture_config(mut self, config: GestureConfig) -> Self {
        self.gesture = config;
        self
    }

    pub fn engagement_config(mut self, config: EngagementConfig) -> Self {
        self.engagement_cfg = config;
        self
    }

    /// Build the EngineContext
    ///
    /// # Errors
    /// Returns `EngineError::Validation` if any required port is missing
    pub fn build(self) -> super::error::EngineResult<EngineContext> {
        Ok(EngineContext {
            items: self
                .items
                .ok_or_else(|| super::error::EngineError::validation("items source is required"))?,
            engagement: self.engagement.ok_or_else(|| {
                super::error::EngineError::validation("engagement store is required")
            })?,
            identity: self.identity.ok_or_else(|| {
                super::error::EngineError::validation("identity provider is required")
            })?,
            contact_channel: self.contact_channel.ok_or_else(|| {
                super::error::EngineError::validation("contact channel is required")
            })?,
            store: Arc::new(FeedStore::new()),
            events: EventBus::new(),
            feed: self.feed,
            viewport: self.viewport,
            gesture: self.gesture,
            engagement_cfg: self.engagement_cfg,
        })
    }
}

impl Default for EngineContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
