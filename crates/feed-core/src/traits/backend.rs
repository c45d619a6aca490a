//! Backend traits (ports) - define the interface to the hosted backend
//!
//! The engine defines what it needs; the infrastructure layer provides the
//! implementation (HTTP client in production, in-memory tables in tests).

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Comment, ContactEvent, FeedItem, Reaction, ReactionKind, ViewEvent};
use crate::error::DomainError;
use crate::value_objects::FeedId;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, DomainError>;

// ============================================================================
// Feed Item Source
// ============================================================================

#[async_trait]
pub trait FeedItemSource: Send + Sync {
    /// Fetch up to `limit` active items ordered newest-first
    ///
    /// Must exclude anything with `expires_at <= now` and must be safe to
    /// call repeatedly without side effects.
    async fn fetch_active_items(
        &self,
        limit: usize,
        now: DateTime<Utc>,
    ) -> BackendResult<Vec<FeedItem>>;

    /// Force early removal of an item (owner or administrator action)
    async fn remove_item(&self, id: FeedId) -> BackendResult<()>;
}

// ============================================================================
// Engagement Store
// ============================================================================

#[async_trait]
pub trait EngagementStore: Send + Sync {
    /// Insert a view event (append-only, duplicates allowed)
    async fn insert_view(&self, event: &ViewEvent) -> BackendResult<()>;

    /// Insert a contact event (append-only)
    async fn insert_contact(&self, event: &ContactEvent) -> BackendResult<()>;

    /// Find a reaction by its (item, viewer, kind) key
    async fn find_reaction(
        &self,
        item_id: FeedId,
        viewer_id: FeedId,
        kind: ReactionKind,
    ) -> BackendResult<Option<Reaction>>;

    /// Upsert a reaction keyed by (item, viewer, kind); idempotent
    async fn upsert_reaction(&self, reaction: &Reaction) -> BackendResult<()>;

    /// Delete a reaction by its key; deleting a missing reaction is a no-op
    async fn delete_reaction(
        &self,
        item_id: FeedId,
        viewer_id: FeedId,
        kind: ReactionKind,
    ) -> BackendResult<()>;

    /// Insert a comment
    async fn insert_comment(&self, comment: &Comment) -> BackendResult<()>;

    /// Find a comment by id
    async fn find_comment(&self, id: FeedId) -> BackendResult<Option<Comment>>;

    /// Delete a comment by id (authorization is enforced by the caller)
    async fn delete_comment(&self, id: FeedId) -> BackendResult<()>;

    /// List comments for an item, oldest first
    async fn list_comments(&self, item_id: FeedId) -> BackendResult<Vec<Comment>>;
}

// ============================================================================
// Identity
// ============================================================================

/// Identity of the current viewer, supplied by the out-of-scope auth layer
pub trait IdentityProvider: Send + Sync {
    /// The signed-in viewer, or None when browsing anonymously
    fn current_viewer(&self) -> Option<FeedId>;
}

// ============================================================================
// Contact Channel
// ============================================================================

/// Opens an external messaging/calling intent
pub trait ContactChannel: Send + Sync {
    /// Open the composed deep link (sms:, tel:, WhatsApp URL)
    fn open(&self, uri: &str) -> BackendResult<()>;
}
