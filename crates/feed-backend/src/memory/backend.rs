//! In-memory backend
//!
//! Implements the same contracts as the hosted backend (expiry filtering in
//! `fetch_active_items`, reaction uniqueness, append-only events) against
//! in-process tables. Used by the integration tests and local development.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::RwLock;

use feed_core::entities::{Comment, ContactEvent, FeedItem, Reaction, ReactionKind, ViewEvent};
use feed_core::error::DomainError;
use feed_core::traits::{BackendResult, EngagementStore, FeedItemSource};
use feed_core::value_objects::FeedId;

/// In-memory backend tables
#[derive(Default)]
pub struct MemoryBackend {
    items: RwLock<Vec<FeedItem>>,
    views: RwLock<Vec<ViewEvent>>,
    contacts: RwLock<Vec<ContactEvent>>,
    reactions: DashMap<(FeedId, FeedId, ReactionKind), Reaction>,
    comments: DashMap<FeedId, Comment>,
}

impl MemoryBackend {
    /// Create an empty backend
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) an item
    pub fn insert_item(&self, item: FeedItem) {
        let mut items = self.items.write();
        items.retain(|existing| existing.id != item.id);
        items.push(item);
    }

    /// Number of recorded view events for an item
    pub fn view_count_for(&self, item_id: FeedId) -> usize {
        self.views.read().iter().filter(|v| v.item_id == item_id).count()
    }

    /// Number of recorded contact events for an item
    pub fn contact_count_for(&self, item_id: FeedId) -> usize {
        self.contacts
            .read()
            .iter()
            .filter(|c| c.item_id == item_id)
            .count()
    }

    /// Number of reaction rows for an item
    pub fn reaction_count_for(&self, item_id: FeedId) -> usize {
        self.reactions
            .iter()
            .filter(|entry| entry.key().0 == item_id)
            .count()
    }

    /// Number of comments for an item
    pub fn comment_count_for(&self, item_id: FeedId) -> usize {
        self.comments
            .iter()
            .filter(|entry| entry.value().item_id == item_id)
            .count()
    }
}

#[async_trait]
impl FeedItemSource for MemoryBackend {
    async fn fetch_active_items(
        &self,
        limit: usize,
        now: DateTime<Utc>,
    ) -> BackendResult<Vec<FeedItem>> {
        let mut active: Vec<FeedItem> = self
            .items
            .read()
            .iter()
            .filter(|item| item.is_active(now))
            .cloned()
            .collect();

        active.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        active.truncate(limit);
        Ok(active)
    }

    async fn remove_item(&self, id: FeedId) -> BackendResult<()> {
        let mut items = self.items.write();
        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            return Err(DomainError::ItemNotFound(id));
        }
        Ok(())
    }
}

#[async_trait]
impl EngagementStore for MemoryBackend {
    async fn insert_view(&self, event: &ViewEvent) -> BackendResult<()> {
        self.views.write().push(event.clone());
        Ok(())
    }

    async fn insert_contact(&self, event: &ContactEvent) -> BackendResult<()> {
        self.contacts.write().push(event.clone());
        Ok(())
    }

    async fn find_reaction(
        &self,
        item_id: FeedId,
        viewer_id: FeedId,
        kind: ReactionKind,
    ) -> BackendResult<Option<Reaction>> {
        Ok(self
            .reactions
            .get(&(item_id, viewer_id, kind))
            .map(|entry| entry.value().clone()))
    }

    async fn upsert_reaction(&self, reaction: &Reaction) -> BackendResult<()> {
        self.reactions.insert(reaction.key(), reaction.clone());
        Ok(())
    }

    async fn delete_reaction(
        &self,
        item_id: FeedId,
        viewer_id: FeedId,
        kind: ReactionKind,
    ) -> BackendResult<()> {
        self.reactions.remove(&(item_id, viewer_id, kind));
        Ok(())
    }

    async fn insert_comment(&self, comment: &Comment) -> BackendResult<()> {
        self.comments.insert(comment.id, comment.clone());
        Ok(())
    }

    async fn find_comment(&self, id: FeedId) -> BackendResult<Option<Comment>> {
        Ok(self.comments.get(&id).map(|entry| entry.value().clone()))
    }

    async fn delete_comment(&self, id: FeedId) -> BackendResult<()> {
        self.comments.remove(&id);
        Ok(())
    }

    async fn list_comments(&self, item_id: FeedId) -> BackendResult<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .comments
            .iter()
            .filter(|entry| entry.value().item_id == item_id)
            .map(|entry| entry.value().clone())
            .collect();

        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }
}
