//! Feed store - the single-owner holder of the authentic item list
//!
//! Write discipline: the synchronizer is the only mutator of the list
//! (`replace_all`, `prepend_new`), and the engagement tracker is the only
//! mutator of the counters (`apply_counter_delta`). Both entry points are
//! crate-private; everything else gets read-only snapshots.

use std::collections::HashSet;

use parking_lot::RwLock;

use feed_core::entities::{EngagementKind, FeedItem};
use feed_core::value_objects::FeedId;

#[derive(Default)]
struct FeedState {
    items: Vec<FeedItem>,
    ids: HashSet<FeedId>,
}

/// Thread-safe holder of the authentic, deduplicated, ordered item list
#[derive(Default)]
pub struct FeedStore {
    inner: RwLock<FeedState>,
}

impl FeedStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of held items
    pub fn len(&self) -> usize {
        self.inner.read().items.len()
    }

    /// Check if the store holds no items
    pub fn is_empty(&self) -> bool {
        self.inner.read().items.is_empty()
    }

    /// Snapshot of the full item list, in feed order
    pub fn items(&self) -> Vec<FeedItem> {
        self.inner.read().items.clone()
    }

    /// Item at an authentic-list index
    pub fn item_at(&self, index: usize) -> Option<FeedItem> {
        self.inner.read().items.get(index).cloned()
    }

    /// Item by id
    pub fn item_by_id(&self, id: FeedId) -> Option<FeedItem> {
        self.inner
            .read()
            .items
            .iter()
            .find(|item| item.id == id)
            .cloned()
    }

    /// Check whether an item id is held
    pub fn contains(&self, id: FeedId) -> bool {
        self.inner.read().ids.contains(&id)
    }

    /// Ids of all held items
    pub fn ids(&self) -> HashSet<FeedId> {
        self.inner.read().ids.clone()
    }

    /// Replace the entire list (initial load only)
    pub(crate) fn replace_all(&self, items: Vec<FeedItem>) {
        let mut state = self.inner.write();
        state.ids = items.iter().map(|item| item.id).collect();
        state.items = items;
    }

    /// Prepend the fetched items not already held, preserving fetch order
    ///
    /// Held items are never replaced, reordered, or removed here; expiry is
    /// evaluated lazily at render time.
    pub(crate) fn prepend_new(&self, fetched: Vec<FeedItem>) -> usize {
        let mut state = self.inner.write();
        let fresh: Vec<FeedItem> = fetched
            .into_iter()
            .filter(|item| !state.ids.contains(&item.id))
            .collect();

        if fresh.is_empty() {
            return 0;
        }

        for item in &fresh {
            state.ids.insert(item.id);
        }
        let count = fresh.len();
        state.items.splice(0..0, fresh);
        count
    }

    /// Apply a counter delta for an item (engagement tracker only)
    ///
    /// Returns false when the item is not held. Counters never go below zero.
    pub(crate) fn apply_counter_delta(
        &self,
        item_id: FeedId,
        kind: EngagementKind,
        delta: i64,
    ) -> bool {
        let mut state = self.inner.write();
        let Some(item) = state.items.iter_mut().find(|item| item.id == item_id) else {
            return false;
        };

        let counter = match kind {
            EngagementKind::View => &mut item.view_count,
            EngagementKind::Contact => &mut item.contact_count,
            EngagementKind::Reaction => &mut item.reaction_count,
            EngagementKind::Comment => &mut item.comment_count,
        };
        *counter = (*counter + delta).max(0);
        true
    }
}
