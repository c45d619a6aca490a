//! Read models handed to the rendering layer

use chrono::{DateTime, Utc};
use serde::Serialize;

use feed_core::entities::{FeedItem, MediaKind};
use feed_core::value_objects::{FeedId, TimeRemaining};

/// A feed item normalized for rendering
///
/// Expiry is evaluated at snapshot time and flagged per item; items already
/// held keep appearing even after their expiration instant (grandfathered),
/// so a renderer that wants strict behavior filters on `remaining.is_expired`.
#[derive(Debug, Clone, Serialize)]
pub struct ItemView {
    pub id: FeedId,
    pub owner_id: FeedId,
    pub title: String,
    pub description: Option<String>,
    pub media_url: String,
    pub media_kind: MediaKind,
    pub text_color: Option<String>,
    pub is_text_only: bool,
    pub price: Option<i64>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub has_contact: bool,
    pub created_at: DateTime<Utc>,
    pub remaining: TimeRemaining,
    pub counts: EngagementCounts,
}

impl ItemView {
    /// Build a view of an item as of `now`
    pub fn from_item(item: &FeedItem, now: DateTime<Utc>) -> Self {
        Self {
            id: item.id,
            owner_id: item.owner_id,
            title: item.title.clone(),
            description: item.description.clone(),
            media_url: item.media_url.clone(),
            media_kind: item.media_kind,
            text_color: item.text_color.clone(),
            is_text_only: item.is_text_only,
            price: item.price,
            location: item.location.clone(),
            category: item.category.clone(),
            has_contact: item.contact_phone.is_some(),
            created_at: item.created_at,
            remaining: item.time_remaining(now),
            counts: EngagementCounts::of(item),
        }
    }
}

/// Current engagement counters for an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngagementCounts {
    pub views: i64,
    pub contacts: i64,
    pub reactions: i64,
    pub comments: i64,
}

impl EngagementCounts {
    /// Read the counters off an item
    pub fn of(item: &FeedItem) -> Self {
        Self {
            views: item.view_count,
            contacts: item.contact_count,
            reactions: item.reaction_count,
            comments: item.comment_count,
        }
    }
}

/// The normalized, deduplicated, ordered item list at a point in time
#[derive(Debug, Clone, Serialize)]
pub struct FeedSnapshot {
    pub items: Vec<ItemView>,
    pub taken_at: DateTime<Utc>,
}

impl FeedSnapshot {
    /// Build a snapshot of the given items as of `now`
    pub fn new(items: &[FeedItem], now: DateTime<Utc>) -> Self {
        Self {
            items: items.iter().map(|item| ItemView::from_item(item, now)).collect(),
            taken_at: now,
        }
    }

    /// Number of items in the snapshot
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the snapshot is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Views of only the items still active at snapshot time
    pub fn active_items(&self) -> impl Iterator<Item = &ItemView> {
        self.items.iter().filter(|view| !view.remaining.is_expired)
    }
}
