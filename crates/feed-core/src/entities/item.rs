//! Feed item entity - a time-boxed marketplace post

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{FeedId, TimeRemaining};

/// Kind of media attached to a feed item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Still image
    Image,
    /// Motion media (video/animation) subject to autoplay on focus
    Motion,
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Motion => write!(f, "motion"),
        }
    }
}

impl std::str::FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "image" => Ok(Self::Image),
            "motion" => Ok(Self::Motion),
            _ => Err(format!("Invalid media kind: {s}")),
        }
    }
}

/// Feed item entity
///
/// Owned by the posting merchant; the feed only references it. Counters are
/// mutated exclusively by the engagement tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub id: FeedId,
    pub owner_id: FeedId,
    pub title: String,
    pub description: Option<String>,
    pub media_url: String,
    pub media_kind: MediaKind,
    pub text_color: Option<String>,
    pub is_text_only: bool,
    /// Price in minor currency units
    pub price: Option<i64>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub contact_phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub view_count: i64,
    pub contact_count: i64,
    pub reaction_count: i64,
    pub comment_count: i64,
}

impl FeedItem {
    /// Create a new FeedItem expiring `ttl` after `created_at`
    pub fn new(
        id: FeedId,
        owner_id: FeedId,
        title: String,
        media_url: String,
        media_kind: MediaKind,
        created_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            id,
            owner_id,
            title,
            description: None,
            media_url,
            media_kind,
            text_color: None,
            is_text_only: false,
            price: None,
            location: None,
            category: None,
            contact_phone: None,
            created_at,
            expires_at: created_at + ttl,
            view_count: 0,
            contact_count: 0,
            reaction_count: 0,
            comment_count: 0,
        }
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set commerce fields
    #[must_use]
    pub fn with_price(mut self, price: i64) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the location
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the category
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the seller's contact phone number
    #[must_use]
    pub fn with_contact_phone(mut self, phone: impl Into<String>) -> Self {
        self.contact_phone = Some(phone.into());
        self
    }

    /// Mark as a caption-only post rendered over a solid color
    #[must_use]
    pub fn as_text_only(mut self, text_color: impl Into<String>) -> Self {
        self.is_text_only = true;
        self.text_color = Some(text_color.into());
        self
    }

    /// Check if the item is still active at `now`
    #[inline]
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    /// Check if the item has expired at `now`
    #[inline]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Remaining lifetime at `now`
    pub fn time_remaining(&self, now: DateTime<Utc>) -> TimeRemaining {
        TimeRemaining::until(self.expires_at, now)
    }

    /// Check if the item carries motion media
    #[inline]
    pub fn is_motion(&self) -> bool {
        self.media_kind == MediaKind::Motion
    }
}
