//! Feed events - emitted when engine state changes
//!
//! These events are used for:
//! - Driving UI callbacks (progress indicator, optimistic count updates)
//! - Controlling media playback on focus transitions
//! - Showing the transient double-tap acknowledgment

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::EngagementKind;
use crate::value_objects::FeedId;

/// All events the engine publishes to its subscribers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedEvent {
    /// A new item became dominant in the viewport
    FocusChanged(FocusChangedEvent),
    /// An engagement write succeeded against the backend
    EngagementRecorded(EngagementRecordedEvent),
    /// Motion media for the focused item should start playing
    PlaybackStarted(PlaybackEvent),
    /// Motion media for the item losing focus should pause
    PlaybackPaused(PlaybackEvent),
    /// Transient double-tap acknowledgment at the tap coordinates
    ReactionFlash(ReactionFlashEvent),
    /// A background refresh merged new items into the feed
    FeedRefreshed(FeedRefreshedEvent),
}

impl FeedEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::FocusChanged(_) => "FOCUS_CHANGED",
            Self::EngagementRecorded(_) => "ENGAGEMENT_RECORDED",
            Self::PlaybackStarted(_) => "PLAYBACK_STARTED",
            Self::PlaybackPaused(_) => "PLAYBACK_PAUSED",
            Self::ReactionFlash(_) => "REACTION_FLASH",
            Self::FeedRefreshed(_) => "FEED_REFRESHED",
        }
    }

    /// Get the timestamp of the event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::FocusChanged(e) => e.at,
            Self::EngagementRecorded(e) => e.at,
            Self::PlaybackStarted(e) | Self::PlaybackPaused(e) => e.at,
            Self::ReactionFlash(e) => e.at,
            Self::FeedRefreshed(e) => e.at,
        }
    }
}

/// Focus moved to a new item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusChangedEvent {
    /// Index into the authentic list
    pub index: usize,
    pub item_id: FeedId,
    pub at: DateTime<Utc>,
}

/// An engagement write was recorded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementRecordedEvent {
    pub kind: EngagementKind,
    pub item_id: FeedId,
    pub at: DateTime<Utc>,
}

/// Playback control for motion media
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackEvent {
    pub item_id: FeedId,
    pub at: DateTime<Utc>,
}

/// Transient acknowledgment shown at the double-tap position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionFlashEvent {
    pub item_id: FeedId,
    /// Tap coordinates in the item surface's own space
    pub x: f32,
    pub y: f32,
    pub at: DateTime<Utc>,
}

/// New items were prepended by a background refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedRefreshedEvent {
    pub prepended: usize,
    pub total: usize,
    pub at: DateTime<Utc>,
}
