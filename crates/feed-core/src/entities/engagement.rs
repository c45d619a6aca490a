//! Engagement event entities - append-only facts about viewer activity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::FeedId;

/// How a viewer contacted a seller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
    Sms,
    WhatsApp,
    Call,
}

impl std::fmt::Display for ContactMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sms => write!(f, "sms"),
            Self::WhatsApp => write!(f, "whatsapp"),
            Self::Call => write!(f, "call"),
        }
    }
}

impl std::str::FromStr for ContactMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sms" => Ok(Self::Sms),
            "whatsapp" => Ok(Self::WhatsApp),
            "call" => Ok(Self::Call),
            _ => Err(format!("Invalid contact method: {s}")),
        }
    }
}

/// Category of engagement, used for counter bumps and events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementKind {
    View,
    Contact,
    Reaction,
    Comment,
}

impl std::fmt::Display for EngagementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::View => write!(f, "view"),
            Self::Contact => write!(f, "contact"),
            Self::Reaction => write!(f, "reaction"),
            Self::Comment => write!(f, "comment"),
        }
    }
}

/// View event - inserted once per focus-gain, never updated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewEvent {
    pub item_id: FeedId,
    pub viewer_id: FeedId,
    pub occurred_at: DateTime<Utc>,
}

impl ViewEvent {
    /// Create a new ViewEvent
    pub fn new(item_id: FeedId, viewer_id: FeedId, occurred_at: DateTime<Utc>) -> Self {
        Self {
            item_id,
            viewer_id,
            occurred_at,
        }
    }
}

/// Contact event - inserted when the viewer opens a contact channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEvent {
    pub item_id: FeedId,
    pub viewer_id: FeedId,
    pub method: ContactMethod,
    pub occurred_at: DateTime<Utc>,
}

impl ContactEvent {
    /// Create a new ContactEvent
    pub fn new(
        item_id: FeedId,
        viewer_id: FeedId,
        method: ContactMethod,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            item_id,
            viewer_id,
            method,
            occurred_at,
        }
    }
}
