//! Reaction entity - a quick reaction on a feed item
//!
//! Unique per (item, viewer, kind); re-asserting the same reaction is an
//! idempotent upsert, unlike the pure-insert view/contact events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::FeedId;

/// Kind of quick reaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Love,
    Want,
    Fire,
}

impl std::fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Love => write!(f, "love"),
            Self::Want => write!(f, "want"),
            Self::Fire => write!(f, "fire"),
        }
    }
}

impl std::str::FromStr for ReactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "love" => Ok(Self::Love),
            "want" => Ok(Self::Want),
            "fire" => Ok(Self::Fire),
            _ => Err(format!("Invalid reaction kind: {s}")),
        }
    }
}

/// Reaction entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub item_id: FeedId,
    pub viewer_id: FeedId,
    pub kind: ReactionKind,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    /// Create a new Reaction
    pub fn new(
        item_id: FeedId,
        viewer_id: FeedId,
        kind: ReactionKind,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            item_id,
            viewer_id,
            kind,
            created_at,
        }
    }

    /// The uniqueness key for this reaction
    #[inline]
    pub fn key(&self) -> (FeedId, FeedId, ReactionKind) {
        (self.item_id, self.viewer_id, self.kind)
    }

    /// Check if this reaction is of a specific kind
    #[inline]
    pub fn is_kind(&self, kind: ReactionKind) -> bool {
        self.kind == kind
    }
}
