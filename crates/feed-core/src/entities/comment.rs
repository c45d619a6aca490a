//! Comment entity - a viewer comment on a feed item

use chrono::{DateTime, Utc};

use crate::value_objects::FeedId;

/// Maximum accepted comment length in characters
pub const MAX_COMMENT_LEN: usize = 500;

/// Comment entity
///
/// Mutable only by deletion, and only by its author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: FeedId,
    pub item_id: FeedId,
    pub author_id: FeedId,
    pub author_name: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new Comment
    pub fn new(
        id: FeedId,
        item_id: FeedId,
        author_id: FeedId,
        author_name: String,
        text: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            item_id,
            author_id,
            author_name,
            text,
            created_at,
        }
    }

    /// Check whether `user_id` authored this comment
    #[inline]
    pub fn is_author(&self, user_id: FeedId) -> bool {
        self.author_id == user_id
    }

    /// Check if the comment text is empty after trimming
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
