//! Input payloads accepted by the engine

use serde::Deserialize;
use validator::Validate;

use feed_core::entities::MAX_COMMENT_LEN;

/// Payload for posting a comment
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewComment {
    #[validate(length(min = 1, max = 500, message = "comment must be 1-500 characters"))]
    pub text: String,

    #[validate(length(min = 1, max = 64, message = "author name must be 1-64 characters"))]
    pub author_name: String,
}

impl NewComment {
    /// Create a new comment payload
    pub fn new(text: impl Into<String>, author_name: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author_name: author_name.into(),
        }
    }
}

// The validator length bound must match the domain constant.
const _: () = assert!(MAX_COMMENT_LEN == 500);
