//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::FeedId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Item not found: {0}")]
    ItemNotFound(FeedId),

    #[error("Comment not found: {0}")]
    CommentNotFound(FeedId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Comment is empty")]
    EmptyComment,

    #[error("Comment too long: max {max} characters")]
    CommentTooLong { max: usize },

    #[error("No contact phone on item: {0}")]
    MissingContactPhone(FeedId),

    #[error("Invalid phone number: {0}")]
    InvalidPhoneNumber(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Viewer is anonymous")]
    AnonymousViewer,

    #[error("Not comment author")]
    NotCommentAuthor,

    #[error("Not item owner")]
    NotItemOwner,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Item has expired: {0}")]
    ItemExpired(FeedId),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Backend error: {0}")]
    BackendError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for surfacing to callers
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::ItemNotFound(_) => "UNKNOWN_ITEM",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::EmptyComment => "EMPTY_COMMENT",
            Self::CommentTooLong { .. } => "COMMENT_TOO_LONG",
            Self::MissingContactPhone(_) => "MISSING_CONTACT_PHONE",
            Self::InvalidPhoneNumber(_) => "INVALID_PHONE_NUMBER",

            // Authorization
            Self::AnonymousViewer => "ANONYMOUS_VIEWER",
            Self::NotCommentAuthor => "NOT_COMMENT_AUTHOR",
            Self::NotItemOwner => "NOT_ITEM_OWNER",

            // Business Rules
            Self::ItemExpired(_) => "ITEM_EXPIRED",

            // Infrastructure
            Self::BackendError(_) => "BACKEND_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ItemNotFound(_) | Self::CommentNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::EmptyComment
                | Self::CommentTooLong { .. }
                | Self::MissingContactPhone(_)
                | Self::InvalidPhoneNumber(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::AnonymousViewer | Self::NotCommentAuthor | Self::NotItemOwner
        )
    }

    /// Check if this is a transient infrastructure error worth retrying
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::BackendError(_))
    }
}
