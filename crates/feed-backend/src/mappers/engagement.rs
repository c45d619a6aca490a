//! Engagement entity <-> record mappers

use feed_core::entities::{Comment, ContactEvent, Reaction, ViewEvent};
use feed_core::error::DomainError;
use feed_core::value_objects::FeedId;

use crate::models::{CommentRecord, EngagementEventRecord, ReactionRecord};

/// Convert ViewEvent to an appended event record
impl From<&ViewEvent> for EngagementEventRecord {
    fn from(event: &ViewEvent) -> Self {
        EngagementEventRecord {
            kind: "view".to_string(),
            item_id: event.item_id.into_inner(),
            viewer_id: event.viewer_id.into_inner(),
            method: None,
            occurred_at: event.occurred_at,
        }
    }
}

/// Convert ContactEvent to an appended event record
impl From<&ContactEvent> for EngagementEventRecord {
    fn from(event: &ContactEvent) -> Self {
        EngagementEventRecord {
            kind: "contact".to_string(),
            item_id: event.item_id.into_inner(),
            viewer_id: event.viewer_id.into_inner(),
            method: Some(event.method.to_string()),
            occurred_at: event.occurred_at,
        }
    }
}

/// Convert Reaction entity reference to a wire record
impl From<&Reaction> for ReactionRecord {
    fn from(reaction: &Reaction) -> Self {
        ReactionRecord {
            item_id: reaction.item_id.into_inner(),
            viewer_id: reaction.viewer_id.into_inner(),
            kind: reaction.kind.to_string(),
            created_at: reaction.created_at,
        }
    }
}

/// Convert ReactionRecord to Reaction entity
impl TryFrom<ReactionRecord> for Reaction {
    type Error = DomainError;

    fn try_from(record: ReactionRecord) -> Result<Self, Self::Error> {
        let kind = record.kind.parse().map_err(DomainError::ValidationError)?;
        Ok(Reaction {
            item_id: FeedId::from_uuid(record.item_id),
            viewer_id: FeedId::from_uuid(record.viewer_id),
            kind,
            created_at: record.created_at,
        })
    }
}

/// Convert Comment entity reference to a wire record
impl From<&Comment> for CommentRecord {
    fn from(comment: &Comment) -> Self {
        CommentRecord {
            id: comment.id.into_inner(),
            item_id: comment.item_id.into_inner(),
            author_id: comment.author_id.into_inner(),
            author_name: comment.author_name.clone(),
            text: comment.text.clone(),
            created_at: comment.created_at,
        }
    }
}

/// Convert CommentRecord to Comment entity
impl From<CommentRecord> for Comment {
    fn from(record: CommentRecord) -> Self {
        Comment {
            id: FeedId::from_uuid(record.id),
            item_id: FeedId::from_uuid(record.item_id),
            author_id: FeedId::from_uuid(record.author_id),
            author_name: record.author_name,
            text: record.text,
            created_at: record.created_at,
        }
    }
}
