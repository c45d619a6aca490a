//! Engagement tracker
//!
//! The single writer of the feed's engagement counters. View and contact
//! events are append-only inserts; reactions are idempotent upserts keyed by
//! (item, viewer, kind); comment deletion is authorized against the author
//! id at the write boundary.
//!
//! Local counters bump optimistically before the backend write; the
//! `EngagementRecorded` event fires only after a successful write.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashSet;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use feed_common::config::ViewPolicy;
use feed_core::entities::{
    Comment, ContactEvent, EngagementKind, Reaction, ReactionKind, ViewEvent,
};
use feed_core::error::DomainError;
use feed_core::events::{EngagementRecordedEvent, FeedEvent};
use feed_core::value_objects::FeedId;

use crate::dto::{EngagementCounts, NewComment};

use super::context::EngineContext;
use super::error::{EngineError, EngineResult};

/// Engagement tracker
#[derive(Clone)]
pub struct EngagementTracker {
    ctx: EngineContext,
    /// Items this session has already counted a view for (once-per-session policy)
    seen_views: Arc<DashSet<FeedId>>,
}

impl EngagementTracker {
    /// Create a new EngagementTracker
    pub fn new(ctx: EngineContext) -> Self {
        Self {
            ctx,
            seen_views: Arc::new(DashSet::new()),
        }
    }

    /// Current counters for an item
    pub fn counts(&self, item_id: FeedId) -> Option<EngagementCounts> {
        self.ctx
            .store()
            .item_by_id(item_id)
            .map(|item| EngagementCounts::of(&item))
    }

    /// Record a view for an item
    ///
    /// Insert-only; repeat views across focus gains are expected under the
    /// default policy. Returns false when nothing was recorded (anonymous
    /// viewer, or deduped by the once-per-session policy).
    #[instrument(skip(self))]
    pub async fn record_view(&self, item_id: FeedId, now: DateTime<Utc>) -> EngineResult<bool> {
        let Some(viewer_id) = self.ctx.identity().current_viewer() else {
            debug!(item_id = %item_id, "Anonymous viewer, view not recorded");
            return Ok(false);
        };

        if self.ctx.engagement_config().view_policy == ViewPolicy::OncePerSession
            && !self.seen_views.insert(item_id)
        {
            debug!(item_id = %item_id, "View already counted this session");
            return Ok(false);
        }

        self.ctx
            .store()
            .apply_counter_delta(item_id, EngagementKind::View, 1);

        let event = ViewEvent::new(item_id, viewer_id, now);
        self.ctx.engagement().insert_view(&event).await?;

        self.publish_recorded(EngagementKind::View, item_id, now);
        Ok(true)
    }

    /// Record a contact event for an item
    ///
    /// Best-effort telemetry: the caller opens the external channel whether
    /// or not this write succeeds.
    #[instrument(skip(self))]
    pub async fn record_contact(
        &self,
        item_id: FeedId,
        method: feed_core::entities::ContactMethod,
        now: DateTime<Utc>,
    ) -> EngineResult<()> {
        let Some(viewer_id) = self.ctx.identity().current_viewer() else {
            debug!(item_id = %item_id, "Anonymous viewer, contact not recorded");
            return Ok(());
        };

        self.ctx
            .store()
            .apply_counter_delta(item_id, EngagementKind::Contact, 1);

        let event = ContactEvent::new(item_id, viewer_id, method, now);
        self.ctx.engagement().insert_contact(&event).await?;

        self.publish_recorded(EngagementKind::Contact, item_id, now);
        Ok(())
    }

    /// Set a reaction; re-asserting the same reaction is a no-op
    #[instrument(skip(self))]
    pub async fn set_reaction(
        &self,
        item_id: FeedId,
        kind: ReactionKind,
        now: DateTime<Utc>,
    ) -> EngineResult<()> {
        let viewer_id = self.require_viewer()?;

        if self
            .ctx
            .engagement()
            .find_reaction(item_id, viewer_id, kind)
            .await?
            .is_some()
        {
            // Already reacted with this kind, no-op
            return Ok(());
        }

        self.ctx
            .store()
            .apply_counter_delta(item_id, EngagementKind::Reaction, 1);

        let reaction = Reaction::new(item_id, viewer_id, kind, now);
        self.ctx.engagement().upsert_reaction(&reaction).await?;

        info!(item_id = %item_id, kind = %kind, "Reaction set");
        self.publish_recorded(EngagementKind::Reaction, item_id, now);
        Ok(())
    }

    /// Clear a reaction; clearing one that is not set is a no-op
    #[instrument(skip(self))]
    pub async fn clear_reaction(
        &self,
        item_id: FeedId,
        kind: ReactionKind,
        now: DateTime<Utc>,
    ) -> EngineResult<()> {
        let viewer_id = self.require_viewer()?;

        if self
            .ctx
            .engagement()
            .find_reaction(item_id, viewer_id, kind)
            .await?
            .is_none()
        {
            return Ok(());
        }

        self.ctx
            .engagement()
            .delete_reaction(item_id, viewer_id, kind)
            .await?;
        self.ctx
            .store()
            .apply_counter_delta(item_id, EngagementKind::Reaction, -1);

        info!(item_id = %item_id, kind = %kind, "Reaction cleared");
        Ok(())
    }

    /// Add a comment to an item
    #[instrument(skip(self, payload))]
    pub async fn add_comment(
        &self,
        item_id: FeedId,
        payload: NewComment,
        now: DateTime<Utc>,
    ) -> EngineResult<Comment> {
        let viewer_id = self.require_viewer()?;

        payload
            .validate()
            .map_err(|e| EngineError::validation(e.to_string()))?;
        if payload.text.trim().is_empty() {
            return Err(DomainError::EmptyComment.into());
        }

        let comment = Comment::new(
            FeedId::generate(),
            item_id,
            viewer_id,
            payload.author_name,
            payload.text,
            now,
        );

        self.ctx
            .store()
            .apply_counter_delta(item_id, EngagementKind::Comment, 1);
        self.ctx.engagement().insert_comment(&comment).await?;

        info!(item_id = %item_id, comment_id = %comment.id, "Comment added");
        self.publish_recorded(EngagementKind::Comment, item_id, now);
        Ok(comment)
    }

    /// Delete a comment; only its author may do so
    ///
    /// Any other requester is rejected with a denied error, not silently
    /// ignored.
    #[instrument(skip(self))]
    pub async fn delete_comment(&self, comment_id: FeedId) -> EngineResult<()> {
        let viewer_id = self.require_viewer()?;

        let comment = self
            .ctx
            .engagement()
            .find_comment(comment_id)
            .await?
            .ok_or(DomainError::CommentNotFound(comment_id))?;

        if !comment.is_author(viewer_id) {
            warn!(comment_id = %comment_id, "Comment delete rejected: not the author");
            return Err(DomainError::NotCommentAuthor.into());
        }

        self.ctx.engagement().delete_comment(comment_id).await?;
        self.ctx
            .store()
            .apply_counter_delta(comment.item_id, EngagementKind::Comment, -1);

        info!(comment_id = %comment_id, "Comment deleted");
        Ok(())
    }

    /// Comments for an item, oldest first
    #[instrument(skip(self))]
    pub async fn comments(&self, item_id: FeedId) -> EngineResult<Vec<Comment>> {
        Ok(self.ctx.engagement().list_comments(item_id).await?)
    }

    fn require_viewer(&self) -> EngineResult<FeedId> {
        self.ctx
            .identity()
            .current_viewer()
            .ok_or_else(|| DomainError::AnonymousViewer.into())
    }

    fn publish_recorded(&self, kind: EngagementKind, item_id: FeedId, at: DateTime<Utc>) {
        self.ctx
            .events()
            .publish(FeedEvent::EngagementRecorded(EngagementRecordedEvent {
                kind,
                item_id,
                at,
            }));
    }
}
