//! Feed engine facade
//!
//! Composes the synchronizer, loop scroll, viewport observer, gesture
//! interpreter, and engagement tracker behind the surface an embedding UI
//! drives: scroll evaluation, visibility reports, taps, and snapshots.

use std::time::Instant;

use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};

use feed_core::entities::{FocusState, ReactionKind};
use feed_core::events::{FeedEvent, FocusChangedEvent, PlaybackEvent, ReactionFlashEvent};
use feed_core::value_objects::FeedId;

use crate::dto::FeedSnapshot;
use crate::services::{
    ContactService, EngagementTracker, EngineContext, EngineResult, FeedSynchronizer,
    GestureInterpreter, GestureOutcome, LoopScroll, ScrollTransition, TapInput, TapPoint,
    ViewportObserver, VisibilityReport,
};

/// Resolved tap, handed back to the embedding UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapResolution {
    /// A child control was activated; the engine did nothing
    ControlActivated,
    /// Double tap: a quick reaction was fired for the focused item
    QuickReaction { item_id: FeedId },
    /// Single tap committed: open this item's detail view
    OpenDetail { item_id: FeedId },
}

/// The ephemeral feed engine
pub struct FeedEngine {
    ctx: EngineContext,
    synchronizer: FeedSynchronizer,
    tracker: EngagementTracker,
    contact: ContactService,
    scroll: LoopScroll,
    viewport: ViewportObserver,
    gesture: GestureInterpreter,
    focus: Option<FocusState>,
    flash: Option<(TapPoint, Instant)>,
    shutdown: watch::Sender<bool>,
    refresh_task: Option<JoinHandle<()>>,
}

impl FeedEngine {
    /// Create an engine over a built context
    pub fn new(ctx: EngineContext) -> Self {
        let synchronizer = FeedSynchronizer::new(ctx.clone());
        let tracker = EngagementTracker::new(ctx.clone());
        let contact = ContactService::new(ctx.clone(), tracker.clone());
        let viewport = ViewportObserver::new(ctx.viewport_config().focus_threshold);
        let gesture = GestureInterpreter::new(ctx.gesture_config().clone());
        let (shutdown, _) = watch::channel(false);

        Self {
            ctx,
            synchronizer,
            tracker,
            contact,
            scroll: LoopScroll::new(0),
            viewport,
            gesture,
            focus: None,
            flash: None,
            shutdown,
            refresh_task: None,
        }
    }

    /// Load the feed and start the background refresh loop
    ///
    /// A failed load is returned as a retryable error; calling `start` again
    /// retries it. Safe to call again after a failure or a shutdown.
    #[instrument(skip(self))]
    pub async fn start(&mut self, now: DateTime<Utc>) -> EngineResult<usize> {
        let count = self.synchronizer.initial_load(now).await?;
        self.scroll = LoopScroll::new(count);
        self.viewport.reset();

        if let Some(task) = self.refresh_task.take() {
            task.abort();
        }
        let _ = self.shutdown.send(false);
        self.refresh_task = Some(self.synchronizer.spawn(self.shutdown.subscribe()));

        Ok(count)
    }

    /// The normalized item list as of `now`
    pub fn snapshot(&self, now: DateTime<Utc>) -> FeedSnapshot {
        FeedSnapshot::new(&self.ctx.store().items(), now)
    }

    /// Engagement tracker handle (counts, reactions, comments)
    pub fn tracker(&self) -> &EngagementTracker {
        &self.tracker
    }

    /// Contact service handle
    pub fn contact(&self) -> &ContactService {
        &self.contact
    }

    /// Subscribe to engine events
    pub fn events(&self) -> broadcast::Receiver<FeedEvent> {
        self.ctx.events().subscribe()
    }

    /// Current scroll state
    pub fn scroll(&self) -> &LoopScroll {
        &self.scroll
    }

    /// Currently focused item, if any
    pub fn focus(&self) -> Option<FocusState> {
        self.focus
    }

    /// Pick up list growth after a refresh and return the rendered index the
    /// UI should be positioned at
    ///
    /// Call on `FeedRefreshed`; the viewer's current item keeps its place.
    pub fn reconcile(&mut self) -> usize {
        self.sync_scroll_len();
        self.scroll.rendered_index()
    }

    /// Evaluate a scroll position against the tripled sequence
    ///
    /// Picks up list growth from background refreshes first, so the viewer
    /// stays on the same item, then applies the boundary-jump reducer. A
    /// returned `Jump` must be applied without animation in the same frame.
    pub fn handle_scroll(&mut self, rendered_index: usize) -> ScrollTransition {
        self.sync_scroll_len();
        self.scroll.evaluate(rendered_index)
    }

    /// Fold a batch of visibility reports into focus, playback, and view
    /// tracking side effects
    ///
    /// Fires at most one view-tracking call per focus-gain transition; a
    /// failed call is logged inside the spawned task and never blocks
    /// scrolling.
    pub fn handle_visibility(
        &mut self,
        reports: &[VisibilityReport],
        now: DateTime<Utc>,
    ) -> Option<FocusState> {
        self.sync_scroll_len();
        let shift = self.viewport.observe(reports);
        if shift.is_none() {
            return self.focus;
        }

        if let Some(lost_rendered) = shift.lost {
            if let Some(item) = self.item_at_rendered(lost_rendered) {
                if item.is_motion() {
                    self.ctx.events().publish(FeedEvent::PlaybackPaused(PlaybackEvent {
                        item_id: item.id,
                        at: now,
                    }));
                }
            }
        }

        match shift.gained {
            Some(gained_rendered) => {
                let actual = self.scroll.actual_of(gained_rendered)?;
                let item = self.ctx.store().item_at(actual)?;

                let state = FocusState::new(actual, item.id);
                self.focus = Some(state);

                self.ctx.events().publish(FeedEvent::FocusChanged(FocusChangedEvent {
                    index: actual,
                    item_id: item.id,
                    at: now,
                }));
                if item.is_motion() {
                    self.ctx.events().publish(FeedEvent::PlaybackStarted(PlaybackEvent {
                        item_id: item.id,
                        at: now,
                    }));
                }

                // Best-effort view tracking, off the interaction path.
                let tracker = self.tracker.clone();
                let item_id = item.id;
                tokio::spawn(async move {
                    if let Err(e) = tracker.record_view(item_id, now).await {
                        warn!(item_id = %item_id, error = %e, "View tracking failed");
                    }
                });

                self.focus
            }
            None => {
                self.focus = None;
                None
            }
        }
    }

    /// Feed a tap into the gesture interpreter
    ///
    /// Control taps pass straight through. A double tap fires a quick
    /// reaction on the focused item and shows the transient flash; the
    /// paired single tap is suppressed.
    pub fn handle_tap(&mut self, tap: TapInput, now: DateTime<Utc>) -> Option<TapResolution> {
        match self.gesture.on_tap(tap)? {
            GestureOutcome::ControlActivated => Some(TapResolution::ControlActivated),
            GestureOutcome::QuickReaction(point) => {
                let focus = self.focus?;
                self.flash = Some((point, tap.at));
                self.ctx.events().publish(FeedEvent::ReactionFlash(ReactionFlashEvent {
                    item_id: focus.current_item_id,
                    x: point.x,
                    y: point.y,
                    at: now,
                }));

                let tracker = self.tracker.clone();
                let item_id = focus.current_item_id;
                tokio::spawn(async move {
                    if let Err(e) = tracker.set_reaction(item_id, ReactionKind::Love, now).await {
                        warn!(item_id = %item_id, error = %e, "Quick reaction failed");
                    }
                });

                Some(TapResolution::QuickReaction { item_id })
            }
            GestureOutcome::OpenDetail => {
                let focus = self.focus?;
                Some(TapResolution::OpenDetail {
                    item_id: focus.current_item_id,
                })
            }
        }
    }

    /// Resolve a pending single tap whose settle deadline has passed
    ///
    /// Driven from the host's frame clock or a timer armed at
    /// `pending_tap_deadline`.
    pub fn poll_gesture(&mut self, at: Instant) -> Option<TapResolution> {
        match self.gesture.poll(at)? {
            GestureOutcome::OpenDetail => {
                let focus = self.focus?;
                Some(TapResolution::OpenDetail {
                    item_id: focus.current_item_id,
                })
            }
            _ => None,
        }
    }

    /// Deadline at which a pending single tap commits
    pub fn pending_tap_deadline(&self) -> Option<Instant> {
        self.gesture.pending_deadline()
    }

    /// The transient double-tap acknowledgment, while it is still showing
    ///
    /// Self-clears after the configured flash duration; nothing is persisted.
    pub fn active_flash(&self, at: Instant) -> Option<TapPoint> {
        let (point, shown_at) = self.flash?;
        if at.duration_since(shown_at) < self.ctx.gesture_config().flash_duration() {
            Some(point)
        } else {
            None
        }
    }

    /// Stop the refresh loop, detach the observer, and cancel pending taps
    pub fn shutdown(&mut self) {
        let _ = self.shutdown.send(true);
        if let Some(task) = self.refresh_task.take() {
            task.abort();
        }
        self.viewport.detach();
        self.gesture.cancel();
        self.focus = None;
        info!("Feed engine shut down");
    }

    fn item_at_rendered(&self, rendered_index: usize) -> Option<feed_core::entities::FeedItem> {
        let actual = self.scroll.actual_of(rendered_index)?;
        self.ctx.store().item_at(actual)
    }

    /// Pick up list-length changes from the synchronizer
    ///
    /// Only prepends grow the list mid-session, so the growth delta is the
    /// prepend count; a shrink means the list was replaced and the scroll
    /// starts over at the middle copy.
    fn sync_scroll_len(&mut self) {
        let len = self.ctx.store().len();
        let old = self.scroll.len();
        if len == old {
            return;
        }
        if len > old {
            self.scroll.resize(len, len - old);
        } else {
            self.scroll = LoopScroll::new(len);
            self.viewport.reset();
        }
    }
}

impl Drop for FeedEngine {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
        if let Some(task) = self.refresh_task.take() {
            task.abort();
        }
    }
}
