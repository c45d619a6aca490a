//! Feed engine integration tests
//!
//! Drive the engine end to end over the in-memory backend: load/refresh
//! semantics, loop scrolling, focus tracking, gesture disambiguation, and
//! engagement flows. All expiry math runs on injected instants.

use std::sync::Arc;
use std::time::{Duration as StdDuration, Instant};

use chrono::{Duration, Utc};

use feed_backend::MemoryBackend;
use feed_common::config::{EngagementConfig, ViewPolicy};
use feed_core::entities::{ContactMethod, ReactionKind};
use feed_core::traits::FeedItemSource;
use feed_core::value_objects::FeedId;
use feed_engine::{
    EngagementTracker, EngineContext, FeedEngine, FeedSynchronizer, ScrollTransition, TapInput,
    TapPoint, TapResolution,
};
use integration_tests::{
    base_time, dominant_at, drain_tasks, image_item, motion_item, three_items, FailingEngagement,
    FailingSource, FlakySource, RecordingChannel, TestHarness, TestIdentity,
};
use feed_engine::dto::NewComment;

// ============================================================================
// Load & Refresh
// ============================================================================

#[tokio::test]
async fn test_initial_load_populates_feed_newest_first() {
    let t = base_time();
    let harness = TestHarness::signed_in(FeedId::generate());
    let items = three_items(t);
    let newest_id = items[0].id;
    harness.seed(items);

    let mut engine = harness.engine();
    let count = engine.start(t).await.unwrap();
    assert_eq!(count, 3);

    let snapshot = engine.snapshot(t);
    assert_eq!(snapshot.len(), 3);
    assert_eq!(snapshot.items[0].id, newest_id);
}

#[tokio::test]
async fn test_empty_feed_is_not_a_failure() {
    let t = base_time();
    let harness = TestHarness::signed_in(FeedId::generate());

    let mut engine = harness.engine();
    let count = engine.start(t).await.unwrap();
    assert_eq!(count, 0);
    assert!(engine.snapshot(t).is_empty());
}

#[tokio::test]
async fn test_initial_load_failure_is_retryable() {
    let t = base_time();
    let backend = Arc::new(MemoryBackend::new());
    let ctx = EngineContext::builder()
        .items(Arc::new(FailingSource))
        .engagement(backend)
        .identity(TestIdentity::anonymous())
        .contact_channel(RecordingChannel::new())
        .build()
        .unwrap();

    let mut engine = FeedEngine::new(ctx);
    let err = engine.start(t).await.unwrap_err();
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_background_refresh_prepends_only_new_items() {
    let t = base_time();
    let harness = TestHarness::signed_in(FeedId::generate());
    harness.seed(three_items(t));

    let sync = FeedSynchronizer::new(harness.ctx.clone());
    sync.initial_load(t).await.unwrap();
    let before = harness.ctx.store().ids();

    let fresh = image_item(t + Duration::minutes(5));
    let fresh_id = fresh.id;
    harness.backend.insert_item(fresh);

    let prepended = sync.background_refresh(t + Duration::minutes(6)).await.unwrap();
    assert_eq!(prepended, 1);

    // Monotonic merge: held set only grows, new item lands at the front.
    let after = harness.ctx.store().ids();
    assert!(before.is_subset(&after));
    assert_eq!(harness.ctx.store().len(), 4);
    assert_eq!(harness.ctx.store().item_at(0).unwrap().id, fresh_id);

    // A second refresh with nothing new is a no-op.
    let prepended = sync.background_refresh(t + Duration::minutes(7)).await.unwrap();
    assert_eq!(prepended, 0);
}

#[tokio::test]
async fn test_refresh_failure_keeps_last_known_good_list() {
    let t = base_time();
    let backend = Arc::new(MemoryBackend::new());
    for item in three_items(t) {
        backend.insert_item(item);
    }

    let ctx = EngineContext::builder()
        .items(FlakySource::new(backend.clone()))
        .engagement(backend)
        .identity(TestIdentity::anonymous())
        .contact_channel(RecordingChannel::new())
        .build()
        .unwrap();

    let sync = FeedSynchronizer::new(ctx.clone());
    sync.initial_load(t).await.unwrap();
    assert_eq!(ctx.store().len(), 3);

    let err = sync.background_refresh(t + Duration::seconds(10)).await.unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(ctx.store().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_refresh_timer_merges_new_items() {
    let now = Utc::now();
    let harness = TestHarness::signed_in(FeedId::generate());
    harness.seed(vec![image_item(now - Duration::minutes(1))]);

    let mut engine = harness.engine();
    engine.start(now).await.unwrap();
    assert_eq!(engine.snapshot(now).len(), 1);

    harness.backend.insert_item(image_item(now));

    // One refresh interval (10s) passes; the timer merges the new item.
    tokio::time::sleep(StdDuration::from_secs(11)).await;
    drain_tasks().await;

    assert_eq!(engine.snapshot(Utc::now()).len(), 2);

    engine.shutdown();
}

#[tokio::test]
async fn test_refresh_preserves_viewer_position() {
    let t = base_time();
    let harness = TestHarness::signed_in(FeedId::generate());
    let items = three_items(t);
    let item_b = items[1].id;
    harness.seed(items);

    let mut engine = harness.engine();
    engine.start(t).await.unwrap();

    // Viewer settles on the middle copy of item B (rendered 4, actual 1).
    assert_eq!(engine.handle_scroll(4), ScrollTransition::Stay);
    assert_eq!(engine.scroll().actual_index(), Some(1));

    harness.backend.insert_item(image_item(t + Duration::minutes(5)));
    let sync = FeedSynchronizer::new(harness.ctx.clone());
    sync.background_refresh(t + Duration::minutes(6)).await.unwrap();

    // Reconciling after the prepend keeps the viewer on item B.
    engine.reconcile();
    assert_eq!(engine.scroll().actual_index(), Some(2));
    assert_eq!(harness.ctx.store().item_at(2).unwrap().id, item_b);

    engine.shutdown();
}

// ============================================================================
// Loop Scrolling
// ============================================================================

#[tokio::test]
async fn test_tail_copy_jumps_to_middle_without_animation() {
    let t = base_time();
    let harness = TestHarness::signed_in(FeedId::generate());
    harness.seed(three_items(t));

    let mut engine = harness.engine();
    engine.start(t).await.unwrap();

    // [A,B,C] renders as [A,B,C,A,B,C,A,B,C]; rendered 8 is the tail copy
    // of C and must jump to its middle twin at rendered 5.
    assert_eq!(engine.scroll().rendered_len(), 9);
    assert_eq!(engine.handle_scroll(8), ScrollTransition::Jump { to: 5 });
    assert_eq!(engine.scroll().actual_index(), Some(2));

    engine.shutdown();
}

#[tokio::test]
async fn test_single_item_feed_never_jumps() {
    let t = base_time();
    let harness = TestHarness::signed_in(FeedId::generate());
    harness.seed(vec![image_item(t)]);

    let mut engine = harness.engine();
    engine.start(t).await.unwrap();

    assert!(!engine.scroll().is_loop_enabled());
    assert_eq!(engine.handle_scroll(0), ScrollTransition::Stay);
    assert_eq!(engine.handle_scroll(2), ScrollTransition::Stay);

    engine.shutdown();
}

// ============================================================================
// Viewport Focus & View Tracking
// ============================================================================

#[tokio::test]
async fn test_focus_gain_fires_exactly_one_view() {
    let t = base_time();
    let harness = TestHarness::signed_in(FeedId::generate());
    let items = three_items(t);
    let item_a = items[0].id;
    harness.seed(items);

    let mut engine = harness.engine();
    engine.start(t).await.unwrap();

    // Focus the middle copy of A.
    let focus = engine.handle_visibility(&dominant_at(3), t).unwrap();
    assert_eq!(focus.current_item_id, item_a);
    drain_tasks().await;
    assert_eq!(harness.backend.view_count_for(item_a), 1);

    // Sustained focus across frames never double-counts.
    for _ in 0..5 {
        engine.handle_visibility(&dominant_at(3), t);
    }
    drain_tasks().await;
    assert_eq!(harness.backend.view_count_for(item_a), 1);

    // A round trip away and back counts once more.
    engine.handle_visibility(&dominant_at(4), t);
    engine.handle_visibility(&dominant_at(3), t);
    drain_tasks().await;
    assert_eq!(harness.backend.view_count_for(item_a), 2);

    engine.shutdown();
}

#[tokio::test]
async fn test_motion_media_autoplays_on_focus() {
    let t = base_time();
    let harness = TestHarness::signed_in(FeedId::generate());
    let clip = motion_item(t);
    let clip_id = clip.id;
    harness.seed(vec![clip, image_item(t - Duration::minutes(1))]);

    let mut engine = harness.engine();
    engine.start(t).await.unwrap();
    let mut events = engine.events();

    // Clip is newest, so actual 0; rendered 2 is its middle copy.
    engine.handle_visibility(&dominant_at(2), t);

    let mut types = Vec::new();
    while let Ok(event) = events.try_recv() {
        types.push(event.event_type());
    }
    assert!(types.contains(&"FOCUS_CHANGED"));
    assert!(types.contains(&"PLAYBACK_STARTED"));

    // Focus moves on: the clip pauses.
    engine.handle_visibility(&dominant_at(3), t);
    let mut paused = false;
    while let Ok(event) = events.try_recv() {
        if event.event_type() == "PLAYBACK_PAUSED" {
            paused = true;
        }
    }
    assert!(paused);

    let _ = clip_id;
    engine.shutdown();
}

#[tokio::test]
async fn test_view_tracking_failure_never_blocks() {
    let t = base_time();
    let backend = Arc::new(MemoryBackend::new());
    for item in three_items(t) {
        backend.insert_item(item);
    }

    let ctx = EngineContext::builder()
        .items(backend)
        .engagement(Arc::new(FailingEngagement))
        .identity(TestIdentity::signed_in(FeedId::generate()))
        .contact_channel(RecordingChannel::new())
        .build()
        .unwrap();

    let mut engine = FeedEngine::new(ctx);
    engine.start(t).await.unwrap();

    // The write fails inside the spawned task; scrolling keeps working.
    engine.handle_visibility(&dominant_at(3), t);
    drain_tasks().await;
    assert_eq!(engine.handle_scroll(8), ScrollTransition::Jump { to: 5 });

    engine.shutdown();
}

// ============================================================================
// Gestures
// ============================================================================

#[tokio::test]
async fn test_double_tap_fires_one_quick_reaction() {
    let t = base_time();
    let harness = TestHarness::signed_in(FeedId::generate());
    let items = three_items(t);
    let item_a = items[0].id;
    harness.seed(items);

    let mut engine = harness.engine();
    engine.start(t).await.unwrap();
    engine.handle_visibility(&dominant_at(3), t);

    let base = Instant::now();
    let point = TapPoint::new(160.0, 420.0);

    assert!(engine.handle_tap(TapInput::surface(base, point), t).is_none());
    let resolution = engine
        .handle_tap(TapInput::surface(base + StdDuration::from_millis(200), point), t)
        .unwrap();
    assert_eq!(resolution, TapResolution::QuickReaction { item_id: item_a });

    // The suppressed single tap never commits.
    assert!(engine.poll_gesture(base + StdDuration::from_secs(5)).is_none());

    drain_tasks().await;
    assert_eq!(harness.backend.reaction_count_for(item_a), 1);

    // A second double tap re-asserts the same reaction: still one row.
    let base2 = base + StdDuration::from_secs(10);
    engine.handle_tap(TapInput::surface(base2, point), t);
    engine.handle_tap(TapInput::surface(base2 + StdDuration::from_millis(150), point), t);
    drain_tasks().await;
    assert_eq!(harness.backend.reaction_count_for(item_a), 1);

    engine.shutdown();
}

#[tokio::test]
async fn test_reaction_flash_self_clears() {
    let t = base_time();
    let harness = TestHarness::signed_in(FeedId::generate());
    harness.seed(three_items(t));

    let mut engine = harness.engine();
    engine.start(t).await.unwrap();
    engine.handle_visibility(&dominant_at(3), t);

    let base = Instant::now();
    let point = TapPoint::new(80.0, 120.0);
    engine.handle_tap(TapInput::surface(base, point), t);
    engine.handle_tap(TapInput::surface(base + StdDuration::from_millis(100), point), t);

    // Visible inside the flash window, gone after ~1s.
    assert!(engine.active_flash(base + StdDuration::from_millis(600)).is_some());
    assert!(engine.active_flash(base + StdDuration::from_millis(1200)).is_none());

    engine.shutdown();
}

#[tokio::test]
async fn test_single_tap_commits_to_detail_after_settle() {
    let t = base_time();
    let harness = TestHarness::signed_in(FeedId::generate());
    let items = three_items(t);
    let item_a = items[0].id;
    harness.seed(items);

    let mut engine = harness.engine();
    engine.start(t).await.unwrap();
    engine.handle_visibility(&dominant_at(3), t);

    let base = Instant::now();
    assert!(engine
        .handle_tap(TapInput::surface(base, TapPoint::new(0.0, 0.0)), t)
        .is_none());

    // Window (500ms) still open, then settle (300ms) still pending.
    assert!(engine.poll_gesture(base + StdDuration::from_millis(780)).is_none());

    // Past window + settle: exactly one detail-open, zero reactions.
    let resolution = engine.poll_gesture(base + StdDuration::from_millis(810)).unwrap();
    assert_eq!(resolution, TapResolution::OpenDetail { item_id: item_a });
    assert!(engine.poll_gesture(base + StdDuration::from_millis(900)).is_none());

    drain_tasks().await;
    assert_eq!(harness.backend.reaction_count_for(item_a), 0);

    engine.shutdown();
}

#[tokio::test]
async fn test_control_taps_bypass_disambiguation() {
    let t = base_time();
    let harness = TestHarness::signed_in(FeedId::generate());
    harness.seed(three_items(t));

    let mut engine = harness.engine();
    engine.start(t).await.unwrap();
    engine.handle_visibility(&dominant_at(3), t);

    let base = Instant::now();
    let resolution = engine
        .handle_tap(TapInput::control(base, TapPoint::new(10.0, 10.0)), t)
        .unwrap();
    assert_eq!(resolution, TapResolution::ControlActivated);
    assert!(engine.pending_tap_deadline().is_none());

    engine.shutdown();
}

// ============================================================================
// Engagement
// ============================================================================

#[tokio::test]
async fn test_reaction_upsert_and_clear() {
    let t = base_time();
    let viewer = FeedId::generate();
    let harness = TestHarness::signed_in(viewer);
    let items = three_items(t);
    let item_a = items[0].id;
    harness.seed(items);

    let sync = FeedSynchronizer::new(harness.ctx.clone());
    sync.initial_load(t).await.unwrap();

    let tracker = EngagementTracker::new(harness.ctx.clone());

    // Reacting twice leaves exactly one row.
    tracker.set_reaction(item_a, ReactionKind::Love, t).await.unwrap();
    tracker.set_reaction(item_a, ReactionKind::Love, t).await.unwrap();
    assert_eq!(harness.backend.reaction_count_for(item_a), 1);
    assert_eq!(tracker.counts(item_a).unwrap().reactions, 1);

    // Clearing removes the row; clearing again is a no-op.
    tracker.clear_reaction(item_a, ReactionKind::Love, t).await.unwrap();
    tracker.clear_reaction(item_a, ReactionKind::Love, t).await.unwrap();
    assert_eq!(harness.backend.reaction_count_for(item_a), 0);
    assert_eq!(tracker.counts(item_a).unwrap().reactions, 0);
}

#[tokio::test]
async fn test_comment_delete_requires_author() {
    let t = base_time();
    let author = FeedId::generate();
    let intruder = FeedId::generate();
    let harness = TestHarness::signed_in(author);
    let items = three_items(t);
    let item_a = items[0].id;
    harness.seed(items);

    let sync = FeedSynchronizer::new(harness.ctx.clone());
    sync.initial_load(t).await.unwrap();

    let tracker = EngagementTracker::new(harness.ctx.clone());
    let comment = tracker
        .add_comment(item_a, NewComment::new("Still available?", "jamie"), t)
        .await
        .unwrap();
    assert_eq!(tracker.counts(item_a).unwrap().comments, 1);

    // A different viewer's delete attempt is rejected, not ignored.
    harness.identity.switch_to(Some(intruder));
    let err = tracker.delete_comment(comment.id).await.unwrap_err();
    assert!(err.is_denied());
    assert_eq!(harness.backend.comment_count_for(item_a), 1);

    // The author may delete; the count reflects the removal.
    harness.identity.switch_to(Some(author));
    tracker.delete_comment(comment.id).await.unwrap();
    assert_eq!(harness.backend.comment_count_for(item_a), 0);
    assert_eq!(tracker.counts(item_a).unwrap().comments, 0);
}

#[tokio::test]
async fn test_anonymous_viewer_cannot_react_or_comment() {
    let t = base_time();
    let harness = TestHarness::anonymous();
    let items = three_items(t);
    let item_a = items[0].id;
    harness.seed(items);

    let sync = FeedSynchronizer::new(harness.ctx.clone());
    sync.initial_load(t).await.unwrap();

    let tracker = EngagementTracker::new(harness.ctx.clone());
    assert!(tracker
        .set_reaction(item_a, ReactionKind::Love, t)
        .await
        .unwrap_err()
        .is_denied());
    assert!(tracker
        .add_comment(item_a, NewComment::new("hi", "anon"), t)
        .await
        .unwrap_err()
        .is_denied());

    // Views simply go unrecorded for anonymous browsing.
    assert!(!tracker.record_view(item_a, t).await.unwrap());
    assert_eq!(harness.backend.view_count_for(item_a), 0);
}

#[tokio::test]
async fn test_view_policy_once_per_session() {
    let t = base_time();
    let backend = Arc::new(MemoryBackend::new());
    let items = three_items(t);
    let item_a = items[0].id;
    for item in items {
        backend.insert_item(item);
    }

    let ctx = EngineContext::builder()
        .items(backend.clone())
        .engagement(backend.clone())
        .identity(TestIdentity::signed_in(FeedId::generate()))
        .contact_channel(RecordingChannel::new())
        .engagement_config(EngagementConfig {
            view_policy: ViewPolicy::OncePerSession,
        })
        .build()
        .unwrap();

    let sync = FeedSynchronizer::new(ctx.clone());
    sync.initial_load(t).await.unwrap();

    let tracker = EngagementTracker::new(ctx);
    assert!(tracker.record_view(item_a, t).await.unwrap());
    assert!(!tracker.record_view(item_a, t).await.unwrap());
    assert_eq!(backend.view_count_for(item_a), 1);
}

// ============================================================================
// Contact
// ============================================================================

#[tokio::test]
async fn test_contact_composes_link_and_records_event() {
    let t = base_time();
    let harness = TestHarness::signed_in(FeedId::generate());
    let items = three_items(t);
    let item_a = items[0].id;
    harness.seed(items);

    let mut engine = harness.engine();
    engine.start(t).await.unwrap();

    let link = engine
        .contact()
        .contact_seller(item_a, ContactMethod::Sms, t)
        .await
        .unwrap();

    // Phone normalized to digits, message attached, channel opened.
    assert!(link.starts_with("sms:15550102233?body="));
    assert_eq!(harness.channel.opened(), vec![link]);
    assert_eq!(harness.backend.contact_count_for(item_a), 1);
    assert_eq!(engine.tracker().counts(item_a).unwrap().contacts, 1);

    engine.shutdown();
}

#[tokio::test]
async fn test_contact_opens_channel_even_when_write_fails() {
    let t = base_time();
    let backend = Arc::new(MemoryBackend::new());
    let items = three_items(t);
    let item_a = items[0].id;
    for item in items {
        backend.insert_item(item);
    }
    let channel = RecordingChannel::new();

    let ctx = EngineContext::builder()
        .items(backend)
        .engagement(Arc::new(FailingEngagement))
        .identity(TestIdentity::signed_in(FeedId::generate()))
        .contact_channel(channel.clone())
        .build()
        .unwrap();

    let mut engine = FeedEngine::new(ctx);
    engine.start(t).await.unwrap();

    // Telemetry write fails, but the buyer still reaches the seller.
    let link = engine
        .contact()
        .contact_seller(item_a, ContactMethod::WhatsApp, t)
        .await
        .unwrap();
    assert!(link.starts_with("https://wa.me/15550102233?text="));
    assert_eq!(channel.opened().len(), 1);

    engine.shutdown();
}

// ============================================================================
// Expiry
// ============================================================================

#[tokio::test]
async fn test_expired_items_grandfathered_in_session() {
    let t = base_time();
    let harness = TestHarness::signed_in(FeedId::generate());
    let item = image_item(t);
    let item_id = item.id;
    harness.seed(vec![item]);

    let mut engine = harness.engine();
    engine.start(t + Duration::hours(1)).await.unwrap();

    // At 23h59m the item is active with under an hour left.
    let late = t + Duration::hours(23) + Duration::minutes(59);
    let snapshot = engine.snapshot(late);
    assert!(!snapshot.items[0].remaining.is_expired);
    assert_eq!(snapshot.items[0].remaining.hours, 0);

    // Past the TTL the held item stays visible but is flagged expired, and
    // a fresh fetch no longer returns it.
    let past = t + Duration::hours(24) + Duration::seconds(1);
    let snapshot = engine.snapshot(past);
    assert_eq!(snapshot.len(), 1);
    assert!(snapshot.items[0].remaining.is_expired);
    assert_eq!(snapshot.active_items().count(), 0);

    let fetched = harness.backend.fetch_active_items(50, past).await.unwrap();
    assert!(fetched.is_empty());

    let _ = item_id;
    engine.shutdown();
}
