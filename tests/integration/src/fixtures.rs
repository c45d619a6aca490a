//! Test fixtures and data generators
//!
//! Provides reusable test items with a fixed, injected time base so expiry
//! scenarios never depend on the wall clock.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Duration, TimeZone, Utc};
use feed_core::entities::{FeedItem, MediaKind};
use feed_core::value_objects::FeedId;

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Fixed time base for scenarios
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
}

/// An image item created at `created` with the standard 24h TTL
pub fn image_item(created: DateTime<Utc>) -> FeedItem {
    let suffix = unique_suffix();
    FeedItem::new(
        FeedId::generate(),
        FeedId::generate(),
        format!("Desk lamp {suffix}"),
        format!("https://cdn.example.com/lamp-{suffix}.jpg"),
        MediaKind::Image,
        created,
        Duration::hours(24),
    )
    .with_price(1500)
    .with_location("North Campus")
    .with_contact_phone("+1 (555) 010-2233")
}

/// A motion-media item (autoplays on focus)
pub fn motion_item(created: DateTime<Utc>) -> FeedItem {
    let suffix = unique_suffix();
    FeedItem::new(
        FeedId::generate(),
        FeedId::generate(),
        format!("Skateboard clip {suffix}"),
        format!("https://cdn.example.com/skate-{suffix}.mp4"),
        MediaKind::Motion,
        created,
        Duration::hours(24),
    )
}

/// A caption-only item without media
pub fn text_item(created: DateTime<Utc>) -> FeedItem {
    let suffix = unique_suffix();
    FeedItem::new(
        FeedId::generate(),
        FeedId::generate(),
        format!("Roommate wanted {suffix}"),
        String::new(),
        MediaKind::Image,
        created,
        Duration::hours(24),
    )
    .as_text_only("#2266aa")
}

/// Items A, B, C with descending freshness (A newest)
pub fn three_items(now: DateTime<Utc>) -> Vec<FeedItem> {
    vec![
        image_item(now - Duration::minutes(1)),
        image_item(now - Duration::minutes(2)),
        image_item(now - Duration::minutes(3)),
    ]
}
