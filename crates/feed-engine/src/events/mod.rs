//! In-process event bus for engine callbacks
//!
//! Subscribers receive `FeedEvent`s (focus changes, engagement writes,
//! playback commands) over a tokio broadcast channel. Publishing never
//! blocks; events to a channel with no subscribers are dropped.

use tokio::sync::broadcast;

use feed_core::events::FeedEvent;

/// Broadcast capacity; slow subscribers lag rather than block the engine
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Cloneable handle to the engine's event channel
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<FeedEvent>,
}

impl EventBus {
    /// Create a new event bus
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Subscribe to engine events
    pub fn subscribe(&self) -> broadcast::Receiver<FeedEvent> {
        self.sender.subscribe()
    }

    /// Publish an event to all current subscribers
    pub fn publish(&self, event: FeedEvent) {
        let _ = self.sender.send(event);
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
