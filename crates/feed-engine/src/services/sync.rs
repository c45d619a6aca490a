//! Feed synchronizer
//!
//! Maintains the canonical ordered list of active items. The initial load
//! replaces the list and surfaces failures to the caller; background
//! refreshes prepend unseen items only and swallow failures, so the viewer's
//! last-known-good list stays authoritative. Refreshes are serialized: a
//! tick that fires while a fetch is outstanding is skipped, not queued.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, instrument, warn};

use feed_core::events::{FeedEvent, FeedRefreshedEvent};

use super::context::EngineContext;
use super::error::{EngineError, EngineResult};

/// Feed synchronizer
#[derive(Clone)]
pub struct FeedSynchronizer {
    ctx: EngineContext,
    in_flight: Arc<AtomicBool>,
}

impl FeedSynchronizer {
    /// Create a new FeedSynchronizer
    pub fn new(ctx: EngineContext) -> Self {
        Self {
            ctx,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Fetch the first page and populate the list
    ///
    /// A failure here is fatal to the screen and is returned as a retryable
    /// error, distinct from an empty (but successful) result.
    #[instrument(skip(self))]
    pub async fn initial_load(&self, now: DateTime<Utc>) -> EngineResult<usize> {
        if self.in_flight.swap(true, Ordering::Acquire) {
            debug!("Fetch already in flight, skipping initial load");
            return Ok(self.ctx.store().len());
        }

        let result = self
            .ctx
            .items()
            .fetch_active_items(self.ctx.feed_config().page_size, now)
            .await;
        self.in_flight.store(false, Ordering::Release);

        match result {
            Ok(items) => {
                let count = items.len();
                self.ctx.store().replace_all(items);
                info!(count, "Initial feed load complete");
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "Initial feed load failed");
                Err(EngineError::retryable(e.to_string()))
            }
        }
    }

    /// Fetch the page again and prepend items not already held
    ///
    /// Never replaces, reorders, or removes held items; expiry is evaluated
    /// lazily at render time. Returns the number of items prepended.
    #[instrument(skip(self))]
    pub async fn background_refresh(&self, now: DateTime<Utc>) -> EngineResult<usize> {
        if self.in_flight.swap(true, Ordering::Acquire) {
            debug!("Fetch already in flight, skipping refresh");
            return Ok(0);
        }

        let result = self
            .ctx
            .items()
            .fetch_active_items(self.ctx.feed_config().page_size, now)
            .await;
        self.in_flight.store(false, Ordering::Release);

        let items = result.map_err(|e| EngineError::retryable(e.to_string()))?;
        let prepended = self.ctx.store().prepend_new(items);

        if prepended > 0 {
            info!(prepended, total = self.ctx.store().len(), "Feed refreshed");
            self.ctx.events().publish(FeedEvent::FeedRefreshed(FeedRefreshedEvent {
                prepended,
                total: self.ctx.store().len(),
                at: now,
            }));
        }

        Ok(prepended)
    }

    /// Spawn the background refresh loop
    ///
    /// Runs until `shutdown` flips to true. Missed ticks are skipped; a
    /// failed refresh is logged and silently retried on the next tick.
    pub fn spawn(&self, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        let sync = self.clone();
        let period = self.ctx.feed_config().refresh_interval();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately; the initial load already
            // covered it.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(e) = sync.background_refresh(Utc::now()).await {
                            warn!(error = %e, "Background refresh failed");
                        }
                    }
                    _ = shutdown.changed() => {
                        if *shutdown.borrow() {
                            info!("Feed synchronizer stopped");
                            break;
                        }
                    }
                }
            }
        })
    }
}

impl std::fmt::Debug for FeedSynchronizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedSynchronizer")
            .field("in_flight", &self.in_flight.load(Ordering::Relaxed))
            .finish()
    }
}
