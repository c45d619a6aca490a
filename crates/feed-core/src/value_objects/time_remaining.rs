//! Time remaining until an item expires
//!
//! Pure computation from `expires_at` and a caller-supplied `now`; the clock
//! is always injected so expiry math is deterministic under test.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Remaining lifetime of an expiring item, broken into display components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRemaining {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub is_expired: bool,
}

impl TimeRemaining {
    /// Compute the remaining time between `now` and `expires_at`
    ///
    /// Never produces negative components; once `now >= expires_at` all
    /// components are zero and `is_expired` is true.
    pub fn until(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let left = expires_at.signed_duration_since(now);
        let total = left.num_seconds();
        if total <= 0 {
            return Self::expired();
        }
        Self {
            hours: total / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
            is_expired: false,
        }
    }

    /// The zero/expired value
    #[inline]
    pub const fn expired() -> Self {
        Self {
            hours: 0,
            minutes: 0,
            seconds: 0,
            is_expired: true,
        }
    }

    /// Total remaining seconds
    #[inline]
    pub const fn total_seconds(&self) -> i64 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }
}

impl fmt::Display for TimeRemaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}
