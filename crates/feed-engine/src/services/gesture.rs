//! Gesture interpreter
//!
//! Disambiguates taps on a feed item surface: a second tap within the
//! double-tap window resolves to a quick reaction; otherwise the single tap
//! commits to opening the detail view after a short settle delay. Explicit
//! two-state machine driven by injected instants, so tests never sleep.
//!
//! Taps on child interactive controls are contained before they reach this
//! machine and activate immediately.

use std::time::Instant;

use feed_common::config::GestureConfig;

/// Tap coordinates in the item surface's own space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapPoint {
    pub x: f32,
    pub y: f32,
}

impl TapPoint {
    /// Create a new point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// What the pointer landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapTarget {
    /// The item surface itself; participates in disambiguation
    Surface,
    /// A child interactive control (contact button, share); acts immediately
    Control,
}

/// One pointer-down-and-up
#[derive(Debug, Clone, Copy)]
pub struct TapInput {
    pub at: Instant,
    pub position: TapPoint,
    pub target: TapTarget,
}

impl TapInput {
    /// A tap on the item surface
    pub fn surface(at: Instant, position: TapPoint) -> Self {
        Self {
            at,
            position,
            target: TapTarget::Surface,
        }
    }

    /// A tap on a child control
    pub fn control(at: Instant, position: TapPoint) -> Self {
        Self {
            at,
            position,
            target: TapTarget::Control,
        }
    }
}

/// Resolved gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// Child control tap, passed through untouched
    ControlActivated,
    /// Double tap resolved at these coordinates
    QuickReaction(TapPoint),
    /// Single tap committed after the settle delay
    OpenDetail,
}

#[derive(Debug, Clone, Copy)]
enum GestureState {
    Idle,
    AwaitingSecondTap { first_at: Instant },
}

/// Tap disambiguation state machine
#[derive(Debug, Clone)]
pub struct GestureInterpreter {
    config: GestureConfig,
    state: GestureState,
}

impl GestureInterpreter {
    /// Create an interpreter with the given timing configuration
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            state: GestureState::Idle,
        }
    }

    /// Check if a single tap is pending resolution
    pub fn is_awaiting(&self) -> bool {
        matches!(self.state, GestureState::AwaitingSecondTap { .. })
    }

    /// Instant at which a pending single tap commits, if one is pending
    pub fn pending_deadline(&self) -> Option<Instant> {
        match self.state {
            GestureState::Idle => None,
            GestureState::AwaitingSecondTap { first_at } => {
                Some(first_at + self.config.double_tap_window() + self.config.settle_delay())
            }
        }
    }

    /// Feed a tap into the machine
    ///
    /// Control taps bypass disambiguation entirely. A surface tap either
    /// starts the window (returns None) or, arriving within the window of a
    /// pending first tap, resolves the pair as a quick reaction. A surface
    /// tap arriving after the window has lapsed first flushes the stale
    /// single tap, then starts a new window.
    pub fn on_tap(&mut self, tap: TapInput) -> Option<GestureOutcome> {
        if tap.target == TapTarget::Control {
            return Some(GestureOutcome::ControlActivated);
        }

        match self.state {
            GestureState::Idle => {
                self.state = GestureState::AwaitingSecondTap { first_at: tap.at };
                None
            }
            GestureState::AwaitingSecondTap { first_at } => {
                if tap.at.duration_since(first_at) <= self.config.double_tap_window() {
                    self.state = GestureState::Idle;
                    Some(GestureOutcome::QuickReaction(tap.position))
                } else {
                    self.state = GestureState::AwaitingSecondTap { first_at: tap.at };
                    Some(GestureOutcome::OpenDetail)
                }
            }
        }
    }

    /// Resolve a pending single tap whose deadline has passed
    ///
    /// The host drives this from its frame clock (or a timer armed at
    /// `pending_deadline`). Returns at most one outcome per pending tap.
    pub fn poll(&mut self, now: Instant) -> Option<GestureOutcome> {
        match self.pending_deadline() {
            Some(deadline) if now >= deadline => {
                self.state = GestureState::Idle;
                Some(GestureOutcome::OpenDetail)
            }
            _ => None,
        }
    }

    /// Cancel any pending resolution (teardown)
    pub fn cancel(&mut self) {
        self.state = GestureState::Idle;
    }
}
