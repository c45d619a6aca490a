//! # feed-engine
//!
//! Application layer: the ephemeral feed engine. Composes the feed
//! synchronizer, loop scroll state machine, viewport observer, gesture
//! interpreter, and engagement tracker behind a single `FeedEngine` facade.

pub mod dto;
pub mod engine;
pub mod events;
pub mod services;
pub mod state;

// Re-export the embedding surface at crate root
pub use engine::{FeedEngine, TapResolution};
pub use events::EventBus;
pub use services::{
    ContactService, EngagementTracker, EngineContext, EngineContextBuilder, EngineError,
    EngineResult, FeedSynchronizer, FocusShift, GestureInterpreter, GestureOutcome, LoopScroll,
    ScrollTransition, Section, TapInput, TapPoint, TapTarget, ViewportObserver, VisibilityReport,
};
pub use state::FeedStore;
