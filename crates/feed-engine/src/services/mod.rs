//! Engine services
//!
//! Each service covers one concern of the feed core: synchronization, loop
//! scrolling, viewport focus, gesture disambiguation, engagement tracking,
//! and contact channel composition.

pub mod contact;
pub mod context;
pub mod engagement;
pub mod error;
pub mod gesture;
pub mod scroll;
pub mod sync;
pub mod viewport;

// Re-export all services for convenience
pub use contact::{compose_message, normalize_phone, ContactService};
pub use context::{EngineContext, EngineContextBuilder};
pub use engagement::EngagementTracker;
pub use error::{EngineError, EngineResult};
pub use gesture::{GestureInterpreter, GestureOutcome, TapInput, TapPoint, TapTarget};
pub use scroll::{LoopScroll, ScrollTransition, Section};
pub use sync::FeedSynchronizer;
pub use viewport::{FocusShift, ViewportObserver, VisibilityReport};
