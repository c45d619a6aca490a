//! Feed events emitted by the engine

mod domain_event;

pub use domain_event::{
    EngagementRecordedEvent, FeedEvent, FeedRefreshedEvent, FocusChangedEvent, PlaybackEvent,
    ReactionFlashEvent,
};
