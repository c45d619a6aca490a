//! Wire models mirroring the hosted backend's JSON API

mod engagement;
mod item;

pub use engagement::{CommentRecord, EngagementEventRecord, ReactionRecord};
pub use item::ItemRecord;
