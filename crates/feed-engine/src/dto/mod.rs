//! Data transfer objects exposed to the rendering layer

mod requests;
mod views;

pub use requests::NewComment;
pub use views::{EngagementCounts, FeedSnapshot, ItemView};
