//! Viewport focus state - ephemeral, never persisted

use crate::value_objects::FeedId;

/// Which item currently dominates the viewport
///
/// Recomputed continuously by the viewport observer; consumed by the gesture
/// interpreter and media playback. Indexes refer to the authentic list, not
/// the tripled rendered sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusState {
    pub current_index: usize,
    pub current_item_id: FeedId,
}

impl FocusState {
    /// Create a new FocusState
    pub fn new(current_index: usize, current_item_id: FeedId) -> Self {
        Self {
            current_index,
            current_item_id,
        }
    }
}
