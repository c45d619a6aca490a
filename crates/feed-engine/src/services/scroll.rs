//! Loop scroll engine
//!
//! Presents the authentic item list as an endlessly scrollable sequence by
//! rendering it three times (head, middle, tail copies) and silently
//! re-centering when the viewer reaches either duplicated boundary. Pure
//! state machine; no rendering dependencies, which keeps the jump logic unit
//! testable.

/// Which copy of the tripled list a rendered index falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Head,
    Middle,
    Tail,
}

/// Result of evaluating a scroll position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTransition {
    /// Position is fine; keep rendering where the viewer is
    Stay,
    /// Reposition to `to` without animation before the next frame
    Jump { to: usize },
}

/// Loop scroll state machine
///
/// `rendered_index` addresses the tripled sequence; `actual_index` addresses
/// the authentic list. All business logic must use the actual index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopScroll {
    len: usize,
    rendered_index: usize,
}

impl LoopScroll {
    /// Create a scroll positioned at the start of the middle copy
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            len,
            rendered_index: len,
        }
    }

    /// Length of the authentic list
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the authentic list is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Length of the rendered sequence (three copies, or zero when empty)
    #[inline]
    pub fn rendered_len(&self) -> usize {
        self.len * 3
    }

    /// Looping is disabled for lists of zero or one item
    #[inline]
    pub fn is_loop_enabled(&self) -> bool {
        self.len > 1
    }

    /// Current rendered position
    #[inline]
    pub fn rendered_index(&self) -> usize {
        self.rendered_index
    }

    /// Current authentic-list index, if any items are held
    pub fn actual_index(&self) -> Option<usize> {
        if self.len == 0 {
            None
        } else {
            Some(self.rendered_index % self.len)
        }
    }

    /// Map any rendered index to its authentic-list index
    pub fn actual_of(&self, rendered_index: usize) -> Option<usize> {
        if self.len == 0 {
            None
        } else {
            Some(rendered_index % self.len)
        }
    }

    /// Which copy a rendered index falls in
    pub fn section_of(&self, rendered_index: usize) -> Option<Section> {
        if self.len == 0 {
            return None;
        }
        Some(match rendered_index / self.len {
            0 => Section::Head,
            1 => Section::Middle,
            _ => Section::Tail,
        })
    }

    /// Evaluate a new scroll position
    ///
    /// Dwelling in the head or tail copy yields a `Jump` to the equivalent
    /// middle-copy offset; the caller must apply it without animation in the
    /// same frame. Returns `Stay` when looping is disabled.
    pub fn evaluate(&mut self, rendered_index: usize) -> ScrollTransition {
        if self.len == 0 {
            return ScrollTransition::Stay;
        }

        let rendered_index = rendered_index.min(self.rendered_len() - 1);
        self.rendered_index = rendered_index;

        if !self.is_loop_enabled() {
            return ScrollTransition::Stay;
        }

        match self.section_of(rendered_index) {
            Some(Section::Middle) | None => ScrollTransition::Stay,
            Some(Section::Head | Section::Tail) => {
                let to = rendered_index % self.len + self.len;
                self.rendered_index = to;
                ScrollTransition::Jump { to }
            }
        }
    }

    /// Adjust for list growth after a refresh prepended `prepended` items
    ///
    /// The item the viewer is currently on keeps its place: its authentic
    /// index shifts by the prepend count and the rendered position is
    /// re-derived inside the middle copy.
    pub fn resize(&mut self, new_len: usize, prepended: usize) {
        if new_len == 0 {
            self.len = 0;
            self.rendered_index = 0;
            return;
        }

        let actual = self.actual_index().unwrap_or(0);
        let shifted = (actual + prepended).min(new_len - 1);
        self.len = new_len;
        self.rendered_index = new_len + shifted;
    }
}
