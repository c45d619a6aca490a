//! Viewport observer
//!
//! Decides which rendered element dominates the viewport using a visibility
//! threshold rather than scroll-position math, so fast flings do not
//! momentarily attribute focus to a transiting element. Emits focus
//! transitions exactly once per change; a sustained focus never re-fires.

/// Visibility of one rendered element, as reported by the layout layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityReport {
    pub rendered_index: usize,
    /// Fraction of the element currently visible, 0.0..=1.0
    pub visible_fraction: f32,
}

impl VisibilityReport {
    /// Create a new report
    pub fn new(rendered_index: usize, visible_fraction: f32) -> Self {
        Self {
            rendered_index,
            visible_fraction,
        }
    }
}

/// A focus transition between two rendered indexes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FocusShift {
    /// Rendered index losing focus, if any
    pub lost: Option<usize>,
    /// Rendered index gaining focus, if any
    pub gained: Option<usize>,
}

impl FocusShift {
    /// Check if nothing changed
    pub fn is_none(&self) -> bool {
        self.lost.is_none() && self.gained.is_none()
    }
}

/// Viewport observer state
#[derive(Debug, Clone)]
pub struct ViewportObserver {
    threshold: f32,
    focused: Option<usize>,
    detached: bool,
}

impl ViewportObserver {
    /// Create an observer with the given visibility threshold
    #[must_use]
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            focused: None,
            detached: false,
        }
    }

    /// Currently focused rendered index
    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// The element with the highest visible fraction at or above threshold
    pub fn dominant(&self, reports: &[VisibilityReport]) -> Option<usize> {
        reports
            .iter()
            .filter(|report| report.visible_fraction >= self.threshold)
            .max_by(|a, b| {
                a.visible_fraction
                    .partial_cmp(&b.visible_fraction)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|report| report.rendered_index)
    }

    /// Fold a batch of visibility reports into a focus transition
    ///
    /// Returns the default (no-op) shift when focus is unchanged or the
    /// observer has been detached.
    pub fn observe(&mut self, reports: &[VisibilityReport]) -> FocusShift {
        if self.detached {
            return FocusShift::default();
        }

        let dominant = self.dominant(reports);
        if dominant == self.focused {
            return FocusShift::default();
        }

        let shift = FocusShift {
            lost: self.focused,
            gained: dominant,
        };
        self.focused = dominant;
        shift
    }

    /// Detach the observer; all subsequent observations are ignored
    pub fn detach(&mut self) {
        self.detached = true;
        self.focused = None;
    }

    /// Check if the observer has been detached
    pub fn is_detached(&self) -> bool {
        self.detached
    }

    /// Forget the current focus (e.g., after the list is replaced)
    pub fn reset(&mut self) {
        self.focused = None;
    }
}
