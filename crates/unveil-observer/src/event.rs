//! Visibility-change notifications

use unveil_core::ElementId;

/// One entry of a visibility-change batch.
///
/// Ephemeral: built by the host when an element's visibility changes and
/// consumed by the observer in the same pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityEvent {
    pub element: ElementId,
    /// Visible fraction of the element's area, `0.0..=1.0`
    pub ratio: f64,
    /// Whether the element touches the root at all
    pub is_intersecting: bool,
}

impl VisibilityEvent {
    pub fn new(element: ElementId, ratio: f64, is_intersecting: bool) -> Self {
        Self {
            element,
            ratio,
            is_intersecting,
        }
    }

    /// Shorthand for an entry where any positive ratio means intersecting
    pub fn at(element: ElementId, ratio: f64) -> Self {
        Self::new(element, ratio, ratio > 0.0)
    }
}
