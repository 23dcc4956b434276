//! The seam between an observer and the page it decorates

use unveil_core::ElementId;

/// Receives the class changes an observer applies on reveal.
///
/// Implementations must treat unknown elements as a no-op.
pub trait RevealHost {
    fn add_class(&mut self, element: ElementId, class: &str);

    fn remove_class(&mut self, element: ElementId, class: &str);
}
