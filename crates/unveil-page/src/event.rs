//! Page input events

use unveil_core::ElementId;

/// Input delivered to a page session
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// The page finished loading
    Loaded,
    /// An element was clicked
    Click(ElementId),
    /// The user scrolled to an absolute position
    Scroll(f64),
    /// The viewport changed size
    Resize { width: f64, height: f64 },
    /// Time advanced by the given number of seconds
    Tick(f64),
}
