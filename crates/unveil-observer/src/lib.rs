//! Unveil Observer - Lazy reveal-on-scroll
//!
//! Watches a set of page elements and, the first time each is reported
//! sufficiently visible, applies a persistent visual-state change and stops
//! watching it.
//!
//! - `RevealObserver` - watched set plus the `Watching → Revealed` transition
//! - `VisibilityEvent` - one entry of a visibility-change batch
//! - `RevealHost` - where reveal effects are applied

mod event;
mod host;
mod observer;

pub use event::VisibilityEvent;
pub use host::RevealHost;
pub use observer::{RevealObserver, WatchStatus};
