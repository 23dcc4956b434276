//! Unveil Page - Headless page host
//!
//! Plays the part of the browser for the reveal observer and the page glue:
//! - `Page` / `PageElement` - element list with classes and document rects
//! - `Viewport` - scrollable window onto the page
//! - `IntersectionTracker` - builds visibility-change batches
//! - `PageEvent` / `EventBus` - queued input for a session
//! - `PageSession` - installs behaviours and pumps events through them

mod behaviors;
mod element;
mod event;
mod event_bus;
mod loader;
mod page;
mod selector;
mod session;
mod tracker;
mod viewport;

pub use behaviors::{
    ease_in_out_cubic, MenuToggle, SmoothScroll, SmoothScrollConfig, Splash, SplashConfig,
    SplashDismiss, HIDDEN_CLASS,
};
pub use element::PageElement;
pub use event::PageEvent;
pub use event_bus::EventBus;
pub use loader::{load_page, parse_page_str, ElementDef, LoadedPage, PageFile, PageMeta, ViewportDef};
pub use page::{Page, PageChange};
pub use selector::Selector;
pub use session::{BehaviorHandle, PageSession};
pub use tracker::{measure, IntersectionTracker};
pub use viewport::Viewport;
