//! Page glue behaviours: splash dismissal, menu toggle, smooth-scroll anchors
//!
//! Each behaviour attaches to elements it finds by DOM id and is inert when
//! they are missing.

mod anchors;
mod menu;
mod splash;

pub use anchors::{ease_in_out_cubic, SmoothScroll, SmoothScrollConfig};
pub use menu::{MenuToggle, HIDDEN_CLASS};
pub use splash::{Splash, SplashConfig, SplashDismiss};
