//! Smooth scrolling for in-page anchors

use crate::page::Page;
use crate::viewport::Viewport;
use tracing::debug;
use unveil_core::ElementId;

/// Cubic ease-in-out on a normalized `[0..1]` parameter
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothScrollConfig {
    /// Seconds from start to target; zero, negative or non-finite jumps immediately
    pub duration: f64,
}

impl Default for SmoothScrollConfig {
    fn default() -> Self {
        Self { duration: 0.5 }
    }
}

#[derive(Debug, Clone, Copy)]
struct ScrollAnimation {
    from: f64,
    to: f64,
    elapsed: f64,
}

/// Clicking an element whose `href` is `#target` scrolls to the target's top
#[derive(Debug, Clone, Default)]
pub struct SmoothScroll {
    config: SmoothScrollConfig,
    active: Option<ScrollAnimation>,
}

impl SmoothScroll {
    pub fn new(config: SmoothScrollConfig) -> Self {
        Self {
            config,
            active: None,
        }
    }

    /// Whether a scroll animation is in progress
    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Start scrolling toward the clicked anchor's target.
    ///
    /// Returns the position to jump to when the duration is zero. Clicks on
    /// non-anchors and anchors with a missing target do nothing.
    pub fn on_click(&mut self, target: ElementId, page: &Page, viewport: &Viewport) -> Option<f64> {
        let anchor = page.get(target)?.anchor_target()?;
        let Some(destination) = page.element_by_dom_id(anchor).and_then(|id| page.get(id)) else {
            debug!(anchor, "anchor target missing");
            return None;
        };

        let to = viewport
            .max_scroll(page.document_height())
            .min(destination.rect.y)
            .max(0.0);
        if !(self.config.duration.is_finite() && self.config.duration > 0.0) {
            self.active = None;
            return Some(to);
        }

        self.active = Some(ScrollAnimation {
            from: viewport.scroll_y,
            to,
            elapsed: 0.0,
        });
        None
    }

    /// Advance the animation, returning the next scroll position while active
    pub fn on_tick(&mut self, dt: f64) -> Option<f64> {
        let anim = self.active.as_mut()?;
        anim.elapsed += dt.max(0.0);

        let t = (anim.elapsed / self.config.duration).min(1.0);
        let y = anim.from + (anim.to - anim.from) * ease_in_out_cubic(t);
        if t >= 1.0 {
            self.active = None;
        }
        Some(y)
    }

    /// A user scroll interrupts any running animation
    pub fn cancel(&mut self) {
        self.active = None;
    }
}
