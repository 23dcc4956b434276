//! Scrollable viewport

use unveil_core::{Rect, Result, UnveilError};

/// The visible window onto a page, in document space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub scroll_y: f64,
}

impl Viewport {
    /// A viewport scrolled to the top. Fails for non-positive or non-finite sizes.
    pub fn new(width: f64, height: f64) -> Result<Self> {
        Self::validate_size(width, height)?;
        Ok(Self {
            width,
            height,
            scroll_y: 0.0,
        })
    }

    fn validate_size(width: f64, height: f64) -> Result<()> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(UnveilError::InvalidViewport { width, height });
        }
        Ok(())
    }

    /// The viewport rectangle at the current scroll position
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, self.scroll_y, self.width, self.height)
    }

    /// Furthest `scroll_y` for a document of this height
    pub fn max_scroll(&self, document_height: f64) -> f64 {
        (document_height - self.height).max(0.0)
    }

    /// Scroll to `y`, clamped to the document. Returns the new position.
    pub fn scroll_to(&mut self, y: f64, document_height: f64) -> f64 {
        let y = if y.is_finite() { y } else { self.scroll_y };
        self.scroll_y = y.clamp(0.0, self.max_scroll(document_height));
        self.scroll_y
    }

    /// Change the viewport size, keeping the scroll position within bounds.
    /// Invalid sizes are ignored.
    pub fn resize(&mut self, width: f64, height: f64, document_height: f64) -> bool {
        if Self::validate_size(width, height).is_err() {
            return false;
        }
        self.width = width;
        self.height = height;
        self.scroll_to(self.scroll_y, document_height);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_size_rejected() {
        assert!(Viewport::new(0.0, 600.0).is_err());
        assert!(Viewport::new(800.0, f64::NAN).is_err());
        assert!(Viewport::new(800.0, 600.0).is_ok());
    }

    #[test]
    fn test_scroll_clamps() {
        let mut vp = Viewport::new(800.0, 600.0).unwrap();
        assert_eq!(vp.scroll_to(500.0, 2000.0), 500.0);
        assert_eq!(vp.scroll_to(5000.0, 2000.0), 1400.0);
        assert_eq!(vp.scroll_to(-10.0, 2000.0), 0.0);
        assert_eq!(vp.scroll_to(100.0, 300.0), 0.0);
        assert_eq!(vp.rect(), Rect::new(0.0, 0.0, 800.0, 600.0));
    }

    #[test]
    fn test_resize_reclamps_scroll() {
        let mut vp = Viewport::new(800.0, 600.0).unwrap();
        vp.scroll_to(1400.0, 2000.0);
        assert!(vp.resize(800.0, 1000.0, 2000.0));
        assert_eq!(vp.scroll_y, 1000.0);
        assert!(!vp.resize(-1.0, 1000.0, 2000.0));
    }
}
