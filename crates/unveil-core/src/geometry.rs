//! Document-space geometry

use crate::error::{Result, UnveilError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An axis-aligned rectangle in CSS pixels.
///
/// `x`/`y` are the top-left corner; `y` grows downward as in a document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// X coordinate of the right edge
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Y coordinate of the bottom edge
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Area, treating negative sizes as empty
    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// The same rectangle moved by `(dx, dy)`
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Overlapping region of two rectangles.
    ///
    /// Edges are inclusive: rectangles that only touch produce a zero-area
    /// intersection rather than `None`.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right < left || bottom < top {
            return None;
        }

        Some(Rect::new(left, top, right - left, bottom - top))
    }

    /// Grow (positive offsets) or shrink (negative offsets) this rectangle by
    /// a root margin. Percentages resolve against this rectangle's own size.
    pub fn expand(&self, margin: &RootMargin) -> Rect {
        let top = margin.top.resolve(self.height);
        let right = margin.right.resolve(self.width);
        let bottom = margin.bottom.resolve(self.height);
        let left = margin.left.resolve(self.width);

        Rect {
            x: self.x - left,
            y: self.y - top,
            width: (self.width + left + right).max(0.0),
            height: (self.height + top + bottom).max(0.0),
        }
    }
}

/// One side of a root margin
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarginValue {
    Px(f64),
    Percent(f64),
}

impl Default for MarginValue {
    fn default() -> Self {
        MarginValue::Px(0.0)
    }
}

impl MarginValue {
    /// Resolve to pixels given the dimension percentages refer to
    pub fn resolve(self, basis: f64) -> f64 {
        match self {
            MarginValue::Px(v) => v,
            MarginValue::Percent(p) => basis * p / 100.0,
        }
    }

    fn parse(token: &str) -> Option<Self> {
        let value = if let Some(px) = token.strip_suffix("px") {
            MarginValue::Px(px.parse().ok()?)
        } else if let Some(pct) = token.strip_suffix('%') {
            MarginValue::Percent(pct.parse().ok()?)
        } else {
            // Only a bare zero is accepted without a unit
            let v: f64 = token.parse().ok()?;
            if v != 0.0 {
                return None;
            }
            MarginValue::Px(0.0)
        };

        match value {
            MarginValue::Px(v) | MarginValue::Percent(v) if v.is_finite() => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for MarginValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarginValue::Px(v) => write!(f, "{}px", v),
            MarginValue::Percent(v) => write!(f, "{}%", v),
        }
    }
}

/// Offsets applied to the viewport before intersection, in CSS margin order.
///
/// Parsed from CSS shorthand with one to four values, e.g. `"0px 0px -50px 0px"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RootMargin {
    pub top: MarginValue,
    pub right: MarginValue,
    pub bottom: MarginValue,
    pub left: MarginValue,
}

impl RootMargin {
    pub const ZERO: Self = Self {
        top: MarginValue::Px(0.0),
        right: MarginValue::Px(0.0),
        bottom: MarginValue::Px(0.0),
        left: MarginValue::Px(0.0),
    };

    /// Margin that only moves the bottom edge, negative values shrink the root
    pub fn bottom_px(px: f64) -> Self {
        Self {
            bottom: MarginValue::Px(px),
            ..Self::ZERO
        }
    }
}

impl FromStr for RootMargin {
    type Err = UnveilError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| UnveilError::InvalidRootMargin {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let values = s
            .split_whitespace()
            .map(|token| MarginValue::parse(token).ok_or_else(|| invalid("expected px or % values")))
            .collect::<Result<Vec<_>>>()?;

        let [top, right, bottom, left] = match values.as_slice() {
            [all] => [*all; 4],
            [vertical, horizontal] => [*vertical, *horizontal, *vertical, *horizontal],
            [top, horizontal, bottom] => [*top, *horizontal, *bottom, *horizontal],
            [top, right, bottom, left] => [*top, *right, *bottom, *left],
            [] => return Err(invalid("empty margin")),
            _ => return Err(invalid("expected at most four values")),
        };

        Ok(Self {
            top,
            right,
            bottom,
            left,
        })
    }
}

impl TryFrom<String> for RootMargin {
    type Error = UnveilError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<RootMargin> for String {
    fn from(margin: RootMargin) -> Self {
        margin.to_string()
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersection_overlap() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 80.0, 100.0, 100.0);
        let i = a.intersection(&b).unwrap();
        assert_eq!(i, Rect::new(50.0, 80.0, 50.0, 20.0));
        assert_eq!(i.area(), 1000.0);
    }

    #[test]
    fn test_intersection_touching_edges_is_zero_area() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(0.0, 100.0, 100.0, 50.0);
        let i = a.intersection(&b).unwrap();
        assert_eq!(i.area(), 0.0);
    }

    #[test]
    fn test_intersection_disjoint() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(0.0, 101.0, 100.0, 50.0);
        assert!(a.intersection(&b).is_none());
    }

    #[test]
    fn test_parse_four_values() {
        let m: RootMargin = "0px 0px -50px 0px".parse().unwrap();
        assert_eq!(m, RootMargin::bottom_px(-50.0));
        assert_eq!(m.to_string(), "0px 0px -50px 0px");
    }

    #[test]
    fn test_parse_shorthand_forms() {
        let one: RootMargin = "-10%".parse().unwrap();
        assert_eq!(one.left, MarginValue::Percent(-10.0));
        assert_eq!(one.bottom, MarginValue::Percent(-10.0));

        let two: RootMargin = "5px 0".parse().unwrap();
        assert_eq!(two.top, MarginValue::Px(5.0));
        assert_eq!(two.right, MarginValue::Px(0.0));
        assert_eq!(two.bottom, MarginValue::Px(5.0));

        let three: RootMargin = "1px 2px 3px".parse().unwrap();
        assert_eq!(three.left, MarginValue::Px(2.0));
        assert_eq!(three.bottom, MarginValue::Px(3.0));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("".parse::<RootMargin>().is_err());
        assert!("10".parse::<RootMargin>().is_err());
        assert!("1px 2px 3px 4px 5px".parse::<RootMargin>().is_err());
        assert!("abcpx".parse::<RootMargin>().is_err());
    }

    #[test]
    fn test_expand_shrinks_bottom() {
        let viewport = Rect::new(0.0, 200.0, 800.0, 600.0);
        let root = viewport.expand(&RootMargin::bottom_px(-50.0));
        assert_eq!(root, Rect::new(0.0, 200.0, 800.0, 550.0));
    }

    #[test]
    fn test_expand_percent_and_clamp() {
        let viewport = Rect::new(0.0, 0.0, 200.0, 100.0);
        let grown = viewport.expand(&"10%".parse().unwrap());
        assert_eq!(grown, Rect::new(-20.0, -10.0, 240.0, 120.0));

        let collapsed = viewport.expand(&"-60%".parse().unwrap());
        assert_eq!(collapsed.width, 0.0);
        assert_eq!(collapsed.height, 0.0);
    }
}
