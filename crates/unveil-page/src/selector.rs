//! Minimal selectors: `.class` and `#id`

use crate::element::PageElement;
use std::fmt;
use std::str::FromStr;
use unveil_core::{Result, UnveilError};

/// A structural marker used to pick elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Class(String),
    Id(String),
}

impl Selector {
    /// Parse `.class` or `#id`; anything else is `InvalidSelector`
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let mut chars = input.chars();
        let kind = chars.next();
        let name = chars.as_str();

        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(UnveilError::InvalidSelector(input.to_string()));
        }

        match kind {
            Some('.') => Ok(Selector::Class(name.to_string())),
            Some('#') => Ok(Selector::Id(name.to_string())),
            _ => Err(UnveilError::InvalidSelector(input.to_string())),
        }
    }

    /// Whether `element` is picked by this selector
    pub fn matches(&self, element: &PageElement) -> bool {
        match self {
            Selector::Class(class) => element.has_class(class),
            Selector::Id(id) => element.dom_id.as_deref() == Some(id.as_str()),
        }
    }
}

impl FromStr for Selector {
    type Err = UnveilError;

    fn from_str(s: &str) -> Result<Self> {
        Selector::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Class(class) => write!(f, ".{}", class),
            Selector::Id(id) => write!(f, "#{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unveil_core::Rect;

    #[test]
    fn test_parse() {
        assert_eq!(Selector::parse(".fade-in-up").unwrap(), Selector::Class("fade-in-up".into()));
        assert_eq!(Selector::parse(" #splash ").unwrap(), Selector::Id("splash".into()));
        assert_eq!(Selector::parse(".slide").unwrap().to_string(), ".slide");
    }

    #[test]
    fn test_parse_rejects_unsupported() {
        for bad in ["", ".", "#", "slide", ".a .b", "div > p", ".été", "é"] {
            assert!(Selector::parse(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_matches() {
        let el = PageElement::new(Rect::default())
            .with_dom_id("hero")
            .with_class("fade-in-up");
        assert!(Selector::Class("fade-in-up".into()).matches(&el));
        assert!(Selector::Id("hero".into()).matches(&el));
        assert!(!Selector::Class("slide".into()).matches(&el));
    }
}
