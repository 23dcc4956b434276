//! Reveal observer configuration
//!
//! A config is fixed once an observer is created. It can be built in code
//! from one of the presets or loaded from TOML:
//!
//! ```toml
//! threshold = 0.3
//! root_margin = "0px 0px -50px 0px"
//! once = true
//!
//! [effect]
//! add = ["appear"]
//! remove = []
//! ```

use crate::error::{Result, UnveilError};
use crate::geometry::RootMargin;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Class changes applied to an element when it is revealed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RevealEffect {
    #[serde(default)]
    pub add: Vec<String>,
    #[serde(default)]
    pub remove: Vec<String>,
}

impl RevealEffect {
    /// Effect that only adds `class`
    pub fn add_class(class: impl Into<String>) -> Self {
        Self {
            add: vec![class.into()],
            remove: Vec::new(),
        }
    }

    /// Effect that adds `add` and removes `remove`
    pub fn swap(add: impl Into<String>, remove: impl Into<String>) -> Self {
        Self {
            add: vec![add.into()],
            remove: vec![remove.into()],
        }
    }

    /// Whether revealing would change nothing
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty()
    }
}

/// Settings for one reveal-on-scroll observer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RevealConfig {
    /// Fraction of the element's area that must be inside the root, `0.0..=1.0`
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Offsets applied to the viewport before intersecting
    #[serde(default)]
    pub root_margin: RootMargin,
    /// Stop watching an element once it has been revealed
    #[serde(default = "default_true")]
    pub once: bool,
    /// Classes to add/remove on reveal
    #[serde(default)]
    pub effect: RevealEffect,
}

fn default_threshold() -> f64 {
    0.0
}

fn default_true() -> bool {
    true
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            root_margin: RootMargin::ZERO,
            effect: RevealEffect::default(),
            once: true,
        }
    }
}

impl RevealConfig {
    /// Fade-in-up sections: reveal at 30% visibility, ignoring the bottom 50px
    /// of the viewport, by adding `appear`.
    pub fn fade_in() -> Self {
        Self {
            threshold: 0.3,
            root_margin: RootMargin::bottom_px(-50.0),
            effect: RevealEffect::add_class("appear"),
            once: true,
        }
    }

    /// Slides: reveal at 30% visibility by swapping `opacity-0` for
    /// `opacity-100`. Slides stay subscribed after revealing.
    pub fn slides() -> Self {
        Self {
            threshold: 0.3,
            root_margin: RootMargin::ZERO,
            effect: RevealEffect::swap("opacity-100", "opacity-0"),
            once: false,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_root_margin(mut self, margin: RootMargin) -> Self {
        self.root_margin = margin;
        self
    }

    pub fn with_effect(mut self, effect: RevealEffect) -> Self {
        self.effect = effect;
        self
    }

    /// Check the invariants a config must satisfy before an observer uses it
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(UnveilError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }

    /// Parse and validate a config from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: RevealConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Serialise to TOML, margins in shorthand form
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
