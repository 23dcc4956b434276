//! Observer presets file
//!
//! ```toml
//! [fade_in]
//! threshold = 0.3
//! root_margin = "0px 0px -50px 0px"
//! effect = { add = ["appear"] }
//!
//! [slides]
//! threshold = 0.5
//! once = false
//! effect = { add = ["opacity-100"], remove = ["opacity-0"] }
//! ```
//!
//! A missing table keeps the built-in preset; a present table replaces it
//! entirely.

use serde::{Deserialize, Serialize};
use std::path::Path;
use unveil_core::{Result, RevealConfig};

/// Selector watched by the fade-in observer
pub const FADE_IN_SELECTOR: &str = ".fade-in-up";
/// Selector watched by the slides observer
pub const SLIDES_SELECTOR: &str = ".slide";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Presets {
    #[serde(default = "RevealConfig::fade_in")]
    pub fade_in: RevealConfig,
    #[serde(default = "RevealConfig::slides")]
    pub slides: RevealConfig,
}

impl Default for Presets {
    fn default() -> Self {
        Self {
            fade_in: RevealConfig::fade_in(),
            slides: RevealConfig::slides(),
        }
    }
}

impl Presets {
    /// Parse presets and validate both tables
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let presets: Presets = toml::from_str(content)?;
        presets.fade_in.validate()?;
        presets.slides.validate()?;
        Ok(presets)
    }

    /// Read and validate a presets file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load from `path` if given, else the built-in presets
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(Path::new(path)),
            None => Ok(Self::default()),
        }
    }

    /// Normalised TOML with both tables written out
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
