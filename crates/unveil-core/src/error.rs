//! Error types for Unveil

use thiserror::Error;

/// The main error type for Unveil setup operations.
///
/// Runtime absence of page structure is never an error; these variants only
/// cover configuration and file loading.
#[derive(Debug, Error)]
pub enum UnveilError {
    #[error("Invalid threshold: must be a finite value between 0 and 1, got {0}")]
    InvalidThreshold(f64),

    #[error("Invalid root margin `{input}`: {reason}")]
    InvalidRootMargin { input: String, reason: String },

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("Invalid viewport: {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("Invalid splash policy `{0}`: expected on-load, timeout:SECS or timeout-or-click:SECS")]
    InvalidSplashPolicy(String),

    #[error("Page parse error: {0}")]
    PageParse(String),

    #[error("Duplicate element id: {0}")]
    DuplicateElementId(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),
}

/// Result type alias for Unveil operations
pub type Result<T> = std::result::Result<T, UnveilError>;

impl From<toml::de::Error> for UnveilError {
    fn from(err: toml::de::Error) -> Self {
        UnveilError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for UnveilError {
    fn from(err: toml::ser::Error) -> Self {
        UnveilError::TomlSerError(err.to_string())
    }
}
