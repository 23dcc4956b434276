//! Unveil Core - Foundational types for scroll-reveal behaviours
//!
//! This crate provides the types that all other Unveil crates depend on:
//! - `ElementId` - Opaque page element handles
//! - `Rect`, `RootMargin` - Document-space geometry
//! - `RevealConfig`, `RevealEffect` - Observer configuration
//! - Error types and Result alias

mod config;
mod error;
mod geometry;
mod id;

pub use config::{RevealConfig, RevealEffect};
pub use error::{Result, UnveilError};
pub use geometry::{MarginValue, Rect, RootMargin};
pub use id::ElementId;
