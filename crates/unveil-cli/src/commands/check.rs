//! Presets validation command

use crate::presets::Presets;
use anyhow::{Context, Result};
use std::path::Path;

/// Validate a presets file and echo it normalised
pub fn run(config: &str) -> Result<()> {
    let presets = Presets::load_from_file(Path::new(config))
        .with_context(|| format!("Invalid presets file {}", config))?;

    println!("{} is valid.\n", config);
    print!("{}", presets.to_toml_string()?);
    Ok(())
}
