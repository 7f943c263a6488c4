pub mod config;
pub mod info;
pub mod pipeline;
pub mod table;

use std::path::Path;

use anyhow::{Context, Result};
use maxsphere_core::pipeline::config::BatchConfig;
use tracing::debug;

/// Read a batch config TOML file.
pub fn load_config(path: &Path) -> Result<BatchConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    debug!(path = %path.display(), "Loading batch config");
    toml::from_str(&contents).context("Invalid batch config")
}
