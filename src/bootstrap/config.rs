//! # Configuration loader
//!
//! Reads `config.toml` into [`AppConfig`]. Missing keys take their defaults;
//! a missing file is the all-defaults configuration.

use anyhow::Context;
use std::path::Path;

use qc_core::config::AppConfig;

/// # Errors
///
/// Returns an error if the file exists but cannot be read, or is not valid
/// TOML for [`AppConfig`].
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = match std::fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(e) => {
            return Err(e).with_context(|| {
                format!("Failed to read config file: {}", config_path.display())
            })
        }
    };

    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))
}
