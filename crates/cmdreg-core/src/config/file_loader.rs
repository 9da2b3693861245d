//! File-based configuration loading

use std::fs;
use std::path::Path;

use crate::config::config::Config;
use crate::error::{RegistryError, RegistryResult};

/// Load configuration from a file
///
/// Supports JSON, TOML, and YAML formats based on file extension.
/// Returns default config if file doesn't exist.
pub fn load_from_file(path: &Path) -> RegistryResult<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        RegistryError::config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let config: Config = match path.extension().and_then(|s| s.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|e| {
            RegistryError::config(format!("Failed to parse TOML config: {}", e))
        })?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content).map_err(|e| {
            RegistryError::config(format!("Failed to parse YAML config: {}", e))
        })?,
        _ => serde_json::from_str(&content).map_err(|e| {
            RegistryError::config(format!("Failed to parse JSON config: {}", e))
        })?,
    };

    Ok(config)
}
