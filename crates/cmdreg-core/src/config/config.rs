//! Main configuration for cmdreg

use serde::{Deserialize, Serialize};

use crate::config::logging_config::LoggingConfig;
use crate::config::registry_config::RegistryConfig;
use crate::error::{RegistryError, RegistryResult};
use crate::storage::StorageConfig;

/// Main configuration
///
/// All sections default, so partial files are accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Command tree behaviour
    pub registry: RegistryConfig,
    /// Where command records are persisted
    pub storage: StorageConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> RegistryResult<()> {
        if self.registry.separator.is_empty() {
            return Err(RegistryError::config("registry.separator must not be empty"));
        }
        if self.registry.max_depth == 0 {
            return Err(RegistryError::config(
                "registry.max_depth must be at least 1",
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(RegistryError::config("logging.level must not be empty"));
        }
        if !LoggingConfig::FORMATS.contains(&self.logging.format.as_str()) {
            return Err(RegistryError::config(format!(
                "logging.format must be one of {}, got '{}'",
                LoggingConfig::FORMATS.join(", "),
                self.logging.format
            )));
        }
        Ok(())
    }
}
