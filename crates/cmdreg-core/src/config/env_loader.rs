//! Environment variable-based configuration loading

use std::env;
use std::path::PathBuf;

use crate::commands::types::AliasMode;
use crate::config::config::Config;
use crate::error::{RegistryError, RegistryResult};

/// Load configuration from `CMDREG_*` environment variables on top of the defaults
pub fn load_from_env() -> RegistryResult<Config> {
    let mut config = Config::default();
    apply_env_overrides(&mut config, |key| env::var(key).ok())?;
    Ok(config)
}

/// Apply `CMDREG_*` overrides read through `lookup`
///
/// Recognized variables: `CMDREG_SEPARATOR`, `CMDREG_CASE_INSENSITIVE`,
/// `CMDREG_ALIAS_MODE`, `CMDREG_MAX_DEPTH`, `CMDREG_STORAGE_BACKEND`,
/// `CMDREG_DATA_DIR`, `CMDREG_LOG_LEVEL` and `CMDREG_LOG_FORMAT`.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> RegistryResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(separator) = lookup("CMDREG_SEPARATOR") {
        config.registry.separator = separator;
    }

    if let Some(value) = lookup("CMDREG_CASE_INSENSITIVE") {
        config.registry.case_insensitive = parse_bool("CMDREG_CASE_INSENSITIVE", &value)?;
    }

    if let Some(value) = lookup("CMDREG_ALIAS_MODE") {
        config.registry.default_alias_mode = match value.trim().to_lowercase().as_str() {
            "strict" => AliasMode::Strict,
            "permissive" => AliasMode::Permissive,
            _ => {
                return Err(RegistryError::config(format!(
                    "Invalid CMDREG_ALIAS_MODE value '{}'",
                    value
                )));
            }
        };
    }

    if let Some(value) = lookup("CMDREG_MAX_DEPTH") {
        config.registry.max_depth = value.trim().parse().map_err(|_| {
            RegistryError::config(format!("Invalid CMDREG_MAX_DEPTH value '{}'", value))
        })?;
    }

    if let Some(value) = lookup("CMDREG_STORAGE_BACKEND") {
        config.storage.backend = value.parse().map_err(RegistryError::config)?;
    }

    if let Some(dir) = lookup("CMDREG_DATA_DIR") {
        config.storage.data_dir = PathBuf::from(dir);
    }

    if let Some(level) = lookup("CMDREG_LOG_LEVEL") {
        config.logging.level = level;
    }

    if let Some(format) = lookup("CMDREG_LOG_FORMAT") {
        config.logging.format = format.trim().to_lowercase();
    }

    Ok(())
}

fn parse_bool(key: &str, value: &str) -> RegistryResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(RegistryError::config(format!(
            "Invalid {} value '{}'",
            key, value
        ))),
    }
}
