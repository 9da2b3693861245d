//! Default configuration loading functions

use std::env;
use std::path::Path;

use crate::config::config::Config;
use crate::config::env_loader::apply_env_overrides;
use crate::config::file_loader::load_from_file;
use crate::error::RegistryResult;

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "cmdreg.toml";

/// Load configuration from `path` (or `cmdreg.toml`) with environment overrides
///
/// Loads configuration in this order:
/// 1. Default configuration
/// 2. Config file, if it exists
/// 3. `CMDREG_*` environment variables
pub fn load_config(path: Option<&Path>) -> RegistryResult<Config> {
    load_config_with(path, |key| env::var(key).ok())
}

/// Same as [`load_config`], reading variables through `lookup`
pub fn load_config_with<F>(path: Option<&Path>, lookup: F) -> RegistryResult<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    let mut config = load_from_file(path)?;
    apply_env_overrides(&mut config, lookup)?;
    config.validate()?;

    tracing::debug!(
        path = %path.display(),
        backend = ?config.storage.backend,
        "Configuration loaded"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_env_wins_over_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("cmdreg.toml");
        fs::write(&config_path, "[registry]\nmax_depth = 3\nseparator = \".\"\n").unwrap();

        let config = load_config_with(Some(config_path.as_path()), |key| {
            (key == "CMDREG_MAX_DEPTH").then(|| "5".to_string())
        })
        .unwrap();
        assert_eq!(config.registry.max_depth, 5);
        assert_eq!(config.registry.separator, ".");
    }

    #[test]
    fn test_validation_applied() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("cmdreg.toml");
        fs::write(&config_path, "[registry]\nmax_depth = 0\n").unwrap();

        assert!(load_config_with(Some(config_path.as_path()), |_| None).is_err());
    }

    #[test]
    fn test_validate_rules() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.registry.separator.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }
}
