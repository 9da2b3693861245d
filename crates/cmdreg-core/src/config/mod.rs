//! Configuration management for cmdreg

#[allow(clippy::module_inception)] // config module in config directory is intentional
mod config;
mod defaults;
mod env_loader;
mod file_loader;
mod logging_config;
mod registry_config;

// Re-export public API
pub use crate::storage::{StorageBackend, StorageConfig};
pub use config::Config;
pub use defaults::{DEFAULT_CONFIG_FILE, load_config, load_config_with};
pub use env_loader::{apply_env_overrides, load_from_env};
pub use file_loader::load_from_file;
pub use logging_config::LoggingConfig;
pub use registry_config::RegistryConfig;
