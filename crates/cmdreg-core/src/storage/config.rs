//! Storage configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which store implementation backs the registry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Volatile in-process tables
    Memory,
    /// One JSON file per table under `data_dir`
    #[default]
    File,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            other => Err(format!("unknown storage backend '{}'", other)),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Directory holding the table files
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            data_dir: PathBuf::from("./db"),
        }
    }
}

impl StorageConfig {
    /// In-memory storage
    pub fn memory() -> Self {
        Self {
            backend: StorageBackend::Memory,
            ..Self::default()
        }
    }

    /// File storage under `dir`
    pub fn file(dir: impl Into<PathBuf>) -> Self {
        Self {
            backend: StorageBackend::File,
            data_dir: dir.into(),
        }
    }
}
