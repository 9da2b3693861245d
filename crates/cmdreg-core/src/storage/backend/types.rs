//! Storage type definitions

use std::fmt;
use thiserror::Error;

use crate::commands::types::TenantId;

/// Storage error types
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Backend not available: {0}")]
    Unavailable(String),

    #[error("Invalid store scope: {0}")]
    InvalidScope(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

/// Which table a store instance holds
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StoreScope {
    /// Commands local to one tenant
    Tenant(TenantId),
    /// Commands visible to every tenant
    Global,
}

impl fmt::Display for StoreScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tenant(tenant) => write!(f, "tenant {}", tenant),
            Self::Global => write!(f, "global"),
        }
    }
}
