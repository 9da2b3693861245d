//! Store trait definitions
//!
//! Defines the keyed-table interface the registry persists through.

use async_trait::async_trait;
use std::sync::Arc;

use super::types::{StorageError, StoreScope};
use crate::commands::types::CommandRecord;

/// A durable table of command records keyed by fully-qualified name
#[async_trait]
pub trait CommandStore: Send + Sync {
    /// Fetch one record
    async fn get(&self, key: &str) -> Result<Option<CommandRecord>, StorageError>;

    /// Insert or replace a record
    async fn put(&self, key: &str, record: &CommandRecord) -> Result<(), StorageError>;

    /// Delete a record, returning whether it existed
    async fn delete(&self, key: &str) -> Result<bool, StorageError>;

    /// All records whose key starts with `prefix`, ordered by key
    async fn scan(&self, prefix: &str) -> Result<Vec<(String, CommandRecord)>, StorageError>;
}

/// Hands out one store per tenant plus one global store
#[async_trait]
pub trait StoreProvider: Send + Sync {
    async fn open(&self, scope: &StoreScope) -> Result<Arc<dyn CommandStore>, StorageError>;
}
