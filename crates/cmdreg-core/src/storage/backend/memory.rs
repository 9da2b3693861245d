//! In-memory store

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::r#trait::CommandStore;
use super::types::StorageError;
use crate::commands::types::CommandRecord;

/// Volatile table, used for tests and the `memory` backend
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: RwLock<BTreeMap<String, CommandRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    pub async fn keys(&self) -> Vec<String> {
        self.rows.read().await.keys().cloned().collect()
    }
}

pub(super) fn scan_rows(
    rows: &BTreeMap<String, CommandRecord>,
    prefix: &str,
) -> Vec<(String, CommandRecord)> {
    rows.range(prefix.to_string()..)
        .take_while(|(key, _)| key.starts_with(prefix))
        .map(|(key, record)| (key.clone(), record.clone()))
        .collect()
}

#[async_trait]
impl CommandStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<CommandRecord>, StorageError> {
        Ok(self.rows.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, record: &CommandRecord) -> Result<(), StorageError> {
        self.rows
            .write()
            .await
            .insert(key.to_string(), record.clone());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.rows.write().await.remove(key).is_some())
    }

    async fn scan(&self, prefix: &str) -> Result<Vec<(String, CommandRecord)>, StorageError> {
        Ok(scan_rows(&*self.rows.read().await, prefix))
    }
}
