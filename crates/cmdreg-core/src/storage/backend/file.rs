//! JSON file store
//!
//! Each table is one JSON object on disk, loaded when the store opens and
//! rewritten through a temporary file on every write.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use super::memory::scan_rows;
use super::r#trait::CommandStore;
use super::types::StorageError;
use crate::commands::types::CommandRecord;

/// Table persisted as a single JSON file
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    rows: RwLock<BTreeMap<String, CommandRecord>>,
}

impl FileStore {
    /// Open the table at `path`, creating parent directories as needed
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let rows = match tokio::fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(path = %path.display(), records = rows.len(), "File store opened");

        Ok(Self {
            path,
            rows: RwLock::new(rows),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn flush(&self, rows: &BTreeMap<String, CommandRecord>) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(rows)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl CommandStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<CommandRecord>, StorageError> {
        Ok(self.rows.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, record: &CommandRecord) -> Result<(), StorageError> {
        let mut rows = self.rows.write().await;
        let previous = rows.insert(key.to_string(), record.clone());

        if let Err(e) = self.flush(&rows).await {
            match previous {
                Some(previous) => rows.insert(key.to_string(), previous),
                None => rows.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        let mut rows = self.rows.write().await;
        let Some(previous) = rows.remove(key) else {
            return Ok(false);
        };

        if let Err(e) = self.flush(&rows).await {
            rows.insert(key.to_string(), previous);
            return Err(e);
        }
        Ok(true)
    }

    async fn scan(&self, prefix: &str) -> Result<Vec<(String, CommandRecord)>, StorageError> {
        Ok(scan_rows(&*self.rows.read().await, prefix))
    }
}
