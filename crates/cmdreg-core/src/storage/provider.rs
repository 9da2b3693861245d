//! Store providers
//!
//! A provider opens (and caches) the table for each tenant and the global
//! table, so every scope is served by exactly one store instance.

use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::storage::backend::{
    CommandStore, FileStore, MemoryStore, StorageError, StoreProvider, StoreScope,
};
use crate::storage::config::{StorageBackend, StorageConfig};

/// Provider of volatile in-memory tables
#[derive(Debug, Default)]
pub struct MemoryStoreProvider {
    stores: DashMap<StoreScope, Arc<MemoryStore>>,
}

impl MemoryStoreProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// The table for `scope`, if it was ever opened
    pub fn store(&self, scope: &StoreScope) -> Option<Arc<MemoryStore>> {
        self.stores.get(scope).map(|entry| Arc::clone(entry.value()))
    }
}

#[async_trait]
impl StoreProvider for MemoryStoreProvider {
    async fn open(&self, scope: &StoreScope) -> Result<Arc<dyn CommandStore>, StorageError> {
        let store = self
            .stores
            .entry(scope.clone())
            .or_insert_with(|| Arc::new(MemoryStore::new()))
            .clone();
        Ok(store)
    }
}

/// Provider of JSON file tables under one directory
#[derive(Debug)]
pub struct FileStoreProvider {
    data_dir: PathBuf,
    stores: Mutex<HashMap<StoreScope, Arc<FileStore>>>,
}

impl FileStoreProvider {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            stores: Mutex::new(HashMap::new()),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// File backing `scope`
    pub fn table_path(&self, scope: &StoreScope) -> Result<PathBuf, StorageError> {
        let file_name = match scope {
            StoreScope::Global => "global.json".to_string(),
            StoreScope::Tenant(tenant) => {
                let id = tenant.as_str();
                let valid = !id.is_empty()
                    && id
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
                if !valid {
                    return Err(StorageError::InvalidScope(format!(
                        "tenant id '{}' may only contain a-z, A-Z, 0-9, '_' and '-'",
                        id
                    )));
                }
                format!("tenant_{}.json", id)
            }
        };
        Ok(self.data_dir.join(file_name))
    }
}

#[async_trait]
impl StoreProvider for FileStoreProvider {
    async fn open(&self, scope: &StoreScope) -> Result<Arc<dyn CommandStore>, StorageError> {
        let mut stores = self.stores.lock().await;
        if let Some(store) = stores.get(scope) {
            return Ok(store.clone());
        }

        let store = Arc::new(FileStore::open(self.table_path(scope)?).await?);
        stores.insert(scope.clone(), Arc::clone(&store));
        Ok(store)
    }
}

/// Build the provider selected by `config`
pub fn create_store_provider(config: &StorageConfig) -> Arc<dyn StoreProvider> {
    match config.backend {
        StorageBackend::Memory => Arc::new(MemoryStoreProvider::new()),
        StorageBackend::File => Arc::new(FileStoreProvider::new(&config.data_dir)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::types::{CommandPath, CommandRecord, TenantId};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_memory_provider_reuses_tables() {
        let provider = MemoryStoreProvider::new();
        let scope = StoreScope::Tenant(TenantId::from("t1"));

        let first = provider.open(&scope).await.unwrap();
        let record = CommandRecord::new(CommandPath::from("greet"), "hi", TenantId::from("t1"));
        first.put("greet", &record).await.unwrap();

        let second = provider.open(&scope).await.unwrap();
        assert!(second.get("greet").await.unwrap().is_some());

        let global = provider.open(&StoreScope::Global).await.unwrap();
        assert!(global.get("greet").await.unwrap().is_none());
        assert_eq!(provider.store(&scope).unwrap().len().await, 1);
    }

    #[test]
    fn test_file_provider_table_paths() {
        let provider = FileStoreProvider::new("/data");
        assert_eq!(
            provider.table_path(&StoreScope::Global).unwrap(),
            PathBuf::from("/data/global.json")
        );
        assert_eq!(
            provider
                .table_path(&StoreScope::Tenant(TenantId::from(42u64)))
                .unwrap(),
            PathBuf::from("/data/tenant_42.json")
        );
        assert!(matches!(
            provider.table_path(&StoreScope::Tenant(TenantId::from("../etc"))),
            Err(StorageError::InvalidScope(_))
        ));
    }

    #[tokio::test]
    async fn test_file_provider_opens_files() {
        let dir = TempDir::new().unwrap();
        let provider = FileStoreProvider::new(dir.path());
        let store = provider.open(&StoreScope::Global).await.unwrap();
        let record = CommandRecord::builtin(CommandPath::from("ping"), "pong");
        store.put("ping", &record).await.unwrap();

        assert!(dir.path().join("global.json").exists());
    }

    #[test]
    fn test_create_store_provider_from_config() {
        let _memory = create_store_provider(&StorageConfig::memory());
        let _file = create_store_provider(&StorageConfig::file("./db"));
    }
}
