//! Command storage
//!
//! Keyed tables of command records, one per tenant plus one global table.
//! The registry mirrors every custom command into the table of its scope.
//!
//! # Example
//! ```ignore
//! let provider = create_store_provider(&StorageConfig::file("./db"));
//! let store = provider.open(&StoreScope::Global).await?;
//! store.put("fun hug", &record).await?;
//! ```

pub mod backend;
pub mod config;
pub mod provider;

pub use backend::{CommandStore, FileStore, MemoryStore, StorageError, StoreProvider, StoreScope};
pub use config::{StorageBackend, StorageConfig};
pub use provider::{FileStoreProvider, MemoryStoreProvider, create_store_provider};
