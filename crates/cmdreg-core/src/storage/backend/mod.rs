//! Store backend implementations
//!
//! Provides the keyed-table interface with in-memory and JSON file
//! implementations.

mod file;
mod memory;
#[allow(clippy::module_inception)]
mod r#trait;
mod types;


// Re-export all public APIs
pub use file::FileStore;
pub use memory::MemoryStore;
pub use r#trait::{CommandStore, StoreProvider};
pub use types::{StorageError, StoreScope};
