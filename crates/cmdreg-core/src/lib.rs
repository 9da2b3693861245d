//! cmdreg Core Library
//!
//! This crate provides a multi-tenant runtime command registry: tenants
//! define, edit, alias, nest and share text commands while the system runs,
//! and a dispatcher resolves invocations against them and renders responses.

pub mod commands;
pub mod config;
pub mod error;
pub mod permission;
pub mod render;
pub mod storage;

// Re-export commonly used types
pub use commands::{
    AliasMode, CommandAttributes, CommandPath, CommandRecord, CommandRegistry, CommandSummary,
    CommandTree, DefineRequest, Dispatcher, LoadReport, MoveReport, PermissionLevel,
    PersistWarning, ResolvedCommand, Scope, TenantId,
};
pub use config::{Config, LoggingConfig, RegistryConfig, load_config};
pub use error::{RegistryError, RegistryResult};
pub use permission::{PermissionResolver, Principal, StaticPermissionResolver};
pub use render::{PositionalRenderer, RenderError, ResponseRenderer};
pub use storage::{CommandStore, StorageConfig, StorageError, StoreProvider, StoreScope};
