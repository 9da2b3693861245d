//! Command type definitions
//!
//! Identifiers, paths and the persisted record shared by the tree, the
//! registry and the dispatcher.

mod access;
mod path;
mod record;

pub use access::{AliasMode, PermissionLevel, Scope};
pub use path::{CommandPath, TenantId};
pub use record::{CommandAttributes, CommandRecord};

#[cfg(test)]
mod tests;
