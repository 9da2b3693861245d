//! Runtime command system
//!
//! This module provides per-tenant command trees that can be edited while
//! the system runs, and the dispatcher that answers invocations.
//!
//! # Overview
//!
//! Commands are text responses addressed by a path of names, for example
//! `fun hug`. A command may be a group holding subcommands. Every tenant has
//! its own local tree; a single global tree is visible to every tenant.
//!
//! # Lookup Order
//!
//! When a tenant invokes a command:
//! 1. The tenant's local tree
//! 2. The global tree (built-in commands and shared custom commands)
//!
//! ## Templates
//!
//! - `{}` - Next positional argument
//! - `{0}`, `{1}`, etc. - Argument by index
//! - `{{` and `}}` - Literal braces
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use cmdreg_core::commands::{CommandRegistry, DefineRequest, Dispatcher};
//! use cmdreg_core::permission::StaticPermissionResolver;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(CommandRegistry::from_config(&config));
//! registry.register_builtins().await?;
//! registry.define(&tenant, DefineRequest::new("greet", "Hello, {}!")).await?;
//!
//! let dispatcher = Dispatcher::new(registry, Arc::new(StaticPermissionResolver::new()));
//! let reply = dispatcher.dispatch(&tenant, &principal, "greet Bot").await?;
//! assert_eq!(reply, "Hello, Bot!");
//! ```
//!
//! # Built-in Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `help [command...]` | List commands or describe one |
//! | `ping` | Check that the bot responds |

pub mod dispatcher;
pub mod registry;
pub mod tree;
pub mod types;

pub use dispatcher::{Dispatcher, ResolvedCommand, SubcommandSummary};
pub use registry::{
    AliasMode, CommandRegistry, CommandSummary, DefineRequest, HELP_COMMAND, LoadReport,
    MoveReport, PersistWarning, SkippedRecord,
};
pub use tree::{CommandNode, CommandTree, NodeEntry, NodeId, Subtree, TreeError};
pub use types::{
    CommandAttributes, CommandPath, CommandRecord, PermissionLevel, Scope, TenantId,
};
