//! Runtime command registry
//!
//! This module provides the registry that owns every tenant's command tree
//! plus the global tree, and mirrors custom commands into their stores.

mod builtins;
mod define;
mod flags;
mod lifecycle;
mod relocate;
mod scope;
mod types;


pub use crate::commands::types::AliasMode;
pub use builtins::HELP_COMMAND;
pub use types::{
    CommandRegistry, CommandSummary, DefineRequest, LoadReport, MoveReport, PersistWarning,
    SkippedRecord,
};
