//! Command dispatcher
//!
//! Resolves invocation tokens against a tenant's trees and executes the
//! matching command: permission check, then template rendering.

mod execute;
mod help;
mod resolve;
mod types;


pub use types::{Dispatcher, ResolvedCommand, SubcommandSummary};
