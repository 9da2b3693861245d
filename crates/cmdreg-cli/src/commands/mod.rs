//! Subcommand handlers

pub mod inspect;
pub mod manage;
pub mod run;

use crate::console::CliConsole;
use cmdreg_core::{CommandRegistry, TenantId};
use std::sync::Arc;

/// Everything a handler needs: the loaded registry, the tenant and the console
pub struct Session {
    pub registry: Arc<CommandRegistry>,
    pub tenant: TenantId,
    pub console: CliConsole,
}
