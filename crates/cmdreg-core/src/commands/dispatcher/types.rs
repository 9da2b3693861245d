//! Core types for the dispatcher

use std::sync::Arc;

use crate::commands::registry::CommandRegistry;
use crate::commands::types::{CommandPath, CommandRecord, TenantId};
use crate::error::RegistryResult;
use crate::permission::{PermissionResolver, Principal};
use crate::render::{PositionalRenderer, ResponseRenderer};

/// A command matched by [`Dispatcher::resolve`]
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCommand {
    pub tenant: TenantId,
    /// Canonical path of the matched command
    pub path: CommandPath,
    pub record: CommandRecord,
    pub builtin: bool,
    /// Visible subcommands, for group help
    pub subcommands: Vec<SubcommandSummary>,
    /// Number of invocation tokens that named the command
    pub consumed: usize,
    /// Remaining tokens, passed as positional arguments
    pub args: Vec<String>,
}

/// Short description of a subcommand
#[derive(Debug, Clone, PartialEq)]
pub struct SubcommandSummary {
    pub name: String,
    pub aliases: Vec<String>,
    pub brief: Option<String>,
}

/// Interprets invocations against the registry
pub struct Dispatcher {
    pub(super) registry: Arc<CommandRegistry>,
    pub(super) permissions: Arc<dyn PermissionResolver>,
    pub(super) renderer: Arc<dyn ResponseRenderer>,
}

impl Dispatcher {
    /// Create a dispatcher with the positional renderer
    pub fn new(registry: Arc<CommandRegistry>, permissions: Arc<dyn PermissionResolver>) -> Self {
        Self {
            registry,
            permissions,
            renderer: Arc::new(PositionalRenderer::new()),
        }
    }

    /// Use a different response renderer
    pub fn with_renderer(mut self, renderer: Arc<dyn ResponseRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    /// Find the command named by the leading tokens, local tree first
    pub fn resolve(&self, tenant: &TenantId, tokens: &[String]) -> RegistryResult<ResolvedCommand> {
        super::resolve::resolve_command(self, tenant, tokens)
    }

    /// Run a resolved command for `principal` and return the response text
    pub async fn execute(
        &self,
        resolved: &ResolvedCommand,
        principal: &Principal,
    ) -> RegistryResult<String> {
        super::execute::execute_command(self, resolved, principal).await
    }

    /// Tokenize, resolve and execute one raw invocation
    pub async fn dispatch(
        &self,
        tenant: &TenantId,
        principal: &Principal,
        input: &str,
    ) -> RegistryResult<String> {
        let tokens = Self::tokenize(input);
        let resolved = self.resolve(tenant, &tokens)?;
        self.execute(&resolved, principal).await
    }

    /// Split input with shell-style quoting, falling back to whitespace
    pub fn tokenize(input: &str) -> Vec<String> {
        shell_words::split(input)
            .unwrap_or_else(|_| input.split_whitespace().map(str::to_string).collect())
    }
}
