//! Command execution

use tracing::debug;

use super::types::{Dispatcher, ResolvedCommand};
use crate::commands::registry::HELP_COMMAND;
use crate::error::{RegistryError, RegistryResult};
use crate::permission::Principal;
use crate::render::RenderError;

/// Check permission, then render the command's response
///
/// Never mutates the registry.
pub(super) async fn execute_command(
    dispatcher: &Dispatcher,
    resolved: &ResolvedCommand,
    principal: &Principal,
) -> RegistryResult<String> {
    let required = resolved.record.permission;
    let actual = dispatcher
        .permissions
        .resolve(&resolved.tenant, principal)
        .await;
    if actual < required {
        debug!(
            tenant = %resolved.tenant,
            principal = %principal,
            path = %resolved.path,
            "Command execution forbidden"
        );
        return Err(RegistryError::Forbidden {
            path: resolved.path.to_string(),
            required,
            actual,
        });
    }

    if resolved.builtin && resolved.path.len() == 1 && resolved.path.name() == HELP_COMMAND {
        return super::help::render_help(dispatcher, resolved);
    }

    if resolved.record.is_group && resolved.record.template.trim().is_empty() {
        return Ok(super::help::group_help(resolved));
    }

    dispatcher
        .renderer
        .render(&resolved.record.template, &resolved.args)
        .map_err(|e| match e {
            RenderError::MissingArgument { expected, supplied } => RegistryError::ArgumentCount {
                path: resolved.path.to_string(),
                expected,
                supplied,
            },
            other => RegistryError::Render(other),
        })
}
