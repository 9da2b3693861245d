//! Invocation resolution

use super::types::{Dispatcher, ResolvedCommand, SubcommandSummary};
use crate::commands::tree::{CommandTree, NodeId};
use crate::commands::types::{CommandPath, TenantId};
use crate::error::{RegistryError, RegistryResult};

/// Walk the local tree, then the global tree, consuming matching tokens
///
/// The first token picks the tree. Descent stops at a leaf or at a group
/// with no child matching the next token; such a group answers itself
/// unless it requires a subcommand.
pub(super) fn resolve_command(
    dispatcher: &Dispatcher,
    tenant: &TenantId,
    tokens: &[String],
) -> RegistryResult<ResolvedCommand> {
    let Some(first) = tokens.first() else {
        return Err(RegistryError::not_found(&CommandPath::root()));
    };

    let (local, global) = dispatcher.registry.snapshot(tenant);
    for tree in [&local, &global] {
        let Some(start) = tree.child(tree.root(), first) else {
            continue;
        };
        return walk(tree, tenant, start, tokens);
    }

    Err(RegistryError::not_found(&CommandPath::new([first.as_str()])))
}

fn walk(
    tree: &CommandTree,
    tenant: &TenantId,
    start: NodeId,
    tokens: &[String],
) -> RegistryResult<ResolvedCommand> {
    let mut current = start;
    let mut consumed = 1;
    while consumed < tokens.len() {
        let is_group = tree.node(current).is_some_and(|node| node.is_group());
        if !is_group {
            break;
        }
        match tree.child(current, &tokens[consumed]) {
            Some(next) => {
                current = next;
                consumed += 1;
            }
            None => break,
        }
    }

    let path = tree.qualified_path(current);
    let node = tree
        .node(current)
        .ok_or_else(|| RegistryError::internal("resolved a dangling node"))?;
    let record = node
        .record()
        .cloned()
        .ok_or_else(|| RegistryError::not_found(&path))?;

    if record.is_group && !record.attributes.invoke_without_command() {
        let attempted = match tokens.get(consumed) {
            Some(next) => path.child(next.clone()),
            None => path,
        };
        return Err(RegistryError::not_found(&attempted));
    }

    let subcommands = tree
        .children(current)
        .into_iter()
        .filter_map(|(_, child)| child.record())
        .filter(|child| !child.attributes.is_hidden())
        .map(|child| SubcommandSummary {
            name: child.name.name().to_string(),
            aliases: child.aliases(),
            brief: child
                .attributes
                .brief()
                .or_else(|| child.attributes.help())
                .map(str::to_string),
        })
        .collect();

    Ok(ResolvedCommand {
        tenant: tenant.clone(),
        path,
        builtin: node.entry().is_builtin(),
        record,
        subcommands,
        consumed,
        args: tokens[consumed..].to_vec(),
    })
}
