//! Mutating commands: define, edit, move, remove and flag changes

use super::Session;
use crate::args::DetailArgs;
use anyhow::Result;
use cmdreg_core::{AliasMode, CommandAttributes, DefineRequest, PermissionLevel, Scope};

fn attributes(details: &DetailArgs) -> CommandAttributes {
    let mut attributes = CommandAttributes::new();
    if let Some(brief) = &details.brief {
        attributes.insert("brief", brief.as_str());
    }
    if let Some(help) = &details.help_text {
        attributes.insert("help", help.as_str());
    }
    if let Some(hidden) = details.hidden {
        attributes.insert("hidden", hidden);
    }
    attributes
}

pub async fn add(session: &Session, path: &str, template: String, details: &DetailArgs) -> Result<()> {
    let path = session.registry.parse_path(path);
    let mut request = DefineRequest::new(path, template).with_attributes(attributes(details));
    if let Some(level) = details.level {
        request = request.with_permission(level);
    }

    let record = session.registry.define(&session.tenant, request).await?;
    session
        .console
        .success(&format!("Defined '{}' ({})", record.name, record.scope));
    Ok(())
}

pub async fn group(
    session: &Session,
    path: &str,
    template: String,
    require_subcommand: bool,
    details: &DetailArgs,
) -> Result<()> {
    let path = session.registry.parse_path(path);
    let mut attributes = attributes(details);
    if require_subcommand {
        attributes.insert("invoke_without_command", false);
    }
    let mut request = DefineRequest::new(path, template)
        .group()
        .with_attributes(attributes);
    if let Some(level) = details.level {
        request = request.with_permission(level);
    }

    let record = session.registry.define(&session.tenant, request).await?;
    session
        .console
        .success(&format!("Defined group '{}' ({})", record.name, record.scope));
    Ok(())
}

pub async fn edit(
    session: &Session,
    path: &str,
    template: Option<String>,
    details: &DetailArgs,
) -> Result<()> {
    let path = session.registry.parse_path(path);
    let record = session
        .registry
        .update(&session.tenant, &path, template, attributes(details))
        .await?;
    if let Some(level) = details.level {
        session
            .registry
            .set_permission(&session.tenant, &path, level)
            .await?;
    }
    session.console.success(&format!("Updated '{}'", record.name));
    Ok(())
}

pub async fn rename(session: &Session, path: &str, new_path: &str) -> Result<()> {
    let path = session.registry.parse_path(path);
    let new_path = session.registry.parse_path(new_path);
    let report = session
        .registry
        .rename(&session.tenant, &path, &new_path)
        .await?;
    session.console.print_move("Renamed to", &report);
    Ok(())
}

pub async fn remove(session: &Session, path: &str) -> Result<()> {
    let path = session.registry.parse_path(path);
    let record = session.registry.remove(&session.tenant, &path).await?;
    session.console.success(&format!("Removed '{}'", record.name));
    Ok(())
}

pub async fn alias(session: &Session, path: &str, aliases: &[String], permissive: bool) -> Result<()> {
    let path = session.registry.parse_path(path);
    let added = if permissive {
        session
            .registry
            .add_aliases(&session.tenant, &path, aliases, AliasMode::Permissive)
            .await?
    } else {
        session
            .registry
            .add_aliases_default(&session.tenant, &path, aliases)
            .await?
    };

    if added.is_empty() {
        session.console.warn(&format!("No aliases added to '{}'", path));
    } else {
        session
            .console
            .success(&format!("Added aliases to '{}': {}", path, added.join(", ")));
    }
    Ok(())
}

pub async fn set_locked(session: &Session, path: &str, locked: bool) -> Result<()> {
    let path = session.registry.parse_path(path);
    let changed = session
        .registry
        .set_locked(&session.tenant, &path, locked)
        .await?;
    let state = if locked { "locked" } else { "unlocked" };
    if changed {
        session.console.success(&format!("'{}' is now {}", path, state));
    } else {
        session.console.warn(&format!("'{}' was already {}", path, state));
    }
    Ok(())
}

pub async fn set_scope(session: &Session, path: &str, target: Scope) -> Result<()> {
    let path = session.registry.parse_path(path);
    let report = session
        .registry
        .set_scope(&session.tenant, &path, target)
        .await?;
    session.console.print_move("Moved", &report);
    Ok(())
}

pub async fn set_permission(session: &Session, path: &str, level: PermissionLevel) -> Result<()> {
    let path = session.registry.parse_path(path);
    let changed = session
        .registry
        .set_permission(&session.tenant, &path, level)
        .await?;
    if changed {
        session
            .console
            .success(&format!("'{}' now requires level {}", path, level));
    } else {
        session
            .console
            .warn(&format!("'{}' already requires level {}", path, level));
    }
    Ok(())
}

pub async fn forget(session: &Session, purge: bool) -> Result<()> {
    let deleted = session
        .registry
        .remove_tenant(&session.tenant, purge)
        .await?;
    if purge {
        session.console.success(&format!(
            "Deleted {} stored command(s) of tenant '{}'",
            deleted, session.tenant
        ));
    } else {
        session
            .console
            .success(&format!("Unloaded tenant '{}'", session.tenant));
    }
    Ok(())
}
