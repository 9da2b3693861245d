//! Help output for groups and the built-in help command

use std::fmt::Write;

use super::types::{Dispatcher, ResolvedCommand, SubcommandSummary};
use crate::error::RegistryResult;

/// `help` lists top-level commands; `help <command...>` describes one command
pub(super) fn render_help(
    dispatcher: &Dispatcher,
    resolved: &ResolvedCommand,
) -> RegistryResult<String> {
    if resolved.args.is_empty() {
        let top_level: Vec<SubcommandSummary> = dispatcher
            .registry
            .list(&resolved.tenant)
            .into_iter()
            .filter(|summary| summary.path.len() == 1)
            .map(|summary| SubcommandSummary {
                name: summary.path.name().to_string(),
                aliases: summary.aliases,
                brief: summary.brief,
            })
            .collect();

        let mut out = String::from("Commands:");
        write_entries(&mut out, &top_level);
        return Ok(out);
    }

    let target = dispatcher.resolve(&resolved.tenant, &resolved.args)?;
    Ok(describe(&target))
}

/// Help for a group that has no response of its own
pub(super) fn group_help(resolved: &ResolvedCommand) -> String {
    describe(resolved)
}

fn describe(resolved: &ResolvedCommand) -> String {
    let attributes = &resolved.record.attributes;
    let mut out = resolved.path.to_string();
    if let Some(usage) = attributes.get_str("usage") {
        let _ = write!(out, "\nUsage: {}", usage);
    }
    if let Some(help) = attributes.help().or_else(|| attributes.brief()) {
        let _ = write!(out, "\n{}", help);
    }
    let aliases = resolved.record.aliases();
    if !aliases.is_empty() {
        let _ = write!(out, "\nAliases: {}", aliases.join(", "));
    }
    if !resolved.subcommands.is_empty() {
        out.push_str("\n\nSubcommands:");
        write_entries(&mut out, &resolved.subcommands);
    }
    out
}

fn write_entries(out: &mut String, entries: &[SubcommandSummary]) {
    let width = entries.iter().map(|entry| entry.name.len()).max().unwrap_or(0);
    for entry in entries {
        match &entry.brief {
            Some(brief) => {
                let _ = write!(out, "\n  {:width$}  {}", entry.name, brief, width = width);
            }
            None => {
                let _ = write!(out, "\n  {}", entry.name);
            }
        }
    }
}
