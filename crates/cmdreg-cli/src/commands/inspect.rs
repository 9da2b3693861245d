//! Read-only commands

use super::Session;
use anyhow::{Result, anyhow};
use cmdreg_core::Config;

pub fn list(session: &Session, long: bool) -> Result<()> {
    let commands = session.registry.list(&session.tenant);
    session
        .console
        .print_header(&format!("Commands of '{}'", session.tenant));
    if commands.is_empty() {
        session.console.warn("No commands");
        return Ok(());
    }
    for summary in &commands {
        session.console.print_summary(summary, long);
    }
    Ok(())
}

pub fn show(session: &Session, path: &str) -> Result<()> {
    let path = session.registry.parse_path(path);
    let record = session
        .registry
        .get(&session.tenant, &path)
        .ok_or_else(|| anyhow!("command '{}' not found", path))?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

pub fn config(config: &Config) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
