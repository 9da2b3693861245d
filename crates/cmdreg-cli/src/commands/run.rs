//! Execute an invocation through the dispatcher

use super::Session;
use anyhow::Result;
use cmdreg_core::permission::FixedPermissionResolver;
use cmdreg_core::{Dispatcher, PermissionLevel, Principal};
use std::sync::Arc;

/// Principal name used for invocations from the terminal
const CLI_PRINCIPAL: &str = "cli";

pub async fn run(session: &Session, level: PermissionLevel, input: &[String]) -> Result<()> {
    let dispatcher = Dispatcher::new(
        Arc::clone(&session.registry),
        Arc::new(FixedPermissionResolver(level)),
    );

    let resolved = dispatcher.resolve(&session.tenant, input)?;
    session.console.info(&format!(
        "Resolved '{}' with {} argument(s)",
        resolved.path,
        resolved.args.len()
    ));
    let reply = dispatcher
        .execute(&resolved, &Principal::from(CLI_PRINCIPAL))
        .await?;
    println!("{}", reply);
    Ok(())
}
