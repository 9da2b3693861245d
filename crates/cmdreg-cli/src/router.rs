//! Command routing logic for CLI

use crate::args::{Cli, Commands};
use crate::commands::{Session, inspect, manage, run};
use crate::console::CliConsole;
use anyhow::{Context, Result};
use cmdreg_core::{CommandRegistry, Config, Scope, TenantId};
use std::sync::Arc;
use tracing::debug;

/// Build the registry for the selected tenant and run one subcommand
pub async fn route(cli: Cli, config: Config) -> Result<()> {
    if let Commands::Config = cli.command {
        return inspect::config(&config);
    }

    let session = open_session(&cli, &config).await?;
    match cli.command {
        Commands::Add {
            path,
            template,
            details,
        } => manage::add(&session, &path, template, &details).await,
        Commands::Group {
            path,
            template,
            require_subcommand,
            details,
        } => manage::group(&session, &path, template, require_subcommand, &details).await,
        Commands::Edit {
            path,
            template,
            details,
        } => manage::edit(&session, &path, template, &details).await,
        Commands::Rename { path, new_path } => manage::rename(&session, &path, &new_path).await,
        Commands::Rm { path } => manage::remove(&session, &path).await,
        Commands::Alias {
            path,
            aliases,
            permissive,
        } => manage::alias(&session, &path, &aliases, permissive).await,
        Commands::Lock { path } => manage::set_locked(&session, &path, true).await,
        Commands::Unlock { path } => manage::set_locked(&session, &path, false).await,
        Commands::Global { path } => manage::set_scope(&session, &path, Scope::Global).await,
        Commands::Unglobal { path } => manage::set_scope(&session, &path, Scope::Local).await,
        Commands::Perm { path, level } => manage::set_permission(&session, &path, level).await,
        Commands::Show { path } => inspect::show(&session, &path),
        Commands::List { long } => inspect::list(&session, long),
        Commands::Run { level, input } => run::run(&session, level, &input).await,
        Commands::Forget { purge } => manage::forget(&session, purge).await,
        Commands::Config => inspect::config(&config),
    }
}

/// Register built-ins and load the global and tenant tables
async fn open_session(cli: &Cli, config: &Config) -> Result<Session> {
    let console = CliConsole::new(cli.verbose);
    let registry = Arc::new(CommandRegistry::from_config(config));
    registry
        .register_builtins()
        .await
        .context("registering built-in commands")?;

    let global = registry
        .load_global()
        .await
        .context("loading global commands")?;
    let tenant = TenantId::from(cli.tenant.as_str());
    let local = registry
        .load_tenant(&tenant)
        .await
        .with_context(|| format!("loading commands of tenant '{}'", tenant))?;

    for skipped in global.skipped.iter().chain(&local.skipped) {
        console.warn(&format!("Skipped stored command '{}': {}", skipped.key, skipped.reason));
    }
    debug!(
        tenant = %tenant,
        global = global.loaded,
        local = local.loaded,
        data_dir = %config.storage.data_dir.display(),
        "Session opened"
    );
    console.info(&format!(
        "Loaded {} global and {} local command(s)",
        global.loaded, local.loaded
    ));

    Ok(Session {
        registry,
        tenant,
        console,
    })
}
