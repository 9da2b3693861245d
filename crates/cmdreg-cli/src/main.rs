//! cmdreg CLI application
//!
//! Manage and run the custom commands of one tenant from the terminal.
//!
//! # Installation
//!
//! ```bash
//! cargo install --path crates/cmdreg-cli
//! ```
//!
//! # Usage
//!
//! ```bash
//! cmdreg --tenant g1 add greet "Hello, {}!"
//! cmdreg --tenant g1 run greet Bot        # Hello, Bot!
//! cmdreg --tenant g1 global greet         # visible to every tenant
//! cmdreg --tenant g2 list
//! ```
//!
//! Configuration is read from `cmdreg.toml` (or `--config`), then
//! `CMDREG_*` environment variables. `--data-dir` wins over both.

mod args;
mod commands;
mod console;
mod logging;
mod router;

use anyhow::Context;
use clap::Parser;
use console::CliConsole;

pub use args::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config =
        cmdreg_core::load_config(cli.config.as_deref()).context("loading configuration")?;
    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = dir.clone();
    }
    logging::init(&config.logging, cli.verbose);

    let verbose = cli.verbose;
    if let Err(e) = router::route(cli, config).await {
        CliConsole::new(verbose).error(&format!("{:#}", e));
        std::process::exit(1);
    }
    Ok(())
}
