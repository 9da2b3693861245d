//! Built-in command registration

use super::types::CommandRegistry;
use crate::commands::types::{CommandAttributes, CommandPath, CommandRecord};
use crate::error::RegistryResult;

/// Name of the built-in help command
pub const HELP_COMMAND: &str = "help";

impl CommandRegistry {
    /// Register the default built-in commands
    pub async fn register_builtins(&self) -> RegistryResult<()> {
        // Help command; the dispatcher renders the listing itself
        self.register_builtin(
            CommandRecord::builtin(CommandPath::from(HELP_COMMAND), "").with_attributes(
                CommandAttributes::new()
                    .with("brief", "Show available commands")
                    .with("usage", "help [command...]"),
            ),
        )
        .await?;

        // Ping command
        self.register_builtin(
            CommandRecord::builtin(CommandPath::from("ping"), "pong")
                .with_attributes(CommandAttributes::new().with("brief", "Check that the bot responds")),
        )
        .await?;

        Ok(())
    }
}
