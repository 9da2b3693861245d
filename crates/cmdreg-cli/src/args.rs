//! CLI argument definitions using clap
//!
//! Every registry operation maps to one subcommand:
//! - cmdreg add "fun hug" "*hugs {}*"     # define a command
//! - cmdreg group fun                      # define a group
//! - cmdreg run fun hug Bot                # execute as the tenant would
//! - cmdreg list                           # visible commands

use clap::{Parser, Subcommand};
use cmdreg_core::PermissionLevel;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cmdreg")]
#[command(about = "Manage and run per-tenant custom commands")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (TOML, YAML or JSON)
    #[arg(long, env = "CMDREG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the command tables; overrides the config file
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Tenant the command operates on
    #[arg(long, short, env = "CMDREG_TENANT", default_value = "default")]
    pub tenant: String,

    /// Print progress details
    #[arg(long, short)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Define a command
    Add {
        /// Command path, segments split by the configured separator
        path: String,
        /// Response template with `{}` or `{N}` placeholders
        template: String,
        #[command(flatten)]
        details: DetailArgs,
    },

    /// Define a command group
    Group {
        path: String,
        /// Response when invoked without a subcommand; empty shows group help
        #[arg(default_value = "")]
        template: String,
        /// Refuse invocation without a subcommand
        #[arg(long)]
        require_subcommand: bool,
        #[command(flatten)]
        details: DetailArgs,
    },

    /// Change a command's template or attributes
    Edit {
        path: String,
        /// New response template
        #[arg(long)]
        template: Option<String>,
        #[command(flatten)]
        details: DetailArgs,
    },

    /// Move a command and its subcommands to a new path
    Rename { path: String, new_path: String },

    /// Delete a command without subcommands
    Rm { path: String },

    /// Add aliases to a command
    Alias {
        path: String,
        #[arg(required = true)]
        aliases: Vec<String>,
        /// Drop colliding aliases instead of failing
        #[arg(long)]
        permissive: bool,
    },

    /// Lock a command against edits
    Lock { path: String },

    /// Unlock a command
    Unlock { path: String },

    /// Make a command visible to every tenant
    Global { path: String },

    /// Move a global command back into the tenant
    Unglobal { path: String },

    /// Set the level needed to run a command (0-3 or public/moderator/admin/owner)
    Perm {
        path: String,
        #[arg(value_parser = parse_level)]
        level: PermissionLevel,
    },

    /// Show one command as stored
    Show { path: String },

    /// List the commands visible to the tenant
    List {
        /// Include the permission level and scope of each command
        #[arg(long)]
        long: bool,
    },

    /// Execute an invocation as a chat message would
    Run {
        /// Level the caller holds
        #[arg(long, default_value = "owner", value_parser = parse_level)]
        level: PermissionLevel,
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        input: Vec<String>,
    },

    /// Forget the tenant's commands
    Forget {
        /// Also delete the tenant's stored records
        #[arg(long)]
        purge: bool,
    },

    /// Print the effective configuration
    Config,
}

/// Optional descriptive attributes shared by add, group and edit
#[derive(clap::Args, Debug, Default, Clone)]
pub struct DetailArgs {
    /// One-line description shown in listings
    #[arg(long)]
    pub brief: Option<String>,

    /// Longer text shown by `help <command>`
    #[arg(long = "help-text")]
    pub help_text: Option<String>,

    /// Hide the command from listings
    #[arg(long)]
    pub hidden: Option<bool>,

    /// Level needed to run the command
    #[arg(long, value_parser = parse_level)]
    pub level: Option<PermissionLevel>,
}

/// Parse a permission level given as a number or a name
pub fn parse_level(input: &str) -> Result<PermissionLevel, String> {
    let level = match input.trim().to_lowercase().as_str() {
        "public" => PermissionLevel::Public,
        "moderator" | "mod" => PermissionLevel::Moderator,
        "admin" => PermissionLevel::Admin,
        "owner" => PermissionLevel::Owner,
        other => {
            let value: u8 = other
                .parse()
                .map_err(|_| format!("invalid permission level '{}'", input))?;
            PermissionLevel::try_from(value).map_err(|e| e.to_string())?
        }
    };
    Ok(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("2"), Ok(PermissionLevel::Admin));
        assert_eq!(parse_level("Owner"), Ok(PermissionLevel::Owner));
        assert_eq!(parse_level("mod"), Ok(PermissionLevel::Moderator));
        assert!(parse_level("4").is_err());
        assert!(parse_level("root").is_err());
    }

    #[test]
    fn test_run_collects_trailing_input() {
        let cli = Cli::try_parse_from(["cmdreg", "--tenant", "g1", "run", "fun", "hug", "Bot"])
            .unwrap();
        assert_eq!(cli.tenant, "g1");
        match cli.command {
            Commands::Run { level, input } => {
                assert_eq!(level, PermissionLevel::Owner);
                assert_eq!(input, vec!["fun", "hug", "Bot"]);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_alias_flags() {
        let cli = Cli::try_parse_from(["cmdreg", "alias", "greet", "hi", "hey", "--permissive"])
            .unwrap();
        match cli.command {
            Commands::Alias {
                path,
                aliases,
                permissive,
            } => {
                assert_eq!(path, "greet");
                assert_eq!(aliases, vec!["hi", "hey"]);
                assert!(permissive);
            }
            _ => panic!("expected alias"),
        }
    }

    #[test]
    fn test_alias_requires_names() {
        assert!(Cli::try_parse_from(["cmdreg", "alias", "greet"]).is_err());
    }
}
