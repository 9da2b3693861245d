//! CLI console utilities

use cmdreg_core::commands::{CommandSummary, MoveReport, PermissionLevel, Scope};
use colored::*;

/// CLI console for formatted output
pub struct CliConsole {
    verbose: bool,
}

impl CliConsole {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Print an info message, only in verbose mode
    pub fn info(&self, message: &str) {
        if self.verbose {
            println!("{} {}", "ℹ".blue().bold(), message);
        }
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", "✓".green().bold(), message.green());
    }

    pub fn warn(&self, message: &str) {
        println!("{} {}", "⚠".yellow().bold(), message.yellow());
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red().bold(), message.red());
    }

    pub fn print_header(&self, title: &str) {
        println!();
        println!("{}", title.bold().underline());
        println!("{}", "=".repeat(title.len()).dimmed());
    }

    /// Print the outcome of a rename or scope change
    pub fn print_move(&self, verb: &str, report: &MoveReport) {
        let mut message = format!("{} '{}' ({})", verb, report.path, report.scope);
        if report.moved > 0 {
            message.push_str(&format!(" with {} subcommand(s)", report.moved));
        }
        self.success(&message);
        for warning in &report.warnings {
            self.warn(&format!(
                "{} store, key '{}': {}",
                warning.scope, warning.key, warning.message
            ));
        }
    }

    /// Print one listing row, indented by depth
    pub fn print_summary(&self, summary: &CommandSummary, long: bool) {
        let indent = "  ".repeat(summary.path.len().saturating_sub(1));
        let name = if summary.is_group {
            summary.path.name().cyan().bold()
        } else {
            summary.path.name().bold()
        };

        let mut line = format!("{}{}", indent, name);
        if !summary.aliases.is_empty() {
            line.push_str(&format!(" [{}]", summary.aliases.join(", ")).dimmed().to_string());
        }
        if summary.locked {
            line.push_str(&format!(" {}", "locked".red()));
        }
        if long {
            let scope = match (summary.builtin, summary.scope) {
                (true, _) => "builtin".magenta(),
                (false, Scope::Global) => "global".blue(),
                (false, Scope::Local) => "local".normal(),
            };
            line.push_str(&format!(" {}", scope));
            if summary.permission > PermissionLevel::Public {
                line.push_str(&format!(" {}", summary.permission.to_string().yellow()));
            }
        }
        if let Some(brief) = &summary.brief {
            line.push_str(&format!("  {}", brief.dimmed()));
        }
        println!("{}", line);
    }
}
