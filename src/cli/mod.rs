//! CLI definitions using clap.

use crate::error::Error;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for list/query commands.
#[derive(ValueEnum, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table (default)
    #[default]
    Table,
    /// JSON (same as --json)
    Json,
}

pub mod commands;

/// Belongings - keep track of what you own and what it is worth
#[derive(Parser, Debug)]
#[command(name = "bl", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database path. Without it: ~/.belongings/test/items.db when
    /// BELONGINGS_TEST_DB is set, else $BELONGINGS_DB, else
    /// ~/.belongings/data/items.db
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// How long to wait on a locked database, in milliseconds
    #[arg(long, global = true, env = "BELONGINGS_BUSY_TIMEOUT_MS")]
    pub busy_timeout_ms: Option<u64>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Output format (table, json)
    #[arg(long, value_enum, global = true, default_value_t)]
    pub format: OutputFormat,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode: no logs or confirmations, add/edit print only the ID.
    /// Errors are still reported.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the item database
    Init {
        /// Recreate the database if it already exists
        #[arg(long)]
        force: bool,

        /// Start without the example items
        #[arg(long)]
        empty: bool,
    },

    /// Print version information
    Version,

    /// Add an item
    Add(AddArgs),

    /// List items, newest purchase first
    List {
        /// Only show items in this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Change fields of an existing item
    Edit(EditArgs),

    /// Delete an item
    Delete {
        /// ID of the item to delete
        id: String,
    },

    /// Show item count, items added this month and the 6-month value trend
    Stats,

    /// List the available categories
    Categories,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ============================================================================
// Item Commands
// ============================================================================

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Item name
    pub name: String,

    /// Category id (see `bl categories`)
    #[arg(short, long)]
    pub category: String,

    /// Purchase price
    #[arg(short, long)]
    pub price: String,

    /// Status: in-use, sold, retired (default: in-use)
    #[arg(short, long)]
    pub status: Option<String>,

    /// Purchase date as YYYY-MM-DD (default: today)
    #[arg(long)]
    pub date: Option<String>,

    /// Free-form description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Path or URI of a photo of the item
    #[arg(long)]
    pub image: Option<String>,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// ID of the item to change
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New category id
    #[arg(short, long)]
    pub category: Option<String>,

    /// New purchase price
    #[arg(short, long)]
    pub price: Option<String>,

    /// New status: in-use, sold, retired
    #[arg(short, long)]
    pub status: Option<String>,

    /// New purchase date as YYYY-MM-DD
    #[arg(long)]
    pub date: Option<String>,

    /// New description (empty string clears it)
    #[arg(short, long)]
    pub description: Option<String>,

    /// New photo path (empty string clears it)
    #[arg(long)]
    pub image: Option<String>,
}

/// Render an error for stderr: structured JSON, or the message plus hint.
#[must_use]
pub fn error_report(err: &Error, json: bool) -> String {
    if json {
        return err.to_structured_json().to_string();
    }
    match err.hint() {
        Some(hint) => format!("Error: {err}\n  Hint: {hint}"),
        None => format!("Error: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_report_includes_hint() {
        let report = error_report(&Error::NotInitialized, false);
        assert!(report.starts_with("Error: Not initialized"));
        assert!(report.contains("Hint: Run `bl init`"));

        let report = error_report(&Error::Other("boom".into()), false);
        assert_eq!(report, "Error: boom");
    }

    #[test]
    fn test_error_report_json() {
        let report = error_report(&Error::NotInitialized, true);
        let value: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert_eq!(value["error"]["code"], "NOT_INITIALIZED");
    }

    #[test]
    fn test_quiet_flag_parses_globally() {
        let cli = Cli::try_parse_from(["bl", "add", "Lamp", "-c", "furniture", "-p", "20", "-q"])
            .unwrap();
        assert!(cli.quiet);
    }
}
