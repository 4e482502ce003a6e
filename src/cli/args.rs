//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    claim::ClaimCommands, completions::CompletionsArgs, dashboard::DashboardArgs,
    food::FoodCommands, import::ImportArgs, init::InitArgs, provider::ProviderCommands,
    receiver::ReceiverCommands, report::ReportCommands,
};

#[derive(Parser)]
#[command(name = "fwms")]
#[command(author, version, about = "Food Wastage Management dashboard")]
#[command(long_about = "Browse and maintain a database of food providers, receivers, donated listings and claims, with summary metrics and charts.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// SQLite database file (default: config `database`, then food_wastage.db)
    #[arg(long, global = true, env = "FWMS_DB")]
    pub db: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the Providers, Receivers, Food and Claims tables
    Init(InitArgs),

    /// Bulk-load rows from a CSV file
    Import(ImportArgs),

    /// Show metrics, filtered tables and charts
    Dashboard(DashboardArgs),

    /// Food provider management
    #[command(subcommand)]
    Provider(ProviderCommands),

    /// Food listing management
    #[command(subcommand)]
    Food(FoodCommands),

    /// Receiver listing (read-only)
    #[command(subcommand)]
    Receiver(ReceiverCommands),

    /// Claim listing (read-only)
    #[command(subcommand)]
    Claim(ClaimCommands),

    /// Generate chart data as markdown tables
    #[command(subcommand)]
    Report(ReportCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (tsv for lists, text for the dashboard)
    #[default]
    Auto,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// Just IDs, one per line
    Id,
}

impl OutputFormat {
    /// Resolve `auto` against a configured default, then against `fallback`
    pub fn resolve(self, configured: Option<&str>, fallback: OutputFormat) -> OutputFormat {
        if self != OutputFormat::Auto {
            return self;
        }
        match configured.and_then(|s| OutputFormat::from_str(s, true).ok()) {
            Some(OutputFormat::Auto) | None => fallback,
            Some(format) => format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_resolve_explicit_wins() {
        assert_eq!(
            OutputFormat::Csv.resolve(Some("json"), OutputFormat::Tsv),
            OutputFormat::Csv
        );
    }

    #[test]
    fn test_resolve_uses_configured_default() {
        assert_eq!(
            OutputFormat::Auto.resolve(Some("JSON"), OutputFormat::Tsv),
            OutputFormat::Json
        );
        assert_eq!(
            OutputFormat::Auto.resolve(Some("bogus"), OutputFormat::Tsv),
            OutputFormat::Tsv
        );
        assert_eq!(OutputFormat::Auto.resolve(None, OutputFormat::Md), OutputFormat::Md);
    }
}
