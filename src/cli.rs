//! Command-line argument definitions.
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Top-level CLI entry point for the about dashboard.
#[derive(Parser, Debug)]
#[command(
    name = "about",
    about = "Resolve the sections and integrations of the about dashboard",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Dashboard configuration file (defaults to ./about.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the dashboard context
    Dashboard(DashboardOpts),
    /// List the integrations the dashboard defers
    Scan(ScanOpts),
    /// Validate the configuration
    Check,
    /// Print version information
    Version,
}

/// Output format of the `dashboard` subcommand.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// The full context as pretty-printed JSON.
    #[default]
    Json,
    /// A human-readable outline of the sections.
    Text,
}

/// Options for the `dashboard` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct DashboardOpts {
    /// JSON document with the gathered facts
    #[arg(short, long)]
    pub facts: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// Options for the `scan` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ScanOpts {
    /// JSON document with the gathered facts
    #[arg(short, long)]
    pub facts: PathBuf,
}
