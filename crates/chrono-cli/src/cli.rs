//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// Chrono CLI - Turn free-form schedule text into events and tasks.
#[derive(Debug, Parser)]
#[command(name = "chrono")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "CHRONO_CONFIG")]
    pub config: Option<String>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs and titles only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract events and tasks from a schedule description
    Extract(ExtractArgs),

    /// List stored calendar events
    Events(EventsArgs),

    /// List stored tasks
    Tasks,

    /// Manage provider profiles
    Profile(ProfileArgs),

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Schedule description (words are joined with spaces)
    pub text: Vec<String>,

    /// Read the description from a file
    #[arg(long, conflicts_with = "stdin")]
    pub file: Option<String>,

    /// Read the description from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Show extracted items without saving them
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the events command.
#[derive(Debug, Parser)]
pub struct EventsArgs {
    /// Start of the range (YYYY-MM-DD or RFC 3339; default: now)
    #[arg(long)]
    pub from: Option<String>,

    /// End of the range (YYYY-MM-DD or RFC 3339; default: 7 days after start)
    #[arg(long)]
    pub to: Option<String>,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// Chat completions endpoint URL
        #[arg(short, long)]
        endpoint: String,
        /// Model override
        #[arg(short, long)]
        model: Option<String>,
        /// Environment variable holding the API key
        #[arg(long)]
        api_key_env: Option<String>,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
