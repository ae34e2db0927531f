//! Chrono CLI - Turn free-form schedule text into calendar events and tasks.

use chrono_cli::commands;
use chrono_cli::repl;
use chrono_cli::{Cli, Command, Config, Formatter};
use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

async fn run(cli: Cli) -> chrono_cli::Result<()> {
    // Load or create config
    let mut config = match &cli.config {
        Some(path) => Config::load_from(Path::new(path))?,
        None => Config::load()?,
    };

    // Override profile if specified
    if let Some(profile_name) = cli.profile {
        config.switch_profile(profile_name)?;
    }

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        None | Some(Command::Repl) => {
            repl::run_repl(&mut config, &formatter).await?;
        }
        Some(Command::Extract(args)) => {
            commands::execute_extract(args, &config, &formatter).await?;
        }
        Some(Command::Events(args)) => {
            commands::execute_events(args, &config, &formatter).await?;
        }
        Some(Command::Tasks) => {
            commands::execute_tasks(&config, &formatter).await?;
        }
        Some(Command::Profile(args)) => {
            commands::execute_profile(args, &mut config, &formatter).await?;
        }
    }

    Ok(())
}
