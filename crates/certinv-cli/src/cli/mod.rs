//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Agent version reported with every inventory.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // Nothing is scanned without a valid configuration
    let config = Config::load(&cli.config)?;

    let ctx = commands::Context {
        config,
        client_version: CLIENT_VERSION.to_string(),
        verbose: cli.verbose,
        no_color: cli.no_color,
    };

    match cli.command {
        Commands::Scan => commands::scan::execute(ctx).await,
        Commands::List => commands::list::execute(ctx).await,
        Commands::Count => commands::count::execute(ctx).await,
    }
}

/// Install the tracing subscriber. Logs go to stderr so stdout stays clean
/// for inventory output.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,certinv_core={level},certinv_scanner={level},certinv_cli={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
