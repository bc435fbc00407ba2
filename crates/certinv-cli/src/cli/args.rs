//! Command-line argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_PATH;

/// Certificate inventory agent
///
/// Collects X.509 certificates from local directories and an F5 load
/// balancer, normalizes them and ships the inventory.
#[derive(Parser, Debug)]
#[command(name = "certinv")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file (TOML, or JSON with a .json extension)
    #[arg(short, long, env = "CERTINV_CONFIG", default_value = DEFAULT_CONFIG_PATH, global = true)]
    pub config: PathBuf,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan all sources and deliver the inventory to the configured destination
    Scan,

    /// Scan all sources and print the inventory as JSON
    List,

    /// Scan all sources and print how many certificates each produced
    Count,
}
