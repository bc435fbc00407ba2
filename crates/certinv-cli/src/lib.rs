//! # certinv-cli
//!
//! Command-line entry point for the certinv agent.
//!
//! ## Features
//!
//! - **Scanning**: local certificate trees and F5 BIG-IP certificate stores
//! - **Delivery**: stdout, file, or HTTP collector
//! - **Inspection**: `list` and `count` subcommands for dry runs

pub mod cli;
pub mod config;
pub mod sink;

pub use cli::run;
