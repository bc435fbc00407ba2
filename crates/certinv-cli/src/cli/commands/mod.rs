//! Command implementations.

pub mod count;
pub mod list;
pub mod scan;

use anyhow::{Context as _, Result};
use certinv_core::{Inventory, SenderInfo};
use certinv_scanner::{FilesystemScanner, InventoryAssembler, RemoteApiScanner};
use colored::Colorize;
use tracing::warn;

use crate::config::Config;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Loaded configuration
    pub config: Config,

    /// Version reported in sender info
    pub client_version: String,

    /// Verbose output
    pub verbose: bool,

    /// Disable colors
    pub no_color: bool,
}

impl Context {
    /// Build the assembler for every configured source.
    ///
    /// Filesystem first, then the remote API.
    pub fn assembler(&self) -> Result<InventoryAssembler> {
        let sources = &self.config.sources;
        let remote = &sources.remote_api;

        let remote_scanner =
            RemoteApiScanner::builder(&remote.url, &remote.user, &remote.password)
                .timeout(remote.timeout())
                .accept_invalid_certs(remote.accept_invalid_certs)
                .build()
                .context("invalid remote API configuration")?;

        Ok(InventoryAssembler::new(self.sender_info())
            .with_scanner(FilesystemScanner::new(sources.filesystem.scan_paths.iter()))
            .with_scanner(remote_scanner))
    }

    /// Scan every source and assemble the inventory.
    pub async fn collect(&self) -> Result<Inventory> {
        let inventory = self.assembler()?.assemble().await;
        self.report_failures(&inventory);
        Ok(inventory)
    }

    fn sender_info(&self) -> SenderInfo {
        SenderInfo {
            hostname: self
                .config
                .agent
                .hostname
                .clone()
                .unwrap_or_else(lookup_hostname),
            client_version: self.client_version.clone(),
        }
    }

    /// Failed sources don't abort the run, but the operator should see them.
    fn report_failures(&self, inventory: &Inventory) {
        for failed in &inventory.scan_summary.failed_sources {
            let line = format!("source {} failed: {}", failed.source, failed.error);
            if self.no_color {
                eprintln!("{line}");
            } else {
                eprintln!("{}", line.red());
            }
        }
    }
}

fn lookup_hostname() -> String {
    hostname::get().map_or_else(
        |e| {
            warn!(error = %e, "error acquiring hostname");
            "unknown".to_string()
        },
        |h| h.to_string_lossy().into_owned(),
    )
}
