//! `certinv count` - Per-source certificate counts.

use anyhow::Result;
use colored::Colorize;

use certinv_core::{CertificateSource, Inventory};

use super::Context;

pub async fn execute(ctx: Context) -> Result<()> {
    let inventory = ctx.collect().await?;

    for (label, value) in rows(&inventory) {
        if ctx.no_color {
            println!("{label:<12} {value}");
        } else {
            println!("{} {}", format!("{label:<12}").bold(), value.cyan());
        }
    }

    if ctx.verbose {
        for warning in &inventory.scan_summary.skipped {
            println!("  {} {} ({})", warning.kind, warning.path, warning.message);
        }
    }

    Ok(())
}

fn rows(inventory: &Inventory) -> Vec<(&'static str, String)> {
    vec![
        (
            "filesystem",
            inventory.count_from(CertificateSource::Filesystem).to_string(),
        ),
        (
            "remote-api",
            inventory.count_from(CertificateSource::RemoteApi).to_string(),
        ),
        ("skipped", inventory.scan_summary.skipped.len().to_string()),
        (
            "failed",
            inventory.scan_summary.failed_sources.len().to_string(),
        ),
    ]
}
