//! `certinv scan` - Scan and deliver the inventory.

use anyhow::{Context as _, Result};
use tracing::info;

use super::Context;
use crate::sink;

pub async fn execute(ctx: Context) -> Result<()> {
    let sink = sink::from_config(&ctx.config.destination, &ctx.client_version)
        .context("invalid destination configuration")?;

    let inventory = ctx.collect().await?;

    let receipt = sink
        .deliver(&inventory)
        .await
        .context("error sending inventory")?;

    info!(
        destination = %receipt.destination,
        id = receipt.id.as_deref().unwrap_or("-"),
        certificates = inventory.scan_summary.collected,
        bytes = receipt.bytes,
        "inventory sent successfully"
    );

    Ok(())
}
