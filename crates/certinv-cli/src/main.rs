//! certinv - certificate inventory agent
//!
//! Scans local certificate files and an F5 load balancer, then ships the
//! inventory to the configured destination.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    certinv_cli::run().await
}
