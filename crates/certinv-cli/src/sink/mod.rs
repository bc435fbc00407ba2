//! Inventory delivery.

mod http;

pub use http::HttpSink;

use async_trait::async_trait;
use certinv_core::{CertInvError, Inventory, Result};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::DestinationConfig;

/// What a sink reports back after a successful delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// Human-readable destination
    pub destination: String,
    /// Size of the delivered payload
    pub bytes: usize,
    /// Identifier assigned by the receiving side, if any
    pub id: Option<String>,
}

/// A place an assembled inventory can be delivered to.
#[async_trait]
pub trait InventorySink: Send + Sync {
    /// Deliver one inventory
    async fn deliver(&self, inventory: &Inventory) -> Result<DeliveryReceipt>;
}

/// Build the sink described by the configuration.
pub fn from_config(
    destination: &DestinationConfig,
    client_version: &str,
) -> Result<Box<dyn InventorySink>> {
    Ok(match destination {
        DestinationConfig::Stdout => Box::new(StdoutSink),
        DestinationConfig::File { path } => Box::new(FileSink::new(path.clone())),
        DestinationConfig::Http { url, timeout_secs } => Box::new(HttpSink::new(
            url,
            client_version,
            Duration::from_secs(*timeout_secs),
        )?),
    })
}

/// Prints the inventory as pretty JSON.
pub struct StdoutSink;

#[async_trait]
impl InventorySink for StdoutSink {
    async fn deliver(&self, inventory: &Inventory) -> Result<DeliveryReceipt> {
        let body = serde_json::to_string_pretty(inventory)?;
        println!("{body}");
        Ok(DeliveryReceipt {
            destination: "stdout".into(),
            bytes: body.len(),
            id: None,
        })
    }
}

/// Writes the inventory as JSON to a file, replacing previous content.
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Create a sink writing to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl InventorySink for FileSink {
    async fn deliver(&self, inventory: &Inventory) -> Result<DeliveryReceipt> {
        let body = inventory.to_json()?;
        let path_str = self.path.display().to_string();

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CertInvError::io(parent.display().to_string(), e))?;
        }

        tokio::fs::write(&self.path, &body)
            .await
            .map_err(|e| CertInvError::io(&path_str, e))?;

        Ok(DeliveryReceipt {
            destination: path_str,
            bytes: body.len(),
            id: None,
        })
    }
}
