//! HTTP collector sink.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use std::time::Duration;
use tracing::debug;

use certinv_core::{CertInvError, Inventory, Result};

use super::{DeliveryReceipt, InventorySink};

/// Header carrying the agent version on every delivery
pub const CLIENT_VERSION_HEADER: &str = "X-Client-Version";

/// POSTs the inventory as JSON to a collector URL.
pub struct HttpSink {
    http: HttpClient,
    url: String,
    client_version: String,
}

impl HttpSink {
    /// Create a sink for `url`
    pub fn new(url: &str, client_version: &str, timeout: Duration) -> Result<Self> {
        url::Url::parse(url).map_err(|e| CertInvError::InvalidUrl(format!("{url}: {e}")))?;

        let http = HttpClient::builder()
            .timeout(timeout)
            .user_agent(format!("certinv/{client_version}"))
            .build()
            .map_err(|e| CertInvError::Http(e.to_string()))?;

        Ok(Self {
            http,
            url: url.to_string(),
            client_version: client_version.to_string(),
        })
    }
}

#[async_trait]
impl InventorySink for HttpSink {
    async fn deliver(&self, inventory: &Inventory) -> Result<DeliveryReceipt> {
        let body = inventory.to_json()?;
        debug!(url = %self.url, bytes = body.len(), "POST inventory");

        let response = self
            .http
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(CLIENT_VERSION_HEADER, self.client_version.as_str())
            .body(body.clone())
            .send()
            .await
            .map_err(|e| CertInvError::Sink(e.to_string()))?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(CertInvError::Sink(format!(
                "collector returned {}: {text}",
                status.as_u16()
            )));
        }

        // Collectors may acknowledge with {"id": "..."}
        let id = serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .and_then(|v| v.get("id").and_then(|id| id.as_str()).map(String::from));

        Ok(DeliveryReceipt {
            destination: self.url.clone(),
            bytes: body.len(),
            id,
        })
    }
}
