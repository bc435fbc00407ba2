//! Agent configuration.
//!
//! Read from TOML, or JSON when the file ends in `.json`. Every section is
//! optional; a missing source section disables that source. Unknown keys are
//! rejected so a misspelled setting cannot silently disable a source.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default configuration file location.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/certinv/config.toml";

/// Environment variable overriding the remote API password.
pub const PASSWORD_ENV: &str = "CERTINV_REMOTE_PASSWORD";

/// Agent configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Where to look for certificates.
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Where to send the inventory.
    #[serde(default)]
    pub destination: DestinationConfig,

    /// Sender identity overrides.
    #[serde(default)]
    pub agent: AgentConfig,
}

/// Certificate sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourcesConfig {
    #[serde(default)]
    pub filesystem: FilesystemConfig,

    #[serde(default)]
    pub remote_api: RemoteApiConfig,
}

/// Local directory scanning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilesystemConfig {
    /// Root directories walked recursively.
    #[serde(default)]
    pub scan_paths: Vec<PathBuf>,
}

/// F5 iControl REST endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteApiConfig {
    /// Base URL, e.g. `https://bigip.internal`. Empty disables the source.
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub user: String,

    #[serde(default)]
    pub password: String,

    /// Skip TLS verification (self-signed management certificates).
    #[serde(default)]
    pub accept_invalid_certs: bool,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RemoteApiConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            user: String::new(),
            password: String::new(),
            accept_invalid_certs: false,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl RemoteApiConfig {
    /// Request timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Inventory destination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase", deny_unknown_fields)]
pub enum DestinationConfig {
    /// Print the inventory
    #[default]
    Stdout,

    /// Write the inventory to a file
    File { path: PathBuf },

    /// POST the inventory to a collector
    Http {
        url: String,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
}

/// Sender identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Reported hostname; looked up from the system when unset.
    #[serde(default)]
    pub hostname: Option<String>,
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load configuration from `path`.
    ///
    /// A missing or malformed file is an error: nothing is scanned without
    /// a valid configuration.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("error loading config {}", path.display()))?;

        let config = if path.extension().is_some_and(|e| e == "json") {
            Self::from_json(&content)
        } else {
            Self::from_toml(&content)
        }
        .with_context(|| format!("error decoding config {}", path.display()))?;

        Ok(config.with_password_override(std::env::var(PASSWORD_ENV).ok()))
    }

    /// Parse TOML configuration
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Parse JSON configuration
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Replace the remote API password when an override is present.
    #[must_use]
    pub fn with_password_override(mut self, password: Option<String>) -> Self {
        if let Some(password) = password.filter(|p| !p.is_empty()) {
            self.sources.remote_api.password = password;
        }
        self
    }
}
