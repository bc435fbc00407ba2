//! The assembled inventory event handed to a sink.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::certificate::{CanonicalCertificate, CertificateSource};

/// Why a scanned artifact did not produce a complete record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WarningKind {
    /// File could not be read
    Unreadable,
    /// File contained no PEM block
    MissingPem,
    /// PEM payload was not a valid X.509 certificate
    InvalidCertificate,
    /// Directory traversal reported an error for this path
    WalkError,
    /// Expiration string from the remote source could not be parsed;
    /// the record was kept with an unknown expiration
    UnparsableExpiration,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unreadable => "unreadable",
            Self::MissingPem => "missing PEM",
            Self::InvalidCertificate => "invalid certificate",
            Self::WalkError => "walk error",
            Self::UnparsableExpiration => "unparsable expiration",
        };
        f.write_str(s)
    }
}

/// A recoverable problem with a single scanned item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanWarning {
    /// File path or remote identifier of the item
    pub path: String,
    /// Category
    pub kind: WarningKind,
    /// Human-readable detail
    pub message: String,
}

impl ScanWarning {
    /// Create a warning
    pub fn new(path: impl Into<String>, kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
        }
    }
}

/// A source whose scan failed as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedSource {
    /// Which source failed
    pub source: CertificateSource,
    /// Error description
    pub error: String,
}

/// Outcome bookkeeping for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    /// Number of certificate records in the inventory
    pub collected: usize,
    /// Items that were skipped or only partially understood
    #[serde(default)]
    pub skipped: Vec<ScanWarning>,
    /// Sources that could not be scanned at all
    #[serde(default)]
    pub failed_sources: Vec<FailedSource>,
}

impl ScanSummary {
    /// Returns true if every configured source was scanned
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed_sources.is_empty()
    }
}

/// Identity of the agent that produced an inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SenderInfo {
    /// Hostname of the scanning node
    pub hostname: String,
    /// Agent version
    pub client_version: String,
}

/// Certificates grouped under the event's `sources` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySources {
    /// All collected certificates, in scan order
    #[serde(default)]
    pub certificates: Vec<CanonicalCertificate>,
}

/// Everything collected in one run, plus metadata about the sender.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    /// Collected records
    pub sources: InventorySources,
    /// Sender metadata
    pub sender_info: SenderInfo,
    /// What went wrong along the way
    #[serde(default)]
    pub scan_summary: ScanSummary,
}

impl Inventory {
    /// Borrow the collected certificates
    #[must_use]
    pub fn certificates(&self) -> &[CanonicalCertificate] {
        &self.sources.certificates
    }

    /// Number of certificates from the given source
    #[must_use]
    pub fn count_from(&self, source: CertificateSource) -> usize {
        self.sources
            .certificates
            .iter()
            .filter(|c| c.source == source)
            .count()
    }

    /// Serialize the event as compact JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
