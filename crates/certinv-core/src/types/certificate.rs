//! The canonical certificate record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::name::DistinguishedName;
use crate::fingerprint::Fingerprint;

/// Where a certificate record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CertificateSource {
    /// Found on the local filesystem
    Filesystem,
    /// Reported by the load balancer's management API
    RemoteApi,
}

impl CertificateSource {
    /// Stable lowercase name, as serialized
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Filesystem => "filesystem",
            Self::RemoteApi => "remote-api",
        }
    }
}

impl fmt::Display for CertificateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validity window of a certificate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Validity {
    /// Expiration instant; `None` when the source reported an unreadable value
    pub valid_until: Option<DateTime<Utc>>,
}

/// One inventoried certificate, independent of the source it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalCertificate {
    /// Filesystem path, or the remote source's logical identifier
    pub path: String,
    /// Provenance tag
    pub source: CertificateSource,
    /// Validity window
    pub validity: Validity,
    /// Issuer name
    pub issuer: DistinguishedName,
    /// Subject name
    pub subject: DistinguishedName,
    /// SHA-256 of the DER encoding, lowercase hex
    pub fingerprint: Fingerprint,
}

impl CanonicalCertificate {
    /// Expiration instant, if known
    #[must_use]
    pub const fn valid_until(&self) -> Option<DateTime<Utc>> {
        self.validity.valid_until
    }
}
