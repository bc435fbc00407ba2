//! Source-independent certificate fingerprints.
//!
//! A fingerprint is the SHA-256 digest of a certificate's DER encoding,
//! written as lowercase hex with no separators and no algorithm tag. The
//! filesystem scanner computes it from DER bytes; the remote API reports it
//! as `SHA256/AA:BB:...`. Both must yield the same text for the same
//! certificate.

use ring::digest::{digest, SHA256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Algorithm tag the F5 REST API puts in front of its fingerprints.
const VENDOR_PREFIX: &str = "SHA256/";

/// Length of a hex-encoded SHA-256 digest.
pub const SHA256_HEX_LEN: usize = 64;

/// Canonical certificate identity key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute the fingerprint of raw DER certificate bytes.
    #[must_use]
    pub fn from_der(der: &[u8]) -> Self {
        let hash = digest(&SHA256, der);
        Self(hex::encode(hash.as_ref()))
    }

    /// Normalize a vendor-formatted fingerprint.
    ///
    /// Strips the `SHA256/` tag, drops every `:` and lowercases the rest.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        let stripped = raw.replace(VENDOR_PREFIX, "");
        let mut fp: String = stripped.chars().filter(|c| *c != ':').collect();
        fp.make_ascii_lowercase();
        Self(fp)
    }

    /// Whether this is a full-length SHA-256 hex digest.
    #[must_use]
    pub fn is_sha256(&self) -> bool {
        self.0.len() == SHA256_HEX_LEN
            && self
                .0
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    }

    /// Borrow the hex string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for Fingerprint {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
