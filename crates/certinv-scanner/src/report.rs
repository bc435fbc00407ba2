//! Per-source scan results.

use certinv_core::{CanonicalCertificate, CertificateSource, ScanWarning};

/// Everything one scanner produced in one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    /// Source that was scanned
    pub source: CertificateSource,
    /// Collected records, in discovery order
    pub certificates: Vec<CanonicalCertificate>,
    /// Items that were skipped or only partially understood
    pub warnings: Vec<ScanWarning>,
}

impl ScanReport {
    /// An empty report for `source`
    #[must_use]
    pub const fn new(source: CertificateSource) -> Self {
        Self {
            source,
            certificates: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Number of collected certificates
    #[must_use]
    pub fn len(&self) -> usize {
        self.certificates.len()
    }

    /// Returns true if no certificate was collected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.certificates.is_empty()
    }
}
