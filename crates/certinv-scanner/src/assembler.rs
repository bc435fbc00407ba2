//! Merging scanner output into one inventory event.

use tracing::{error, info};

use certinv_core::{FailedSource, Inventory, InventorySources, ScanSummary, SenderInfo};

use crate::Scanner;

/// Runs every configured scanner in turn and assembles the results.
///
/// A failing source is recorded in the summary; it never discards what the
/// other sources found.
pub struct InventoryAssembler {
    sender: SenderInfo,
    scanners: Vec<Box<dyn Scanner>>,
}

impl InventoryAssembler {
    /// Create an assembler with no sources
    #[must_use]
    pub const fn new(sender: SenderInfo) -> Self {
        Self {
            sender,
            scanners: Vec::new(),
        }
    }

    /// Add a source. Sources run in the order they were added.
    #[must_use]
    pub fn with_scanner(mut self, scanner: impl Scanner + 'static) -> Self {
        self.scanners.push(Box::new(scanner));
        self
    }

    /// Number of configured sources
    #[must_use]
    pub fn len(&self) -> usize {
        self.scanners.len()
    }

    /// Returns true if no source is configured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scanners.is_empty()
    }

    /// Scan every source sequentially and build the inventory.
    pub async fn assemble(&self) -> Inventory {
        let mut certificates = Vec::new();
        let mut summary = ScanSummary::default();

        for scanner in &self.scanners {
            let source = scanner.source();
            match scanner.scan().await {
                Ok(report) => {
                    info!(source = %source, collected = report.len(), "source scanned");
                    certificates.extend(report.certificates);
                    summary.skipped.extend(report.warnings);
                }
                Err(e) => {
                    error!(source = %source, error = %e, "source scan failed");
                    summary.failed_sources.push(FailedSource {
                        source,
                        error: e.to_string(),
                    });
                }
            }
        }

        summary.collected = certificates.len();

        Inventory {
            sources: InventorySources { certificates },
            sender_info: self.sender.clone(),
            scan_summary: summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ScanReport;
    use async_trait::async_trait;
    use certinv_core::{
        CanonicalCertificate, CertInvError, CertificateSource, DistinguishedName, Fingerprint,
        Result, ScanWarning, Validity, WarningKind,
    };

    enum Canned {
        Found(ScanReport),
        Down,
    }

    struct CannedScanner {
        source: CertificateSource,
        outcome: Canned,
    }

    #[async_trait]
    impl Scanner for CannedScanner {
        fn source(&self) -> CertificateSource {
            self.source
        }

        async fn scan(&self) -> Result<ScanReport> {
            match &self.outcome {
                Canned::Found(report) => Ok(report.clone()),
                Canned::Down => Err(CertInvError::Connection("connection refused".into())),
            }
        }
    }

    fn record(path: &str, source: CertificateSource) -> CanonicalCertificate {
        CanonicalCertificate {
            path: path.into(),
            source,
            validity: Validity::default(),
            issuer: DistinguishedName::default(),
            subject: DistinguishedName::from_common_name(path),
            fingerprint: Fingerprint::from_der(path.as_bytes()),
        }
    }

    fn sender() -> SenderInfo {
        SenderInfo {
            hostname: "node1".into(),
            client_version: "1.2.0".into(),
        }
    }

    #[tokio::test]
    async fn merges_sources_in_order() {
        let mut fs = ScanReport::new(CertificateSource::Filesystem);
        fs.certificates.push(record("/etc/ssl/a.pem", CertificateSource::Filesystem));
        fs.warnings.push(ScanWarning::new(
            "/etc/ssl/b.pem",
            WarningKind::MissingPem,
            "no PEM data",
        ));
        let mut remote = ScanReport::new(CertificateSource::RemoteApi);
        remote.certificates.push(record("/Common/x.crt", CertificateSource::RemoteApi));

        let assembler = InventoryAssembler::new(sender())
            .with_scanner(CannedScanner {
                source: CertificateSource::Filesystem,
                outcome: Canned::Found(fs),
            })
            .with_scanner(CannedScanner {
                source: CertificateSource::RemoteApi,
                outcome: Canned::Found(remote),
            });

        let inventory = assembler.assemble().await;

        let paths: Vec<_> = inventory.certificates().iter().map(|c| c.path.as_str()).collect();
        assert_eq!(paths, ["/etc/ssl/a.pem", "/Common/x.crt"]);
        assert_eq!(inventory.scan_summary.collected, 2);
        assert_eq!(inventory.scan_summary.skipped.len(), 1);
        assert!(inventory.scan_summary.is_complete());
        assert_eq!(inventory.sender_info.hostname, "node1");
    }

    #[tokio::test]
    async fn failed_source_keeps_other_results() {
        let mut fs = ScanReport::new(CertificateSource::Filesystem);
        fs.certificates.push(record("/etc/ssl/a.pem", CertificateSource::Filesystem));

        let inventory = InventoryAssembler::new(sender())
            .with_scanner(CannedScanner {
                source: CertificateSource::Filesystem,
                outcome: Canned::Found(fs),
            })
            .with_scanner(CannedScanner {
                source: CertificateSource::RemoteApi,
                outcome: Canned::Down,
            })
            .assemble()
            .await;

        assert_eq!(inventory.count_from(CertificateSource::Filesystem), 1);
        assert_eq!(inventory.count_from(CertificateSource::RemoteApi), 0);
        assert_eq!(inventory.scan_summary.failed_sources.len(), 1);
        let failed = &inventory.scan_summary.failed_sources[0];
        assert_eq!(failed.source, CertificateSource::RemoteApi);
        assert!(failed.error.contains("connection refused"));
    }

    #[tokio::test]
    async fn no_sources_yields_empty_inventory() {
        let assembler = InventoryAssembler::new(sender());
        assert!(assembler.is_empty());
        let inventory = assembler.assemble().await;
        assert!(inventory.certificates().is_empty());
        assert_eq!(inventory.scan_summary, ScanSummary::default());
    }
}
