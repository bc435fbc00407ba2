//! # certinv-scanner
//!
//! Certificate discovery for certinv.
//!
//! Two sources, one record schema:
//!
//! - [`FilesystemScanner`] walks directory trees and decodes `.pem`, `.crt`
//!   and `.cer` files, skipping CA certificates.
//! - [`RemoteApiScanner`] lists the certificates an F5 BIG-IP holds through
//!   its iControl REST API.
//!
//! Both produce [`CanonicalCertificate`](certinv_core::CanonicalCertificate)
//! records whose fingerprints are textually comparable.
//!
//! ## Data Flow
//!
//! ```text
//! FilesystemScanner ─┐
//!                    ├─> ScanReport (records + warnings) / ScanError
//! RemoteApiScanner ──┘
//!        │
//!        └─> InventoryAssembler -> Inventory (+ SenderInfo, ScanSummary)
//! ```

pub mod assembler;
pub mod filesystem;
pub mod remote;
pub mod report;

pub use assembler::InventoryAssembler;
pub use filesystem::{FileOutcome, FilesystemScanner, CERT_EXTENSIONS};
pub use remote::{RemoteApiScanner, RemoteApiScannerBuilder, CERT_LIST_PATH};
pub use report::ScanReport;

use async_trait::async_trait;
use certinv_core::{CertificateSource, Result};

/// A single certificate source.
///
/// Implementors run one best-effort pass and either return everything they
/// found, with per-item warnings, or fail as a whole.
#[async_trait]
pub trait Scanner: Send + Sync {
    /// Which source this scanner reads
    fn source(&self) -> CertificateSource;

    /// Run one scan
    async fn scan(&self) -> Result<ScanReport>;
}
