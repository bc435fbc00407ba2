//! Certificate inventory types.

pub mod certificate;
pub mod inventory;
pub mod name;

pub use certificate::{CanonicalCertificate, CertificateSource, Validity};
pub use inventory::{
    FailedSource, Inventory, InventorySources, ScanSummary, ScanWarning, SenderInfo, WarningKind,
};
pub use name::{first_value, DistinguishedName};
