//! Core types for the certinv certificate inventory agent.
//!
//! This crate provides the foundational types shared by every scanner:
//!
//! - **Types**: the [`CanonicalCertificate`] record and the assembled [`Inventory`] event
//! - **Fingerprints**: the source-independent [`Fingerprint`] identity key
//! - **Errors**: error handling with [`CertInvError`]
//!
//! # Example
//!
//! ```rust,ignore
//! use certinv_core::{CanonicalCertificate, Fingerprint};
//!
//! fn same_cert(local: &CanonicalCertificate, vendor_fp: &str) -> bool {
//!     local.fingerprint == Fingerprint::normalize(vendor_fp)
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/certinv-core/1.2.0")]

mod error;
pub mod fingerprint;
pub mod types;

pub use error::{CertInvError, Result};
pub use fingerprint::Fingerprint;
pub use types::*;
