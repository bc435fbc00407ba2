//! Filesystem certificate discovery and parsing.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;
use x509_parser::certificate::X509Certificate;
use x509_parser::der_parser::asn1_rs::{Any, Tag};
use x509_parser::time::ASN1Time;
use x509_parser::x509::X509Name;

use certinv_core::{
    first_value, CanonicalCertificate, CertInvError, CertificateSource, DistinguishedName,
    Fingerprint, Result, ScanWarning, Validity, WarningKind,
};

use crate::report::ScanReport;
use crate::Scanner;

/// File extensions that are opened and parsed. Matched exactly.
pub const CERT_EXTENSIONS: &[&str] = &["pem", "crt", "cer"];

// X.520 attribute type OIDs.
const OID_COUNTRY: &str = "2.5.4.6";
const OID_ORGANIZATION: &str = "2.5.4.10";
const OID_ORGANIZATIONAL_UNIT: &str = "2.5.4.11";
const OID_LOCALITY: &str = "2.5.4.7";
const OID_PROVINCE: &str = "2.5.4.8";
const OID_STREET_ADDRESS: &str = "2.5.4.9";
const OID_POSTAL_CODE: &str = "2.5.4.17";
const OID_SERIAL_NUMBER: &str = "2.5.4.5";
const OID_COMMON_NAME: &str = "2.5.4.3";

/// What happened to a single visited file.
#[derive(Debug)]
pub enum FileOutcome {
    /// A leaf certificate was decoded
    Collected(Box<CanonicalCertificate>),
    /// Extension is not one of [`CERT_EXTENSIONS`]; the file was not opened
    SkippedExtension,
    /// The certificate is a CA and is left out of the inventory
    SkippedCa,
    /// The file could not be turned into a record
    Failed(ScanWarning),
}

/// Walks directory trees collecting leaf certificates.
#[derive(Debug, Clone, Default)]
pub struct FilesystemScanner {
    roots: Vec<PathBuf>,
}

impl FilesystemScanner {
    /// Create a scanner over the given root directories
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// Walk every root and collect leaf certificates.
    ///
    /// Never fails as a whole: unreadable files, files without PEM data and
    /// invalid certificates become warnings and the walk moves on.
    pub async fn scan_roots(&self) -> ScanReport {
        let mut report = ScanReport::new(CertificateSource::Filesystem);

        for root in &self.roots {
            let entries: Vec<_> = WalkDir::new(root).follow_links(false).into_iter().collect();

            for entry in entries {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        let path = e
                            .path()
                            .unwrap_or(root.as_path())
                            .display()
                            .to_string();
                        warn!(path = %path, error = %e, "directory walk error");
                        report
                            .warnings
                            .push(ScanWarning::new(path, WarningKind::WalkError, e.to_string()));
                        continue;
                    }
                };

                if !entry.file_type().is_file() {
                    continue;
                }

                match visit(entry.path()).await {
                    FileOutcome::Collected(cert) => report.certificates.push(*cert),
                    FileOutcome::SkippedExtension | FileOutcome::SkippedCa => {}
                    FileOutcome::Failed(warning) => report.warnings.push(warning),
                }
            }
        }

        info!(
            roots = self.roots.len(),
            collected = report.certificates.len(),
            skipped = report.warnings.len(),
            "filesystem scan complete"
        );
        report
    }
}

#[async_trait]
impl Scanner for FilesystemScanner {
    fn source(&self) -> CertificateSource {
        CertificateSource::Filesystem
    }

    async fn scan(&self) -> Result<ScanReport> {
        Ok(self.scan_roots().await)
    }
}

/// Decide what to do with one regular file.
pub async fn visit(path: &Path) -> FileOutcome {
    if !has_cert_extension(path) {
        return FileOutcome::SkippedExtension;
    }

    match read_certificate_file(path).await {
        Ok(Some(cert)) => FileOutcome::Collected(Box::new(cert)),
        Ok(None) => FileOutcome::SkippedCa,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "skipping cert file");
            FileOutcome::Failed(warning_for(path, &e))
        }
    }
}

/// Returns true if the file's extension is exactly one of [`CERT_EXTENSIONS`].
#[must_use]
pub fn has_cert_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| CERT_EXTENSIONS.contains(&ext))
}

/// Read a file and decode the certificate in its first PEM block.
///
/// Returns `Ok(None)` for CA certificates.
async fn read_certificate_file(path: &Path) -> Result<Option<CanonicalCertificate>> {
    let path_str = path.display().to_string();
    let content = tokio::fs::read(path)
        .await
        .map_err(|e| CertInvError::io(&path_str, e))?;

    // Bundles are not unpacked: only the first block counts.
    let block = pem::parse(&content).map_err(|e| CertInvError::PemDecode {
        path: path_str.clone(),
        reason: e.to_string(),
    })?;

    parse_certificate_der(block.contents(), &path_str)
}

/// Parse one DER-encoded certificate into a filesystem record.
///
/// Returns `Ok(None)` for CA certificates.
pub fn parse_certificate_der(
    der: &[u8],
    source_path: &str,
) -> Result<Option<CanonicalCertificate>> {
    let (rest, cert) = x509_parser::parse_x509_certificate(der).map_err(|e| {
        CertInvError::CertParse {
            path: source_path.to_string(),
            reason: e.to_string(),
        }
    })?;

    if is_ca(&cert) {
        debug!(path = source_path, "skipping CA certificate");
        return Ok(None);
    }

    // Hash the certificate itself, not any trailing bytes in the block.
    let raw = &der[..der.len() - rest.len()];

    Ok(Some(CanonicalCertificate {
        path: source_path.to_string(),
        source: CertificateSource::Filesystem,
        validity: Validity {
            valid_until: asn1_to_utc(cert.validity().not_after),
        },
        issuer: name_record(cert.issuer()),
        subject: name_record(cert.subject()),
        fingerprint: Fingerprint::from_der(raw),
    }))
}

fn is_ca(cert: &X509Certificate<'_>) -> bool {
    cert.basic_constraints()
        .map(|bc| bc.is_some_and(|ext| ext.value.ca))
        .unwrap_or(false)
}

/// Flatten an X.509 name, keeping the first value of each attribute.
fn name_record(name: &X509Name<'_>) -> DistinguishedName {
    DistinguishedName {
        country: first_attr(name, OID_COUNTRY),
        organization: first_attr(name, OID_ORGANIZATION),
        organizational_unit: first_attr(name, OID_ORGANIZATIONAL_UNIT),
        locality: first_attr(name, OID_LOCALITY),
        province: first_attr(name, OID_PROVINCE),
        street_address: first_attr(name, OID_STREET_ADDRESS),
        postal_code: first_attr(name, OID_POSTAL_CODE),
        serial_number: first_attr(name, OID_SERIAL_NUMBER),
        common_name: first_attr(name, OID_COMMON_NAME),
    }
}

/// The first attribute with `oid` wins even when its value cannot be decoded.
fn first_attr(name: &X509Name<'_>, oid: &str) -> String {
    first_value(
        name.iter_attributes()
            .filter(|attr| attr.attr_type().to_id_string() == oid)
            .map(|attr| decode_attr_value(attr.attr_value()).unwrap_or_default()),
    )
}

/// Decode a directory string in any of the encodings found in the wild.
fn decode_attr_value(value: &Any<'_>) -> Option<String> {
    let data = value.data;
    match value.header.tag() {
        Tag::Utf8String
        | Tag::PrintableString
        | Tag::NumericString
        | Tag::Ia5String
        | Tag::VisibleString => std::str::from_utf8(data).ok().map(str::to_owned),
        // T.61 is read as Latin-1
        Tag::T61String => Some(data.iter().copied().map(char::from).collect()),
        Tag::BmpString => {
            if data.len() % 2 != 0 {
                return None;
            }
            let units: Vec<u16> = data
                .chunks_exact(2)
                .map(|c| u16::from_be_bytes([c[0], c[1]]))
                .collect();
            String::from_utf16(&units).ok()
        }
        Tag::UniversalString => {
            if data.len() % 4 != 0 {
                return None;
            }
            data.chunks_exact(4)
                .map(|c| char::from_u32(u32::from_be_bytes([c[0], c[1], c[2], c[3]])))
                .collect()
        }
        _ => None,
    }
}

/// Convert an ASN.1 `GeneralizedTime` / `UTCTime` to `DateTime<Utc>`.
fn asn1_to_utc(t: ASN1Time) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(t.timestamp(), 0).single()
}

fn warning_for(path: &Path, err: &CertInvError) -> ScanWarning {
    let kind = match err {
        CertInvError::PemDecode { .. } => WarningKind::MissingPem,
        CertInvError::CertParse { .. } => WarningKind::InvalidCertificate,
        _ => WarningKind::Unreadable,
    };
    ScanWarning::new(path.display().to_string(), kind, err.to_string())
}
