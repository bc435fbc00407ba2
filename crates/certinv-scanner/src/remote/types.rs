//! F5 iControl REST response types and their canonical conversion.

use serde::Deserialize;

use certinv_core::{
    first_value, CanonicalCertificate, CertificateSource, DistinguishedName, Fingerprint,
    ScanWarning, Validity, WarningKind,
};

use super::expiration::parse_expiration;

/// Body of `GET /mgmt/tm/sys/crypto/cert`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct F5CertResponse {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub self_link: String,
    #[serde(default)]
    pub items: Vec<F5Certificate>,
}

/// One certificate as the F5 reports it.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct F5Certificate {
    #[serde(default)]
    pub full_path: String,
    #[serde(default)]
    pub api_raw_values: F5RawValues,
    #[serde(default)]
    pub common_name: String,
    #[serde(default)]
    pub country: String,
    /// `SHA256/AA:BB:...`
    #[serde(default)]
    pub fingerprint: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub ou: String,
}

/// Unformatted values nested under `apiRawValues`.
#[derive(Debug, Default, Deserialize)]
pub struct F5RawValues {
    /// `Jan _2 15:04:05 2006 MST`
    #[serde(default)]
    pub expiration: String,
    /// Issuer as a single string
    #[serde(default)]
    pub issuer: String,
}

impl F5Certificate {
    /// Convert to a canonical record.
    ///
    /// An unparsable expiration keeps the record, with an unknown expiration,
    /// and returns a warning alongside it.
    pub fn into_canonical(self) -> (CanonicalCertificate, Option<ScanWarning>) {
        let valid_until = parse_expiration(&self.api_raw_values.expiration);
        let warning = valid_until.is_none().then(|| {
            ScanWarning::new(
                self.full_path.clone(),
                WarningKind::UnparsableExpiration,
                format!(
                    "unparsable expiration {:?}",
                    self.api_raw_values.expiration
                ),
            )
        });

        let cert = CanonicalCertificate {
            path: self.full_path,
            source: CertificateSource::RemoteApi,
            validity: Validity { valid_until },
            issuer: DistinguishedName::from_common_name(self.api_raw_values.issuer),
            subject: DistinguishedName {
                country: first_value(self.country.split(',').map(str::trim)),
                organization: self.organization,
                organizational_unit: self.ou,
                common_name: self.common_name,
                ..Default::default()
            },
            fingerprint: Fingerprint::normalize(&self.fingerprint),
        };

        (cert, warning)
    }
}
