use serde::{Deserialize, Serialize};

/// Structured issuer or subject name.
///
/// Every attribute holds at most one value. Absent attributes are empty
/// strings and are left out of the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistinguishedName {
    /// Country code (C)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub country: String,

    /// Organization (O)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub organization: String,

    /// Organizational unit (OU)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub organizational_unit: String,

    /// Locality (L)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub locality: String,

    /// State or province (ST)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub province: String,

    /// Street address
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub street_address: String,

    /// Postal code
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub postal_code: String,

    /// Subject serial number attribute (not the certificate serial)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub serial_number: String,

    /// Common name (CN)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub common_name: String,
}

impl DistinguishedName {
    /// A name carrying only a common name.
    #[must_use]
    pub fn from_common_name(cn: impl Into<String>) -> Self {
        Self {
            common_name: cn.into(),
            ..Self::default()
        }
    }

    /// Returns true if no attribute is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Collapse a multi-valued attribute to its first value.
///
/// Returns an empty string when there are no values.
pub fn first_value<I, S>(values: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .next()
        .map(|v| v.as_ref().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_value_keeps_first() {
        assert_eq!(first_value(["US", "CA"]), "US");
        assert_eq!(first_value(vec!["CA".to_string(), "US".to_string()]), "CA");
    }

    #[test]
    fn first_value_of_nothing_is_empty() {
        assert_eq!(first_value(Vec::<&str>::new()), "");
    }

    #[test]
    fn empty_fields_are_omitted() {
        let name = DistinguishedName {
            country: "US".into(),
            common_name: "example.com".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&name).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "country": "US", "commonName": "example.com" })
        );
    }

    #[test]
    fn missing_fields_deserialize_as_empty() {
        let name: DistinguishedName =
            serde_json::from_str(r#"{ "organizationalUnit": "Ops" }"#).unwrap();
        assert_eq!(name.organizational_unit, "Ops");
        assert_eq!(name.country, "");
        assert!(!name.is_empty());
        assert!(DistinguishedName::default().is_empty());
    }
}
