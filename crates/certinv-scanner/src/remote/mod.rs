//! F5 BIG-IP certificate listing over iControl REST.

mod expiration;
mod types;

pub use expiration::parse_expiration;
pub use types::{F5CertResponse, F5Certificate, F5RawValues};

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use certinv_core::{CertInvError, CertificateSource, Result};

use crate::report::ScanReport;
use crate::Scanner;

/// Management path listing every certificate on the device
pub const CERT_LIST_PATH: &str = "/mgmt/tm/sys/crypto/cert";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Scanner for the load balancer's certificate store.
///
/// A scanner built with an empty URL is disabled: it returns an empty report
/// without touching the network.
#[derive(Clone)]
pub struct RemoteApiScanner {
    inner: Option<Arc<ClientInner>>,
}

struct ClientInner {
    http: HttpClient,
    endpoint: String,
    user: String,
    password: String,
    timeout: Duration,
}

impl RemoteApiScanner {
    /// Create a builder for the given endpoint and credentials
    #[must_use]
    pub fn builder(
        url: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> RemoteApiScannerBuilder {
        RemoteApiScannerBuilder::new(url, user, password)
    }

    /// A scanner that never contacts anything
    #[must_use]
    pub const fn disabled() -> Self {
        Self { inner: None }
    }

    /// Returns true if a URL was configured
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Fetch the certificate list and convert every item.
    ///
    /// Connection failures, non-success statuses and undecodable bodies fail
    /// the whole scan; an unparsable expiration only produces a warning.
    pub async fn fetch_certificates(&self) -> Result<ScanReport> {
        let mut report = ScanReport::new(CertificateSource::RemoteApi);

        let Some(inner) = &self.inner else {
            debug!("remote API source disabled, skipping");
            return Ok(report);
        };

        debug!(url = %inner.endpoint, "GET request");

        let response = inner
            .http
            .get(&inner.endpoint)
            .basic_auth(&inner.user, Some(&inner.password))
            .send()
            .await
            .map_err(|e| inner.request_error(&e))?;

        let listing: F5CertResponse = handle_response(response).await?;
        debug!(
            kind = %listing.kind,
            self_link = %listing.self_link,
            items = listing.items.len(),
            "certificate list received"
        );

        for item in listing.items {
            let (cert, warning) = item.into_canonical();
            if let Some(warning) = warning {
                warn!(path = %warning.path, "{}", warning.message);
                report.warnings.push(warning);
            }
            report.certificates.push(cert);
        }

        info!(
            collected = report.certificates.len(),
            skipped = report.warnings.len(),
            "remote API scan complete"
        );
        Ok(report)
    }
}

#[async_trait]
impl Scanner for RemoteApiScanner {
    fn source(&self) -> CertificateSource {
        CertificateSource::RemoteApi
    }

    async fn scan(&self) -> Result<ScanReport> {
        self.fetch_certificates().await
    }
}

impl ClientInner {
    fn request_error(&self, e: &reqwest::Error) -> CertInvError {
        if e.is_timeout() {
            CertInvError::Timeout(self.timeout.as_secs())
        } else if e.is_connect() {
            CertInvError::Connection(e.to_string())
        } else {
            CertInvError::Http(e.to_string())
        }
    }
}

/// Decode a JSON body, or turn an error status into a `CertInvError`.
async fn handle_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T> {
    let status = response.status();

    if status.is_success() {
        let body = response
            .text()
            .await
            .map_err(|e| CertInvError::Http(e.to_string()))?;
        return serde_json::from_str(&body).map_err(CertInvError::Json);
    }

    let code = status.as_u16();
    let body = response.text().await.unwrap_or_default();

    // iControl REST errors look like {"code":401,"message":"..."}
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or(body);

    match code {
        401 | 403 => Err(CertInvError::Unauthorized),
        _ => Err(CertInvError::Api { code, message }),
    }
}

/// Builder for configuring a [`RemoteApiScanner`]
pub struct RemoteApiScannerBuilder {
    url: String,
    user: String,
    password: String,
    timeout: Duration,
    accept_invalid_certs: bool,
}

impl RemoteApiScannerBuilder {
    /// Create a new builder
    #[must_use]
    pub fn new(
        url: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            user: user.into(),
            password: password.into(),
            timeout: DEFAULT_TIMEOUT,
            accept_invalid_certs: false,
        }
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Skip TLS certificate verification.
    ///
    /// Management interfaces usually serve self-signed certificates. Off by
    /// default.
    #[must_use]
    pub const fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Build the scanner.
    ///
    /// An empty URL yields a disabled scanner.
    pub fn build(self) -> Result<RemoteApiScanner> {
        if self.url.trim().is_empty() {
            return Ok(RemoteApiScanner::disabled());
        }

        let endpoint = format!("{}{}", self.url.trim_end_matches('/'), CERT_LIST_PATH);
        Url::parse(&endpoint).map_err(|e| CertInvError::InvalidUrl(format!("{endpoint}: {e}")))?;

        if self.accept_invalid_certs {
            warn!(url = %self.url, "TLS certificate verification disabled for remote API");
        }

        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(concat!("certinv/", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .build()
            .map_err(|e| CertInvError::Http(e.to_string()))?;

        Ok(RemoteApiScanner {
            inner: Some(Arc::new(ClientInner {
                http,
                endpoint,
                user: self.user,
                password: self.password,
                timeout: self.timeout,
            })),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use certinv_core::WarningKind;
    use wiremock::matchers::{basic_auth, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn scanner_for(server: &MockServer) -> RemoteApiScanner {
        RemoteApiScanner::builder(server.uri(), "admin", "secret")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn empty_url_is_disabled_and_silent() {
        let server = MockServer::start().await;

        let scanner = RemoteApiScanner::builder("", "admin", "secret").build().unwrap();
        assert!(!scanner.is_enabled());

        let report = scanner.fetch_certificates().await.unwrap();
        assert!(report.is_empty());
        assert!(report.warnings.is_empty());
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn lists_and_normalizes_certificates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(CERT_LIST_PATH))
            .and(basic_auth("admin", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "kind": "tm:sys:crypto:cert:certcollectionstate",
                "selfLink": "https://localhost/mgmt/tm/sys/crypto/cert?ver=15.1.0",
                "items": [{
                    "fullPath": "/Common/app.crt",
                    "commonName": "app.internal",
                    "country": "US",
                    "fingerprint": "SHA256/AA:BB",
                    "organization": "Example Corp",
                    "ou": "Web",
                    "apiRawValues": {
                        "expiration": "Jan  2 15:04:05 2024 UTC",
                        "issuer": "Internal CA"
                    }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let report = scanner_for(&server).fetch_certificates().await.unwrap();

        assert_eq!(report.len(), 1);
        assert!(report.warnings.is_empty());
        let cert = &report.certificates[0];
        assert_eq!(cert.fingerprint, "aabb");
        assert_eq!(
            cert.valid_until(),
            Some(Utc.with_ymd_and_hms(2024, 1, 2, 15, 4, 5).unwrap())
        );
        assert_eq!(cert.path, "/Common/app.crt");
        assert_eq!(cert.issuer.common_name, "Internal CA");
    }

    #[tokio::test]
    async fn trailing_slash_in_url_is_tolerated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(CERT_LIST_PATH))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "items": [] })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let scanner = RemoteApiScanner::builder(format!("{}/", server.uri()), "admin", "secret")
            .build()
            .unwrap();
        let report = scanner.fetch_certificates().await.unwrap();
        assert!(report.is_empty());
    }

    #[tokio::test]
    async fn unparsable_expiration_becomes_warning() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(CERT_LIST_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [
                    { "fullPath": "/Common/a.crt", "fingerprint": "SHA256/01",
                      "apiRawValues": { "expiration": "garbage" } },
                    { "fullPath": "/Common/b.crt", "fingerprint": "SHA256/02",
                      "apiRawValues": { "expiration": "Feb 10 00:00:00 2027 GMT" } }
                ]
            })))
            .mount(&server)
            .await;

        let report = scanner_for(&server).fetch_certificates().await.unwrap();
        assert_eq!(report.len(), 2);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].kind, WarningKind::UnparsableExpiration);
        assert_eq!(report.certificates[0].valid_until(), None);
        assert!(report.certificates[1].valid_until().is_some());
    }

    #[tokio::test]
    async fn unauthorized_is_source_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(CERT_LIST_PATH))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "code": 401,
                "message": "Authentication failed."
            })))
            .mount(&server)
            .await;

        let err = scanner_for(&server).fetch_certificates().await.unwrap_err();
        assert!(matches!(err, CertInvError::Unauthorized));
    }

    #[tokio::test]
    async fn server_error_carries_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(CERT_LIST_PATH))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "code": 500,
                "message": "internal error"
            })))
            .mount(&server)
            .await;

        let err = scanner_for(&server).fetch_certificates().await.unwrap_err();
        match err {
            CertInvError::Api { code, message } => {
                assert_eq!(code, 500);
                assert_eq!(message, "internal error");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn undecodable_body_is_source_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(CERT_LIST_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
            .mount(&server)
            .await;

        let err = scanner_for(&server).fetch_certificates().await.unwrap_err();
        assert!(matches!(err, CertInvError::Json(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_source_error() {
        // Nothing listens on the discard port.
        let scanner = RemoteApiScanner::builder("http://127.0.0.1:9", "admin", "secret")
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();
        let err = scanner.fetch_certificates().await.unwrap_err();
        assert!(matches!(
            err,
            CertInvError::Connection(_) | CertInvError::Timeout(_) | CertInvError::Http(_)
        ));
    }

    #[test]
    fn invalid_url_is_rejected() {
        let result = RemoteApiScanner::builder("not a url", "admin", "secret").build();
        assert!(matches!(result, Err(CertInvError::InvalidUrl(_))));
    }
}
