use thiserror::Error;

/// Result type alias for certinv operations
pub type Result<T> = std::result::Result<T, CertInvError>;

/// Errors that can occur while scanning, assembling or delivering an inventory
#[derive(Error, Debug)]
pub enum CertInvError {
    /// Reading a file or directory failed
    #[error("io error on {path}: {source}")]
    Io {
        /// Path that could not be read
        path: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// No PEM block could be decoded from a file
    #[error("no PEM data in {path}: {reason}")]
    PemDecode {
        /// File that was decoded
        path: String,
        /// Decoder message
        reason: String,
    },

    /// The PEM payload is not a valid DER X.509 certificate
    #[error("invalid certificate in {path}: {reason}")]
    CertParse {
        /// File the certificate came from
        path: String,
        /// Parser message
        reason: String,
    },

    /// Authentication against the remote API failed
    #[error("authentication failed: invalid credentials")]
    Unauthorized,

    /// Remote API returned an error response
    #[error("API error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Response body or error message
        message: String,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Request timed out
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// Connection failed
    #[error("connection failed: {0}")]
    Connection(String),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Delivering the inventory to its destination failed
    #[error("delivery failed: {0}")]
    Sink(String),
}

impl CertInvError {
    /// Build an [`CertInvError::Io`] for the given path.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
