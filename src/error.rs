//! Error types for rest-api-detector

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while detecting a site's REST API
///
/// Every detection variant is terminal for the branch that produced it; the
/// detector never retries. Callers branch on the variant, not on an
/// exception type.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to create HTTP client
    #[error("failed to create HTTP client: {0}")]
    HttpClient(String),

    /// Transport-level failure (connection, DNS, timeout)
    #[error("network request failed: {0}")]
    Network(String),

    /// Response body could not be parsed as a JSON object
    #[error("the site has an error in its REST API data")]
    InvalidApiResponse,

    /// The remote site's own API reported an error; code and message are
    /// forwarded verbatim (e.g. `rest_no_route` for a disabled endpoint)
    #[error("the site's REST API reported an error ({code}): {message}")]
    RemoteApi { code: String, message: String },

    /// Body parsed as a JSON object but matched neither the index shape
    /// nor the error shape
    #[error("the site responded with an unexpected response")]
    UnexpectedResponse,

    /// Invalid output format specified
    #[error("invalid output format: '{0}' (valid: human, json, none)")]
    InvalidOutputFormat(String),

    /// Output operation failed
    #[error("output failed: {0}")]
    OutputFailed(#[source] std::io::Error),

    /// JSON serialization failed
    #[error("JSON serialization failed")]
    SerializationFailed(#[from] serde_json::Error),
}

impl Error {
    /// Machine-readable error code, present for remote-reported API errors
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::RemoteApi { code, .. } => Some(code),
            _ => None,
        }
    }
}
