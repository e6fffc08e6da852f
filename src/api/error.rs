//! Error types for gateway requests.

use thiserror::Error;

/// A failed request against the analysis service.
///
/// The `Display` output of every variant is the human-readable message that
/// view models surface verbatim.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    /// The request never produced an HTTP response (connection refused, DNS,
    /// timeout, ...).
    #[error("{0}")]
    Transport(String),

    /// The service answered with a non-2xx status.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// The service answered 2xx but the body did not have the expected shape.
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl RequestError {
    /// Build a server error from a status code and the raw response body.
    ///
    /// An empty body falls back to `Request failed with status N`.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = if body.is_empty() {
            format!("Request failed with status {}", status)
        } else {
            body.to_string()
        };
        RequestError::Server { status, message }
    }

    /// The HTTP status, if the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RequestError::Decode(err.to_string())
        } else {
            RequestError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RequestError {
    fn from(err: serde_json::Error) -> Self {
        RequestError::Decode(err.to_string())
    }
}
