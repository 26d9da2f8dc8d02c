//! Error types for the API client.

use thiserror::Error;

/// Errors from a single request to the remote FFmpeg service.
///
/// Every variant is final for the call that produced it; the client never
/// retries.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Could not reach the service.
    #[error("Connection to FFmpeg API failed: {0}")]
    ConnectionFailed(String),

    /// The request did not complete within the configured timeout.
    #[error("Request to FFmpeg API timed out")]
    Timeout,

    /// Any other transport-level failure.
    #[error("Request to FFmpeg API failed: {0}")]
    Request(String),

    /// The service answered with a non-success status.
    #[error("FFmpeg API returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be decoded.
    #[error("Invalid response from FFmpeg API: {0}")]
    InvalidResponse(String),

    /// The client could not be constructed from its configuration.
    #[error("Invalid API client configuration: {0}")]
    InvalidConfig(String),
}

impl ApiError {
    /// Creates an HTTP status error, truncating long bodies.
    pub fn http(status: u16, body: impl AsRef<str>) -> Self {
        Self::Http {
            status,
            body: body.as_ref().chars().take(200).collect(),
        }
    }

    /// The HTTP status code, if the service responded at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_connect() {
            Self::ConnectionFailed(e.to_string())
        } else if e.is_decode() {
            Self::InvalidResponse(e.to_string())
        } else {
            Self::Request(e.to_string())
        }
    }
}
