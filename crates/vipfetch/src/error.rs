//! Error types for vipfetch

use thiserror::Error;

/// Errors raised while configuring a [`Tool`](crate::Tool)
#[derive(Debug, Error)]
pub enum FetchError {
    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuildError(#[source] reqwest::Error),
}

/// Failures talking to the upstream server
///
/// These are reported to the caller as values, never raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    /// The request did not complete within the configured timeout
    #[error("timeout")]
    Timeout,

    /// Upstream answered with a non-success status
    #[error("HTTP {status} {reason}")]
    Status {
        /// Numeric status code
        status: u16,
        /// Canonical reason phrase
        reason: String,
    },

    /// Failed to connect to server
    #[error("Failed to connect to server: {0}")]
    Connect(String),

    /// Response body exceeds the configured limit
    #[error("Response too large: {size} bytes (max: {limit} bytes)")]
    BodyTooLarge {
        /// Body size reported or read
        size: u64,
        /// Configured limit
        limit: u64,
    },

    /// Other request error
    #[error("Request failed: {0}")]
    Request(String),
}

impl UpstreamError {
    /// Create an error from a reqwest error
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout
        } else if err.is_connect() {
            UpstreamError::Connect(err.to_string())
        } else {
            UpstreamError::Request(err.to_string())
        }
    }

    /// Create an error from a non-success status code
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        UpstreamError::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }
    }

    /// Returns true for [`UpstreamError::Timeout`]
    pub fn is_timeout(&self) -> bool {
        matches!(self, UpstreamError::Timeout)
    }

    /// HTTP status code, when upstream answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_error_messages() {
        assert_eq!(UpstreamError::Timeout.to_string(), "timeout");
        assert_eq!(
            UpstreamError::from_status(StatusCode::INTERNAL_SERVER_ERROR).to_string(),
            "HTTP 500 Internal Server Error"
        );
        assert_eq!(
            UpstreamError::from_status(StatusCode::NOT_FOUND).to_string(),
            "HTTP 404 Not Found"
        );
        assert_eq!(
            UpstreamError::BodyTooLarge { size: 10, limit: 5 }.to_string(),
            "Response too large: 10 bytes (max: 5 bytes)"
        );
    }

    #[test]
    fn test_unknown_status_reason() {
        let err = UpstreamError::from_status(StatusCode::from_u16(599).unwrap());
        assert_eq!(err.to_string(), "HTTP 599 Unknown");
        assert_eq!(err.status(), Some(599));
    }

    #[test]
    fn test_timeout_distinct_from_status() {
        assert!(UpstreamError::Timeout.is_timeout());
        assert_eq!(UpstreamError::Timeout.status(), None);
        assert!(!UpstreamError::from_status(StatusCode::GATEWAY_TIMEOUT).is_timeout());
    }
}
