//! Core types for vipfetch

use crate::error::UpstreamError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Request to fetch a URL
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FetchRequest {
    /// Page URL on one of the allowed domains (http:// or https://)
    pub url: String,
}

impl FetchRequest {
    /// Create a new request with the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Outcome of a single fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// Extracted page text
    Content {
        /// Visible text, one text node per line
        text: String,
        /// True if the text was cut to the configured maximum
        truncated: bool,
    },
    /// URL refused before any network access
    Rejected {
        /// Explanation for the caller
        reason: String,
    },
    /// Network failure, timeout or non-success status
    UpstreamError(UpstreamError),
}

impl FetchResult {
    /// Returns true for [`FetchResult::Content`]
    pub fn is_content(&self) -> bool {
        matches!(self, FetchResult::Content { .. })
    }

    /// Returns true for [`FetchResult::Rejected`]
    pub fn is_rejected(&self) -> bool {
        matches!(self, FetchResult::Rejected { .. })
    }

    /// Returns true for [`FetchResult::UpstreamError`]
    pub fn is_upstream_error(&self) -> bool {
        matches!(self, FetchResult::UpstreamError(_))
    }

    /// Page text, if any
    pub fn text(&self) -> Option<&str> {
        match self {
            FetchResult::Content { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Page text, or the error message for failed fetches
    pub fn message(&self) -> String {
        match self {
            FetchResult::Content { text, .. } => text.clone(),
            FetchResult::Rejected { reason } => reason.clone(),
            FetchResult::UpstreamError(err) => format!("Upstream error: {}", err),
        }
    }

    /// Convert into the serialized shape handed to callers
    pub fn into_output(self) -> FetchOutput {
        match self {
            FetchResult::Content { text, truncated } => FetchOutput::Content {
                content: text,
                truncated,
            },
            other => FetchOutput::Error {
                error: other.message(),
            },
        }
    }
}

/// Serialized fetch outcome: `{"content": ...}` or `{"error": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum FetchOutput {
    /// Successful fetch
    Content {
        /// Extracted text
        content: String,
        /// True if the text was cut to the configured maximum
        truncated: bool,
    },
    /// Rejected or failed fetch
    Error {
        /// Error message
        error: String,
    },
}
