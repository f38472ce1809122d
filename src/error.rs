//! Error types for App Store Connect API operations.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of payload bytes kept in a decoding error preview.
const PREVIEW_LIMIT: usize = 512;

/// Errors that can occur during App Store Connect API operations.
#[derive(Debug, Error)]
pub enum AscError {
    /// Configuration is missing or incomplete.
    #[error("App Store Connect configuration required: {0}")]
    ConfigMissing(String),

    /// A caller-supplied argument was rejected before any request was made.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A request body or query could not be serialized.
    #[error("Failed to encode request: {0}")]
    Encoding(String),

    /// A response body did not match the expected envelope or resource type.
    #[error("Failed to decode response: {message} (payload: {preview})")]
    Decoding {
        message: String,
        status_code: Option<u16>,
        preview: String,
    },

    /// API request failed with a non-success status.
    #[error("App Store Connect API error: {message}")]
    ApiError {
        message: String,
        status_code: Option<u16>,
        errors: Vec<ErrorObject>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },
}

impl AscError {
    /// Build a decoding error that carries a truncated preview of `payload`.
    pub(crate) fn decoding(err: serde_json::Error, payload: &[u8]) -> Self {
        let end = payload.len().min(PREVIEW_LIMIT);
        let mut preview = String::from_utf8_lossy(&payload[..end]).into_owned();
        if payload.len() > PREVIEW_LIMIT {
            preview.push_str("...");
        }
        AscError::Decoding {
            message: err.to_string(),
            status_code: None,
            preview,
        }
    }

    /// Attach the HTTP status of the response a decoding error came from.
    pub(crate) fn with_status(self, status: u16) -> Self {
        match self {
            AscError::Decoding {
                message, preview, ..
            } => AscError::Decoding {
                message,
                status_code: Some(status),
                preview,
            },
            other => other,
        }
    }

    /// HTTP status associated with this error, if a response was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            AscError::ApiError { status_code, .. } | AscError::Decoding { status_code, .. } => {
                *status_code
            }
            AscError::RateLimited { .. } => Some(429),
            AscError::HttpError(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true if the server answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }
}

/// Result type alias for App Store Connect operations.
pub type Result<T> = core::result::Result<T, AscError>;

/// Body of a failed App Store Connect response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    #[serde(default)]
    pub errors: Vec<ErrorObject>,
}

/// A single JSON:API error object.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ErrorObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// HTTP status code, as a string.
    #[serde(default)]
    pub status: String,
    /// Machine-readable code such as `NOT_FOUND` or `ENTITY_ERROR.ATTRIBUTE.INVALID`.
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ErrorSource>,
}

/// Location in the request that caused an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ErrorSource {
    /// JSON pointer into the request document, e.g. `/data/attributes/fileName`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointer: Option<String>,
    /// Name of the offending query parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
}

impl fmt::Display for ErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.title.is_empty(), self.detail.is_empty()) {
            (false, false) => write!(f, "{} - {}", self.title, self.detail),
            (false, true) => f.write_str(&self.title),
            (true, false) => f.write_str(&self.detail),
            (true, true) => write!(f, "{} {}", self.status, self.code),
        }
    }
}
