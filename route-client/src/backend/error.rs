//! Route API error types.
//!
//! Every error the gateway hands to its callers is one of exactly three
//! kinds: `Network` (status 0), `Http` (server status with parsed
//! detail), or `Timeout` (status 408, raised by deadline expiry).

use serde::Deserialize;

/// Structured detail parsed from a non-success response body.
///
/// Falls back to the HTTP status phrase when the body is not JSON.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ErrorDetail {
    /// `message` field of the body, if present
    #[serde(default)]
    pub message: Option<String>,

    /// `error` field of the body, if present
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorDetail {
    /// Detail built from an HTTP status phrase.
    pub fn from_phrase(phrase: &str) -> Self {
        Self {
            message: Some(phrase.to_string()),
            error: None,
        }
    }

    /// The most specific text available, if any.
    pub fn text(&self) -> Option<&str> {
        self.message.as_deref().or(self.error.as_deref())
    }
}

/// Errors from the route API gateway.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// Transport-level failure (connectivity loss, bad response body)
    #[error("network error: {message}")]
    Network { message: String },

    /// API returned a non-success status code
    #[error("HTTP {status}: {}", detail.text().unwrap_or("no detail"))]
    Http { status: u16, detail: ErrorDetail },

    /// Deadline expired before the call settled
    #[error("request timed out")]
    Timeout,
}

impl ApiError {
    /// The status code this error carries: 0 for network failures, the
    /// server's code for HTTP errors, 408 for timeouts.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Network { .. } => 0,
            ApiError::Http { status, .. } => *status,
            ApiError::Timeout => 408,
        }
    }

    /// Structured detail, when the server sent one.
    pub fn detail_text(&self) -> Option<&str> {
        match self {
            ApiError::Http { detail, .. } => detail.text(),
            _ => None,
        }
    }

    /// Maps the error onto a user-facing message.
    pub fn user_message(&self) -> String {
        match self.status_code() {
            0 => "Could not reach the server. Check your network connection.".to_string(),
            400 => self
                .detail_text()
                .map(str::to_string)
                .unwrap_or_else(|| "The provided data is invalid.".to_string()),
            404 => "No results were found for your search.".to_string(),
            408 => "The request took too long. Please try again.".to_string(),
            status if status >= 500 => "Server error. Please try again later.".to_string(),
            _ => self
                .detail_text()
                .map(str::to_string)
                .unwrap_or_else(|| "An unexpected error occurred.".to_string()),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Network {
                message: err.to_string(),
            }
        }
    }
}
