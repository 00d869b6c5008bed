//! Custom error types for translation operations

use thiserror::Error;

/// Failure of a single call to a translation backend.
///
/// Adapters never let this escape: it is rendered into an error
/// [`TranslationResult`](crate::core::models::TranslationResult) for the
/// primary backends and swallowed for the dictionary backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// No response from the backend (connection refused, DNS, TLS, ...)
    #[error("Network error: {message}")]
    Network {
        /// Transport error text
        message: String,
    },

    /// Backend throttled the request or is temporarily down (429 / 503)
    #[error("Service unavailable: {status}")]
    Unavailable {
        /// 429 or 503
        status: u16,
    },

    /// Credential rejected (403)
    #[error("Authentication failed")]
    Authentication,

    /// Any other non-success status
    #[error("Unknown error: {status} {status_text}")]
    Unknown {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase
        status_text: String,
        /// Backend's own error message, when it sent one
        detail: Option<String>,
    },

    /// Success status but the body had an unexpected shape
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Decode error text
        message: String,
    },
}

impl ProviderError {
    /// Build an `Unknown` error from an HTTP status
    pub fn unknown(status: reqwest::StatusCode, detail: Option<String>) -> Self {
        ProviderError::Unknown {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            detail,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::InvalidResponse {
                message: err.to_string(),
            }
        } else {
            ProviderError::Network {
                message: err.to_string(),
            }
        }
    }
}

/// Translation-related errors
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// What is wrong
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Reqwest error
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Config source error
    #[error("Config source error: {0}")]
    SourceError(#[from] config::ConfigError),

    /// Wrapper for anyhow errors
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<anyhow::Error> for TranslationError {
    fn from(err: anyhow::Error) -> Self {
        TranslationError::InternalError(err.to_string())
    }
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslationError>;
