//! Error types for JetAPI operations.
//!
//! This module provides the error type shared by every JetAPI crate, including
//! the mapping from HTTP status codes and the grouping of failures that the
//! user only ever sees as a single "request failed" outcome.

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for JetAPI operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// JetAPI service is unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Operation timed out
    #[error("Timeout waiting for service: {0}")]
    Timeout(String),

    /// Aircraft not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// The service rejected the query
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Failed to parse a JetAPI response
    #[error("Failed to parse JetAPI response: {0}")]
    ParseError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Invalid endpoint
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Registration contains characters the service does not accept
    #[error("Invalid registration: {0}")]
    InvalidRegistration(String),

    /// Writing an export failed
    #[error("Export failed: {0}")]
    ExportError(String),
}

/// Specialized result type for JetAPI operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::HttpError(_) => "HTTP_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::ParseError(_) => "PARSE_ERROR",
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
            Self::InvalidRegistration(_) => "INVALID_REGISTRATION",
            Self::ExportError(_) => "EXPORT_ERROR",
        }
    }

    /// Returns true if this error belongs to the "request failed" kind.
    ///
    /// Covers non-success responses, transport failures and bodies that are
    /// not valid JSON. Local problems (configuration, exports) are excluded.
    #[must_use]
    pub const fn is_request_failure(&self) -> bool {
        matches!(
            self,
            Self::ServiceUnavailable(_)
                | Self::HttpError(_)
                | Self::Timeout(_)
                | Self::NotFound(_)
                | Self::BadRequest(_)
                | Self::ParseError(_)
                | Self::InvalidEndpoint(_)
        )
    }

    /// Returns true if this error should be logged as a serious error.
    #[must_use]
    pub const fn should_log(&self) -> bool {
        matches!(
            self,
            Self::ConfigError(_) | Self::ServiceUnavailable(_) | Self::ExportError(_)
        )
    }

    /// Map a non-success HTTP status and its body text to an error.
    #[must_use]
    pub fn from_status(status: StatusCode, text: String) -> Self {
        match status {
            StatusCode::NOT_FOUND => Self::NotFound(text),
            StatusCode::BAD_REQUEST => Self::BadRequest(text),
            StatusCode::TOO_MANY_REQUESTS
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT => {
                Self::ServiceUnavailable(format!("JetAPI temporarily unavailable: {text}"))
            }
            status if status.is_server_error() => {
                Self::ServiceUnavailable(format!("JetAPI server error {status}: {text}"))
            }
            _ => Self::HttpError(format!("JetAPI error {status}: {text}")),
        }
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ServiceUnavailable(err.to_string())
        } else if err.is_decode() {
            Self::ParseError(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ConfigError(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::ExportError(err.to_string())
    }
}
