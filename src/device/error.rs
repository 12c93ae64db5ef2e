//! Error types for device access.

use thiserror::Error;

/// Error type for HTTP operations.
///
/// Describes what went wrong at the transport level without dictating
/// recovery strategy.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// TLS handshake failures and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// The device did not respond within the configured timeout period.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    ///
    /// This typically indicates a configuration error rather than
    /// a transient failure.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Error type for management API calls.
///
/// Every variant is fatal to the operation in progress; nothing here is
/// retried.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// The request could not be delivered.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The endpoint path could not be joined onto the base URL.
    #[error("Invalid endpoint '{path}': {source}")]
    InvalidEndpoint {
        /// Path that failed to resolve
        path: String,
        /// Underlying URL error
        #[source]
        source: url::ParseError,
    },

    /// Credentials could not be encoded into a header.
    #[error("Invalid credentials header: {0}")]
    InvalidCredentials(#[from] http::header::InvalidHeaderValue),

    /// The request body could not be serialized.
    #[error("Failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The response body is not valid JSON.
    #[error("{0}")]
    MalformedJson(#[source] serde_json::Error),

    /// The response is JSON but not of the expected shape.
    #[error("Unexpected response from '{path}': {reason}")]
    UnexpectedResponse {
        /// Path that was requested
        path: String,
        /// What was wrong with the response
        reason: String,
    },

    /// The requested object does not exist on the device.
    #[error("Not found: {path}")]
    NotFound {
        /// Path that was requested
        path: String,
    },

    /// The device reported an error.
    ///
    /// `message` is the device's own message when one was given, otherwise
    /// the raw response body.
    #[error("{message}")]
    Device {
        /// HTTP status of the response
        status: http::StatusCode,
        /// Best available error message
        message: String,
    },
}

impl DeviceError {
    /// Returns true if this error means the object does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
