//! Error types for HTTP and notification operations.

use thiserror::Error;

/// Error type for HTTP operations.
///
/// Describes what went wrong at the transport level.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Why a boot notification was not delivered.
///
/// Never fatal: the notifier logs it and bootstrap carries on.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The endpoint is not a valid URL.
    #[error("Invalid webhook URL: {0}")]
    InvalidEndpoint(#[source] url::ParseError),

    /// The payload could not be encoded.
    #[error("Failed to encode payload: {0}")]
    Encode(#[source] serde_json::Error),

    /// The request failed at the transport level.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// The server answered with a non-2xx status.
    #[error("Non-success status {status}: {}", body.as_deref().unwrap_or("<no body>"))]
    Status {
        /// HTTP status code
        status: http::StatusCode,
        /// Response body (truncated), if UTF-8
        body: Option<String>,
    },
}
