//! Error types for transport dispatch.

use thiserror::Error;

/// Error type for a single transport dispatch.
///
/// Describes why a request never produced an HTTP response. Responses that
/// did arrive, whatever their status, are not transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// The server did not respond within the configured timeout period.
    #[error("Request timed out")]
    Timeout,

    /// The request URL could not be used.
    ///
    /// This indicates a configuration error rather than a transient
    /// failure.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl TransportError {
    /// Returns true if the failure is potentially transient and a retry
    /// may succeed.
    ///
    /// Connection failures and timeouts are transient; an unusable URL is
    /// a configuration problem that no retry will fix.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Connection(_) | Self::Timeout => true,
            Self::InvalidUrl(_) => false,
        }
    }
}
