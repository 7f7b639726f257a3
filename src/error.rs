//! Error types for the SubModel SDK.

use thiserror::Error;

use crate::transport::TransportError;

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type covering every failure path of the SDK.
///
/// The first group of variants is derived from the response envelope's
/// numeric `code` and always carries the server's original `message` and
/// `code`. The remaining variants are transport-level or local failures
/// raised before a definitive server answer exists.
#[derive(Debug, Error)]
pub enum Error {
    /// Authentication failed (envelope code 40100).
    #[error("Authentication failed (code {code}): {message}")]
    Authentication { message: String, code: i64 },

    /// Rate limit exceeded (envelope code 40300).
    #[error("Rate limit exceeded (code {code}): {message}")]
    RateLimit { message: String, code: i64 },

    /// Requested resource does not exist (envelope code 40400).
    #[error("Resource not found (code {code}): {message}")]
    NotFound { message: String, code: i64 },

    /// Resource already exists (envelope code 40900).
    #[error("Resource already exists (code {code}): {message}")]
    AlreadyExists { message: String, code: i64 },

    /// Server-side failure (envelope code 50000 and above).
    #[error("Server error (code {code}): {message}")]
    Server { message: String, code: i64 },

    /// Any other non-success envelope code.
    #[error("API error (code {code}): {message}")]
    Api { message: String, code: i64 },

    /// Account quota exceeded.
    ///
    /// Reserved for product-level quota enforcement; the envelope code
    /// mapping does not currently produce it.
    #[error("Quota exceeded (code {code}): {message}")]
    Quota { message: String, code: i64 },

    /// The request never received a response (connection failure, timeout,
    /// or an unusable URL).
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with a non-2xx HTTP status.
    ///
    /// The domain envelope is authoritative only on 2xx responses; any
    /// other HTTP status is a failure regardless of body content.
    #[error("HTTP status {status}: {body}")]
    Status {
        status: http::StatusCode,
        body: String,
    },

    /// A request body failed to serialize or a response body failed to
    /// decode as a JSON envelope.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A caller-supplied argument was rejected before any network call.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An async request was issued while no session scope was open.
    #[error("Session not open: acquire one with Client::session() before issuing requests")]
    SessionClosed,

    /// Neither a token nor an API key was supplied at construction.
    #[error("Either a token or an API key must be provided")]
    MissingCredentials,

    /// A wait deadline passed before the watched operation finished.
    #[error("Timed out after {0} seconds")]
    Timeout(u64),
}

impl Error {
    /// Returns the envelope code for errors derived from a server-reported
    /// failure envelope, `None` otherwise.
    #[must_use]
    pub const fn code(&self) -> Option<i64> {
        match self {
            Self::Authentication { code, .. }
            | Self::RateLimit { code, .. }
            | Self::NotFound { code, .. }
            | Self::AlreadyExists { code, .. }
            | Self::Server { code, .. }
            | Self::Api { code, .. }
            | Self::Quota { code, .. } => Some(*code),
            _ => None,
        }
    }
}
