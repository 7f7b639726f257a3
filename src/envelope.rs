//! Response envelope decoding and the code-to-error mapping.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;
use crate::transport::HttpResponse;

fn default_message() -> String {
    "Unknown error".to_string()
}

/// The `{code, message, data}` structure every API response decodes into.
///
/// The `code` field is a domain status code, not an HTTP status; the HTTP
/// layer has its own pass/fail gate before the envelope is consulted.
/// Success is exactly [`Envelope::SUCCESS_CODE`]. A missing `code` decodes
/// as `0` (a failure), a missing `message` as `"Unknown error"`, and a
/// missing `data` as JSON null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Domain status code.
    #[serde(default)]
    pub code: i64,
    /// Human-readable outcome description.
    #[serde(default = "default_message")]
    pub message: String,
    /// Open payload; shape depends on the endpoint.
    #[serde(default)]
    pub data: Value,
}

impl Envelope {
    /// The sole success code.
    pub const SUCCESS_CODE: i64 = 20000;

    /// Returns true if this envelope reports success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.code == Self::SUCCESS_CODE
    }

    /// Maps a failure code to its typed error.
    ///
    /// Success returns `Ok(())`. Anything else maps in fixed order: 40100
    /// authentication, 40300 rate limit, 40400 not found, 40900 already
    /// exists, 50000 and above server, any other code a generic API error.
    /// The produced error carries this envelope's `message` and `code`.
    /// Pure; no side effects beyond the returned value.
    ///
    /// # Errors
    ///
    /// Returns the mapped [`Error`] for every non-success code.
    pub fn check(&self) -> Result<(), Error> {
        if self.is_success() {
            return Ok(());
        }

        let message = self.message.clone();
        let code = self.code;
        Err(match code {
            40100 => Error::Authentication { message, code },
            40300 => Error::RateLimit { message, code },
            40400 => Error::NotFound { message, code },
            40900 => Error::AlreadyExists { message, code },
            c if c >= 50000 => Error::Server { message, code },
            _ => Error::Api { message, code },
        })
    }

    /// Deserializes the `data` payload into a concrete type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if `data` does not match `T`.
    pub fn data_as<T: serde::de::DeserializeOwned>(&self) -> Result<T, Error> {
        Ok(serde_json::from_value(self.data.clone())?)
    }
}

/// Runs an arrived HTTP response through the full decode pipeline.
///
/// Non-2xx statuses fail immediately without looking at the body shape;
/// otherwise the body is decoded as an [`Envelope`] and its code checked.
/// An arrived response is definitive, so nothing here is retried.
pub(crate) fn decode_response(response: &HttpResponse) -> Result<Envelope, Error> {
    if !response.is_success() {
        return Err(Error::Status {
            status: response.status,
            body: response.body_text().unwrap_or_default().to_string(),
        });
    }
    let envelope: Envelope = serde_json::from_slice(&response.body)?;
    envelope.check()?;
    Ok(envelope)
}

#[cfg(test)]
#[path = "envelope_tests.rs"]
mod envelope_tests;
