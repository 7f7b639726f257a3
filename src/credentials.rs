//! Credential storage and authentication header construction.

use http::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};

use crate::error::Error;

/// API credentials: a bearer token, an API key, or both.
///
/// At least one part is always present; constructors enforce this, so a
/// `Credentials` value in hand is proof the client can authenticate. The
/// value is immutable after construction (re-authentication means building
/// a new client).
///
/// # Example
///
/// ```
/// use submodel::Credentials;
///
/// let creds = Credentials::from_token("tok").with_api_key("key");
/// let headers = creds.header_map().unwrap();
/// assert_eq!(headers.get("x-token").unwrap(), "tok");
/// assert_eq!(headers.get("x-apikey").unwrap(), "key");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    token: Option<String>,
    api_key: Option<String>,
}

impl Credentials {
    /// Header carrying the bearer token.
    pub const TOKEN_HEADER: &'static str = "x-token";

    /// Header carrying the API key.
    pub const API_KEY_HEADER: &'static str = "x-apikey";

    /// Environment variable read by [`Credentials::from_env`] for the token.
    pub const TOKEN_ENV: &'static str = "SUBMODEL_TOKEN";

    /// Environment variable read by [`Credentials::from_env`] for the API key.
    pub const API_KEY_ENV: &'static str = "SUBMODEL_API_KEY";

    /// Creates credentials from optional parts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredentials`] if both parts are `None`.
    pub fn new(token: Option<String>, api_key: Option<String>) -> Result<Self, Error> {
        if token.is_none() && api_key.is_none() {
            return Err(Error::MissingCredentials);
        }
        Ok(Self { token, api_key })
    }

    /// Creates credentials holding only a bearer token.
    #[must_use]
    pub fn from_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            api_key: None,
        }
    }

    /// Creates credentials holding only an API key.
    #[must_use]
    pub fn from_api_key(api_key: impl Into<String>) -> Self {
        Self {
            token: None,
            api_key: Some(api_key.into()),
        }
    }

    /// Reads credentials from `SUBMODEL_TOKEN` / `SUBMODEL_API_KEY`.
    ///
    /// This is a constructor convenience; nothing in the crate reads the
    /// environment after construction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredentials`] if neither variable is set.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self, Error> {
        Self::new(lookup(Self::TOKEN_ENV), lookup(Self::API_KEY_ENV))
    }

    /// Adds a bearer token alongside the existing part.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Adds an API key alongside the existing part.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Returns the held bearer token, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns the held API key, if any.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Builds the base request headers.
    ///
    /// Always contains `Content-Type: application/json`, plus `x-token`
    /// and/or `x-apikey` for whichever parts are held. Callers merge their
    /// per-request headers on top of this map. No side effects.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if a credential contains bytes not
    /// permitted in an HTTP header value.
    pub fn header_map(&self) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = &self.token {
            headers.insert(
                HeaderName::from_static(Self::TOKEN_HEADER),
                header_value(Self::TOKEN_HEADER, token)?,
            );
        }
        if let Some(api_key) = &self.api_key {
            headers.insert(
                HeaderName::from_static(Self::API_KEY_HEADER),
                header_value(Self::API_KEY_HEADER, api_key)?,
            );
        }

        Ok(headers)
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, Error> {
    HeaderValue::from_str(value).map_err(|_| {
        Error::Validation(format!("{name} contains characters not allowed in headers"))
    })
}

#[cfg(test)]
#[path = "credentials_tests.rs"]
mod credentials_tests;
