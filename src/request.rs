//! API request description built by resource wrappers.

use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;
use url::Url;

use crate::error::Error;
use crate::transport::{HttpRequest, TransportError};

/// Ordered query-string parameters.
///
/// Optional parameters are dropped entirely when absent rather than being
/// encoded as empty values, matching the service's expectations.
///
/// # Example
///
/// ```
/// use submodel::Query;
///
/// let query = Query::new()
///     .pair("page", 1)
///     .pair("limit", 10)
///     .maybe_pair("search", None::<&str>);
///
/// assert_eq!(query.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query(Vec<(String, String)>);

impl Query {
    /// Creates an empty query.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends one key/value pair.
    #[must_use]
    pub fn pair(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.0.push((key.into(), value.to_string()));
        self
    }

    /// Appends one key/value pair if the value is present.
    #[must_use]
    pub fn maybe_pair(self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.pair(key, value),
            None => self,
        }
    }

    /// Number of pairs held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no pairs are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The held pairs, in insertion order.
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    fn append_to(&self, url: &mut Url) {
        if self.0.is_empty() {
            return;
        }
        let mut pairs = url.query_pairs_mut();
        for (key, value) in &self.0 {
            pairs.append_pair(key, value);
        }
    }
}

/// Description of one API call before execution.
///
/// Holds everything the executors need to resolve a concrete
/// [`HttpRequest`]: method, endpoint fragment, query parameters, extra
/// headers, and an optional pre-serialized JSON body. Resource wrappers
/// build these; the executors resolve and dispatch them.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Endpoint fragment relative to the base URL. Leading slashes are
    /// normalized away at resolution, so `x/y` and `/x/y` are equivalent.
    pub endpoint: String,
    /// Query-string parameters.
    pub query: Query,
    /// Extra headers merged over the credential headers; on name collision
    /// the extra value wins.
    pub headers: HeaderMap,
    /// Pre-serialized JSON body, if any.
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    /// Creates a request with the given method and endpoint.
    #[must_use]
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            query: Query::new(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Creates a GET request for the given endpoint.
    #[must_use]
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint)
    }

    /// Creates a POST request for the given endpoint.
    #[must_use]
    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::POST, endpoint)
    }

    /// Sets the query parameters.
    #[must_use]
    pub fn with_query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }

    /// Adds an extra header.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Serializes `body` as the JSON request body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if serialization fails.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, Error> {
        self.body = Some(serde_json::to_vec(body)?);
        Ok(self)
    }

    /// Resolves this description against a base URL and base headers into
    /// a dispatchable [`HttpRequest`].
    ///
    /// The URL is the base joined with the endpoint by exactly one slash;
    /// leading slashes on the endpoint are stripped first. Extra headers
    /// replace base headers of the same name.
    pub(crate) fn resolve(
        &self,
        base_url: &str,
        base_headers: HeaderMap,
    ) -> Result<HttpRequest, Error> {
        let joined = format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            self.endpoint.trim_start_matches('/')
        );
        let mut url = Url::parse(&joined)
            .map_err(|e| TransportError::InvalidUrl(format!("{joined}: {e}")))?;
        self.query.append_to(&mut url);

        let mut headers = base_headers;
        for (name, value) in &self.headers {
            headers.insert(name, value.clone());
        }

        let mut request = HttpRequest::new(self.method.clone(), url);
        request.headers = headers;
        request.body = self.body.clone();
        Ok(request)
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod request_tests;
