//! HTTP request/response types and transport traits.

use super::TransportError;

/// An HTTP request to be dispatched.
///
/// A plain value type, constructed once and handed to any [`HttpClient`]
/// or [`BlockingHttpClient`] implementation.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method (GET, POST, PUT, DELETE, etc.)
    pub method: http::Method,
    /// Fully resolved target URL
    pub url: url::Url,
    /// HTTP headers to send
    pub headers: http::HeaderMap,
    /// Optional request body
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Creates a new HTTP request with the given method and URL.
    ///
    /// Headers are initialized to an empty map and body is `None`.
    #[must_use]
    pub fn new(method: http::Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: http::HeaderMap::new(),
            body: None,
        }
    }

    /// Creates a GET request to the given URL.
    #[must_use]
    pub fn get(url: url::Url) -> Self {
        Self::new(http::Method::GET, url)
    }

    /// Creates a POST request to the given URL.
    #[must_use]
    pub fn post(url: url::Url) -> Self {
        Self::new(http::Method::POST, url)
    }

    /// Sets the request body.
    #[must_use]
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds a header to the request.
    ///
    /// If the header name already exists, the value is appended
    /// (HTTP headers can have multiple values).
    #[must_use]
    pub fn with_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }
}

/// An HTTP response received from a server.
///
/// Contains the status code, headers, and body of the response.
/// The body is fully buffered into memory.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: http::StatusCode,
    /// Response headers
    pub headers: http::HeaderMap,
    /// Response body (fully buffered)
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a new HTTP response.
    #[must_use]
    pub const fn new(status: http::StatusCode, headers: http::HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns the body as a UTF-8 string, if valid.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }
}

/// Trait for non-blocking HTTP dispatch.
///
/// Implementations are expected to be cheap to share (connection pooling
/// lives behind them) and safe for concurrent use.
///
/// # Example
///
/// ```ignore
/// use submodel::transport::{HttpClient, HttpRequest, HttpResponse, TransportError};
///
/// struct MockTransport {
///     response: HttpResponse,
/// }
///
/// impl HttpClient for MockTransport {
///     async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, TransportError> {
///         Ok(self.response.clone())
///     }
/// }
/// ```
pub trait HttpClient: Send + Sync {
    /// Dispatches an HTTP request and returns the response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when:
    /// - Network connection fails ([`TransportError::Connection`])
    /// - Request times out ([`TransportError::Timeout`])
    /// - URL is unusable ([`TransportError::InvalidUrl`])
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// Trait for blocking HTTP dispatch.
///
/// The blocking twin of [`HttpClient`], used by the blocking client. The
/// calling thread is held for the duration of the request.
pub trait BlockingHttpClient: Send + Sync {
    /// Dispatches an HTTP request and returns the response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] under the same conditions as
    /// [`HttpClient::request`].
    fn request(&self, req: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Factory for session-scoped transports.
///
/// The async client creates its pooled transport lazily when a session
/// scope is entered and drops it when the last scope exits. A `Connector`
/// is what performs that creation, which keeps the pool's lifetime in the
/// client's hands and lets tests observe exactly how many pools are built.
pub trait Connector: Send + Sync {
    /// The transport this connector produces.
    type Transport: HttpClient;

    /// Builds a fresh pooled transport.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the underlying client cannot be
    /// constructed (for example, TLS backend initialization failure).
    fn connect(&self) -> Result<Self::Transport, TransportError>;
}
