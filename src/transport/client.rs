//! Production transport implementations using reqwest.

use std::time::Duration;

use super::{BlockingHttpClient, Connector, HttpClient, HttpRequest, HttpResponse, TransportError};

/// Default request timeout applied by the production transports.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Maps a reqwest dispatch failure into a [`TransportError`].
fn map_dispatch_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_builder() {
        TransportError::InvalidUrl(e.to_string())
    } else {
        TransportError::Connection(Box::new(e))
    }
}

/// Production non-blocking transport using `reqwest::Client`.
///
/// A thin wrapper that implements the [`HttpClient`] trait. The inner
/// client carries the connection pool, so clones share the same pool.
///
/// # Example
///
/// ```no_run
/// use submodel::transport::{ReqwestClient, HttpClient, HttpRequest};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ReqwestClient::new();
/// let url = Url::parse("https://api.submodel.ai/api/v1/area/list")?;
/// let response = client.request(HttpRequest::get(url)).await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a transport with reqwest's default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
        }
    }

    /// Creates a transport from an existing reqwest client.
    ///
    /// Useful when you need custom configuration (timeouts, TLS, proxies).
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { inner: client }
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.inner.request(req.method, req.url.as_str());

        for (name, value) in &req.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(map_dispatch_error)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Connection(Box::new(e)))?
            .to_vec();

        Ok(HttpResponse::new(status, headers, body))
    }
}

/// Production blocking transport using `reqwest::blocking::Client`.
///
/// The blocking twin of [`ReqwestClient`], implementing
/// [`BlockingHttpClient`]. Must not be used from within an async runtime;
/// use [`ReqwestClient`] there instead.
#[derive(Debug, Clone)]
pub struct BlockingReqwestClient {
    inner: reqwest::blocking::Client,
}

impl BlockingReqwestClient {
    /// Creates a blocking transport with the default request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Connection`] if the underlying client
    /// cannot be constructed.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Creates a blocking transport with a custom request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Connection`] if the underlying client
    /// cannot be constructed.
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let inner = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Connection(Box::new(e)))?;
        Ok(Self { inner })
    }

    /// Creates a blocking transport from an existing reqwest client.
    #[must_use]
    pub const fn from_client(client: reqwest::blocking::Client) -> Self {
        Self { inner: client }
    }
}

impl BlockingHttpClient for BlockingReqwestClient {
    fn request(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.inner.request(req.method, req.url.as_str());

        for (name, value) in &req.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder.send().map_err(map_dispatch_error)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .map_err(|e| TransportError::Connection(Box::new(e)))?
            .to_vec();

        Ok(HttpResponse::new(status, headers, body))
    }
}

/// Production connector building pooled [`ReqwestClient`] transports.
///
/// Stores only configuration; the pool itself is created by
/// [`Connector::connect`] each time a session opens and dropped when the
/// session closes.
#[derive(Debug, Clone)]
pub struct ReqwestConnector {
    timeout: Duration,
}

impl ReqwestConnector {
    /// Creates a connector with the default request timeout.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the request timeout applied to every request of the pools this
    /// connector builds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the configured request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for ReqwestConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl Connector for ReqwestConnector {
    type Transport = ReqwestClient;

    fn connect(&self) -> Result<ReqwestClient, TransportError> {
        let inner = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| TransportError::Connection(Box::new(e)))?;
        Ok(ReqwestClient::from_client(inner))
    }
}
