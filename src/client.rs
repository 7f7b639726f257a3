//! Asynchronous client: request execution and session lifecycle.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::{debug, error, warn};

use crate::DEFAULT_BASE_URL;
use crate::api::{Areas, Auth, Baremetal, Devices, Instances, Job, ServerlessEndpoint};
use crate::credentials::Credentials;
use crate::envelope::{Envelope, decode_response};
use crate::error::Error;
use crate::request::{ApiRequest, Query};
use crate::retry::RetryConfig;
use crate::time::{Sleeper, TokioSleeper};
use crate::transport::{Connector, HttpClient, ReqwestConnector};

/// Asynchronous SubModel API client.
///
/// Requests are only accepted while a session is open; open one with
/// [`Client::session`] and hold the returned guard for the duration of the
/// work. The session owns the pooled transport, created lazily on the
/// first acquisition and dropped when the last guard goes away, so its
/// lifetime is bracketed exactly by the guards on every exit path.
///
/// Transport-level failures are retried with exponential backoff per the
/// configured [`RetryConfig`]; server-reported failures never are.
///
/// # Type Parameters
///
/// - `C`: The connector building the session transport
/// - `S`: The sleeper used for backoff delays (defaults to [`TokioSleeper`])
///
/// # Example
///
/// ```no_run
/// use submodel::{Client, Credentials};
///
/// # async fn example() -> submodel::Result<()> {
/// let client = Client::new(Credentials::from_token("tok"));
/// let session = client.session()?;
/// let areas = session.get("area/list").await?;
/// println!("{}", areas.data);
/// # Ok(())
/// # }
/// ```
pub struct Client<C: Connector = ReqwestConnector, S = TokioSleeper> {
    connector: C,
    sleeper: S,
    credentials: Credentials,
    retry: RetryConfig,
    base_url: String,
    session: Mutex<SessionSlot<C::Transport>>,
}

/// Shared session state: the pooled transport plus the number of live
/// guards borrowing it.
struct SessionSlot<T> {
    transport: Option<Arc<T>>,
    depth: usize,
}

impl<T> SessionSlot<T> {
    const fn closed() -> Self {
        Self {
            transport: None,
            depth: 0,
        }
    }
}

impl Client<ReqwestConnector, TokioSleeper> {
    /// Creates a client with the production connector and sleeper.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self::with_connector(ReqwestConnector::new(), credentials)
    }
}

impl<C: Connector> Client<C, TokioSleeper> {
    /// Creates a client with a custom connector.
    #[must_use]
    pub fn with_connector(connector: C, credentials: Credentials) -> Self {
        Self {
            connector,
            sleeper: TokioSleeper,
            credentials,
            retry: RetryConfig::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            session: Mutex::new(SessionSlot::closed()),
        }
    }
}

impl<C: Connector, S> Client<C, S> {
    /// Sets a custom sleeper for backoff delays.
    ///
    /// This is primarily useful for testing to avoid actual delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> Client<C, S2> {
        Client {
            connector: self.connector,
            sleeper,
            credentials: self.credentials,
            retry: self.retry,
            base_url: self.base_url,
            session: self.session,
        }
    }

    /// Sets the retry configuration.
    #[must_use]
    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Overrides the base URL, mainly for tests against a local server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Returns the configured retry configuration.
    #[must_use]
    pub const fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    /// Returns the base URL requests resolve against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the held credentials.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub(crate) const fn sleeper(&self) -> &S {
        &self.sleeper
    }

    fn slot(&self) -> MutexGuard<'_, SessionSlot<C::Transport>> {
        // A poisoned slot only means a panic elsewhere while holding the
        // lock; the counter/transport pair is still coherent.
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Opens the session scope, creating the pooled transport if absent.
    ///
    /// The returned guard keeps the session alive and dereferences to the
    /// client, so requests can be issued directly on it. Re-entrant calls
    /// share the existing transport; the session closes when the last
    /// guard drops.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the connector cannot build the
    /// transport.
    pub fn session(&self) -> Result<SessionGuard<'_, C, S>, Error> {
        let mut slot = self.slot();
        if slot.transport.is_none() {
            slot.transport = Some(Arc::new(self.connector.connect()?));
            debug!("session opened");
        }
        slot.depth += 1;
        Ok(SessionGuard { client: self })
    }

    /// Returns true while a session is open.
    #[must_use]
    pub fn session_open(&self) -> bool {
        self.slot().transport.is_some()
    }

    /// Hands out the live session transport, or fails if none is open.
    ///
    /// The `Arc` keeps the pool alive for requests already in flight even
    /// if the last guard drops concurrently.
    fn session_transport(&self) -> Result<Arc<C::Transport>, Error> {
        self.slot().transport.clone().ok_or(Error::SessionClosed)
    }
}

impl<C: Connector, S: Sleeper> Client<C, S> {
    /// Executes one API request through the retry pipeline.
    ///
    /// Transport failures are retried per the retry configuration with
    /// non-blocking backoff sleeps; an arrived response is definitive and
    /// goes straight through the HTTP status gate, envelope decode, and
    /// code mapping.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SessionClosed`] when no session is open, the last
    /// [`Error::Transport`] after retry exhaustion, or the decoded
    /// failure per [`Envelope::check`].
    pub async fn execute(&self, request: ApiRequest) -> Result<Envelope, Error> {
        let transport = self.session_transport()?;
        let http_request = request.resolve(&self.base_url, self.credentials.header_map()?)?;
        debug!(method = %http_request.method, url = %http_request.url, "dispatching request");

        let mut attempt: u32 = 0;
        loop {
            match transport.request(http_request.clone()).await {
                Ok(response) => return decode_response(&response),
                Err(e) if e.is_retryable() && self.retry.should_retry(attempt) => {
                    let delay = self.retry.delay_for_attempt(attempt);
                    warn!(
                        attempt = attempt + 1,
                        max_retries = self.retry.max_retries,
                        delay = ?delay,
                        error = %e,
                        "transport failure, retrying"
                    );
                    self.sleeper.sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    error!(attempts = attempt + 1, error = %e, "request failed");
                    return Err(e.into());
                }
            }
        }
    }

    /// Sends a GET request to the given endpoint.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn get(&self, endpoint: &str) -> Result<Envelope, Error> {
        self.execute(ApiRequest::get(endpoint)).await
    }

    /// Sends a GET request with query parameters.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn get_with(&self, endpoint: &str, query: Query) -> Result<Envelope, Error> {
        self.execute(ApiRequest::get(endpoint).with_query(query)).await
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<Envelope, Error> {
        self.execute(ApiRequest::post(endpoint).json(body)?).await
    }

    /// Sends a POST request without a body.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn post_empty(&self, endpoint: &str) -> Result<Envelope, Error> {
        self.execute(ApiRequest::post(endpoint)).await
    }

    /// Account and API-key operations.
    #[must_use]
    pub const fn auth(&self) -> Auth<'_, C, S> {
        Auth::new(self)
    }

    /// Compute instance operations.
    #[must_use]
    pub const fn instances(&self) -> Instances<'_, C, S> {
        Instances::new(self)
    }

    /// Device operations.
    #[must_use]
    pub const fn devices(&self) -> Devices<'_, C, S> {
        Devices::new(self)
    }

    /// Area (region) operations.
    #[must_use]
    pub const fn areas(&self) -> Areas<'_, C, S> {
        Areas::new(self)
    }

    /// Bare-metal server operations.
    #[must_use]
    pub const fn baremetal(&self) -> Baremetal<'_, C, S> {
        Baremetal::new(self)
    }

    /// Serverless endpoint operations for one instance.
    #[must_use]
    pub fn serverless(&self, inst_id: impl Into<String>) -> ServerlessEndpoint<'_, C, S> {
        ServerlessEndpoint::new(self, inst_id.into())
    }

    /// Job view for one serverless job.
    #[must_use]
    pub fn job(&self, inst_id: impl Into<String>, job_id: impl Into<String>) -> Job<'_, C, S> {
        Job::new(self, inst_id.into(), job_id.into())
    }
}

impl<C: Connector, S> std::fmt::Debug for Client<C, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("retry", &self.retry)
            .field("session_open", &self.session_open())
            .finish_non_exhaustive()
    }
}

/// RAII handle for an open session scope.
///
/// Dereferences to the [`Client`], so requests are issued directly on the
/// guard. Dropping it exits the scope; the underlying transport is
/// released when the last guard for the client drops, which covers early
/// returns, `?` propagation, panics, and task cancellation alike.
pub struct SessionGuard<'a, C: Connector, S> {
    client: &'a Client<C, S>,
}

impl<C: Connector, S> std::fmt::Debug for SessionGuard<'_, C, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionGuard")
            .field("client", &self.client)
            .finish()
    }
}

impl<C: Connector, S> std::ops::Deref for SessionGuard<'_, C, S> {
    type Target = Client<C, S>;

    fn deref(&self) -> &Self::Target {
        self.client
    }
}

impl<C: Connector, S> Drop for SessionGuard<'_, C, S> {
    fn drop(&mut self) {
        let mut slot = self.client.slot();
        slot.depth = slot.depth.saturating_sub(1);
        if slot.depth == 0 && slot.transport.take().is_some() {
            debug!("session closed");
        }
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod client_tests;
