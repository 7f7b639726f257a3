//! Blocking client for synchronous callers.
//!
//! The blocking twin of [`crate::Client`]: the same credential handling,
//! URL resolution, retry pipeline, and envelope decoding, driven without
//! an async runtime. Backoff sleeps hold the calling thread.

use serde::Serialize;
use tracing::{debug, error, warn};

use crate::DEFAULT_BASE_URL;
use crate::api::{
    BlockingAreas, BlockingAuth, BlockingBaremetal, BlockingDevices, BlockingInstances,
    BlockingJob, BlockingServerlessEndpoint,
};
use crate::credentials::Credentials;
use crate::envelope::{Envelope, decode_response};
use crate::error::Error;
use crate::request::{ApiRequest, Query};
use crate::retry::RetryConfig;
use crate::time::{BlockingSleeper, ThreadSleeper};
use crate::transport::{BlockingHttpClient, BlockingReqwestClient};

/// Blocking SubModel API client.
///
/// Unlike the async client there is no session scope: the transport is
/// created up front and lives as long as the client. Retry behavior is
/// identical, with backoff sleeps blocking the calling thread.
///
/// # Example
///
/// ```no_run
/// use submodel::blocking::Client;
/// use submodel::Credentials;
///
/// # fn example() -> submodel::Result<()> {
/// let client = Client::new(Credentials::from_token("tok"))?;
/// let areas = client.get("area/list")?;
/// println!("{}", areas.data);
/// # Ok(())
/// # }
/// ```
pub struct Client<T = BlockingReqwestClient, S = ThreadSleeper> {
    transport: T,
    sleeper: S,
    credentials: Credentials,
    retry: RetryConfig,
    base_url: String,
}

impl Client<BlockingReqwestClient, ThreadSleeper> {
    /// Creates a client with the production transport and sleeper.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the HTTP client cannot be built.
    pub fn new(credentials: Credentials) -> Result<Self, Error> {
        Ok(Self::with_transport(
            BlockingReqwestClient::new()?,
            credentials,
        ))
    }
}

impl<T> Client<T, ThreadSleeper> {
    /// Creates a client with a custom transport.
    #[must_use]
    pub fn with_transport(transport: T, credentials: Credentials) -> Self {
        Self {
            transport,
            sleeper: ThreadSleeper,
            credentials,
            retry: RetryConfig::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl<T, S> Client<T, S> {
    /// Sets a custom sleeper for backoff delays.
    ///
    /// This is primarily useful for testing to avoid actual delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> Client<T, S2> {
        Client {
            transport: self.transport,
            sleeper,
            credentials: self.credentials,
            retry: self.retry,
            base_url: self.base_url,
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
}

impl<T: BlockingHttpClient, S: BlockingSleeper> Client<T, S> {
    /// Executes one API request through the retry pipeline.
    ///
    /// The blocking counterpart of [`crate::Client::execute`]: transport
    /// failures are retried per the retry configuration, an arrived
    /// response goes straight through the status gate, envelope decode,
    /// and code mapping.
    ///
    /// # Errors
    ///
    /// Returns the last [`Error::Transport`] after retry exhaustion, or
    /// the decoded failure per [`Envelope::check`].
    pub fn execute(&self, request: ApiRequest) -> Result<Envelope, Error> {
        let http_request = request.resolve(&self.base_url, self.credentials.header_map()?)?;
        debug!(method = %http_request.method, url = %http_request.url, "dispatching request");

        let mut attempt: u32 = 0;
        loop {
            match self.transport.request(http_request.clone()) {
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
                    self.sleeper.sleep(delay);
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
    pub fn get(&self, endpoint: &str) -> Result<Envelope, Error> {
        self.execute(ApiRequest::get(endpoint))
    }

    /// Sends a GET request with query parameters.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub fn get_with(&self, endpoint: &str, query: Query) -> Result<Envelope, Error> {
        self.execute(ApiRequest::get(endpoint).with_query(query))
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub fn post<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Result<Envelope, Error> {
        self.execute(ApiRequest::post(endpoint).json(body)?)
    }

    /// Sends a POST request without a body.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub fn post_empty(&self, endpoint: &str) -> Result<Envelope, Error> {
        self.execute(ApiRequest::post(endpoint))
    }

    /// Account and API-key operations.
    #[must_use]
    pub const fn auth(&self) -> BlockingAuth<'_, T, S> {
        BlockingAuth::new(self)
    }

    /// Compute instance operations.
    #[must_use]
    pub const fn instances(&self) -> BlockingInstances<'_, T, S> {
        BlockingInstances::new(self)
    }

    /// Device operations.
    #[must_use]
    pub const fn devices(&self) -> BlockingDevices<'_, T, S> {
        BlockingDevices::new(self)
    }

    /// Area (region) operations.
    #[must_use]
    pub const fn areas(&self) -> BlockingAreas<'_, T, S> {
        BlockingAreas::new(self)
    }

    /// Bare-metal server operations.
    #[must_use]
    pub const fn baremetal(&self) -> BlockingBaremetal<'_, T, S> {
        BlockingBaremetal::new(self)
    }

    /// Serverless endpoint operations for one instance.
    #[must_use]
    pub fn serverless(&self, inst_id: impl Into<String>) -> BlockingServerlessEndpoint<'_, T, S> {
        BlockingServerlessEndpoint::new(self, inst_id.into())
    }

    /// Job view for one serverless job.
    #[must_use]
    pub fn job(
        &self,
        inst_id: impl Into<String>,
        job_id: impl Into<String>,
    ) -> BlockingJob<'_, T, S> {
        BlockingJob::new(self, inst_id.into(), job_id.into())
    }
}

impl<T, S> std::fmt::Debug for Client<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "blocking_tests.rs"]
mod blocking_tests;
