//! Job views over submitted serverless tasks.

use std::time::{Duration, Instant};

use serde_json::Value;

use super::serverless::{cancel_request, status_request};
use crate::Client;
use crate::blocking;
use crate::envelope::Envelope;
use crate::error::Error;
use crate::time::{BlockingSleeper, Sleeper};
use crate::transport::{BlockingHttpClient, Connector};

/// How long [`Job::wait`] pauses between status polls.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Status values after which a job will never change again.
const TERMINAL_STATES: [&str; 3] = ["completed", "failed", "cancelled"];

/// Returns true once the envelope's `data.status` is terminal.
fn finished(envelope: &Envelope) -> bool {
    envelope
        .data
        .get("status")
        .and_then(Value::as_str)
        .is_some_and(|status| TERMINAL_STATES.contains(&status))
}

/// A view of one submitted job on the async client.
///
/// Obtained from [`Client::job`]; borrows the client and carries the
/// instance and job identifiers its routes embed.
pub struct Job<'a, C: Connector, S> {
    client: &'a Client<C, S>,
    inst_id: String,
    job_id: String,
}

impl<'a, C: Connector, S> Job<'a, C, S> {
    pub(crate) fn new(client: &'a Client<C, S>, inst_id: String, job_id: String) -> Self {
        Self {
            client,
            inst_id,
            job_id,
        }
    }

    /// The instance this job ran on.
    #[must_use]
    pub fn inst_id(&self) -> &str {
        &self.inst_id
    }

    /// The job identifier.
    #[must_use]
    pub fn job_id(&self) -> &str {
        &self.job_id
    }
}

impl<C: Connector, S: Sleeper> Job<'_, C, S> {
    /// Fetches the job's current status.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn status(&self) -> Result<Envelope, Error> {
        self.client
            .execute(status_request(&self.inst_id, &self.job_id))
            .await
    }

    /// Cancels the job.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn cancel(&self) -> Result<Envelope, Error> {
        self.client
            .execute(cancel_request(&self.inst_id, &self.job_id))
            .await
    }

    /// Polls the job until its `data.status` turns terminal
    /// (`completed`, `failed`, or `cancelled`) and returns the final
    /// status envelope.
    ///
    /// Polls every [`POLL_INTERVAL`]. With `timeout = None` this waits
    /// indefinitely.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] once `timeout` elapses without the job
    /// turning terminal, or any error from the underlying status calls.
    pub async fn wait(&self, timeout: Option<Duration>) -> Result<Envelope, Error> {
        let start = Instant::now();
        loop {
            let envelope = self.status().await?;
            if finished(&envelope) {
                return Ok(envelope);
            }
            if let Some(limit) = timeout {
                if start.elapsed() > limit {
                    return Err(Error::Timeout(limit.as_secs()));
                }
            }
            self.client.sleeper().sleep(POLL_INTERVAL).await;
        }
    }
}

/// A view of one submitted job on the blocking client.
pub struct BlockingJob<'a, T, S> {
    client: &'a blocking::Client<T, S>,
    inst_id: String,
    job_id: String,
}

impl<'a, T, S> BlockingJob<'a, T, S> {
    pub(crate) fn new(client: &'a blocking::Client<T, S>, inst_id: String, job_id: String) -> Self {
        Self {
            client,
            inst_id,
            job_id,
        }
    }

    /// The instance this job ran on.
    #[must_use]
    pub fn inst_id(&self) -> &str {
        &self.inst_id
    }

    /// The job identifier.
    #[must_use]
    pub fn job_id(&self) -> &str {
        &self.job_id
    }
}

impl<T: BlockingHttpClient, S: BlockingSleeper> BlockingJob<'_, T, S> {
    /// Fetches the job's current status.
    ///
    /// # Errors
    ///
    /// See [`blocking::Client::execute`].
    pub fn status(&self) -> Result<Envelope, Error> {
        self.client
            .execute(status_request(&self.inst_id, &self.job_id))
    }

    /// Cancels the job.
    ///
    /// # Errors
    ///
    /// See [`blocking::Client::execute`].
    pub fn cancel(&self) -> Result<Envelope, Error> {
        self.client
            .execute(cancel_request(&self.inst_id, &self.job_id))
    }

    /// Polls the job until its `data.status` turns terminal
    /// (`completed`, `failed`, or `cancelled`) and returns the final
    /// status envelope.
    ///
    /// The blocking counterpart of [`Job::wait`]; the calling thread is
    /// held between polls.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] once `timeout` elapses without the job
    /// turning terminal, or any error from the underlying status calls.
    pub fn wait(&self, timeout: Option<Duration>) -> Result<Envelope, Error> {
        let start = Instant::now();
        loop {
            let envelope = self.status()?;
            if finished(&envelope) {
                return Ok(envelope);
            }
            if let Some(limit) = timeout {
                if start.elapsed() > limit {
                    return Err(Error::Timeout(limit.as_secs()));
                }
            }
            self.client.sleeper().sleep(POLL_INTERVAL);
        }
    }
}
