//! Serverless endpoint operations.

use serde::Serialize;

use super::job::{BlockingJob, Job};
use crate::Client;
use crate::blocking;
use crate::envelope::Envelope;
use crate::error::Error;
use crate::request::ApiRequest;
use crate::time::{BlockingSleeper, Sleeper};
use crate::transport::{BlockingHttpClient, Connector};

/// Task submissions wrap the caller's payload under an `input` key.
#[derive(Serialize)]
struct RunPayload<'a, I: Serialize + ?Sized> {
    input: &'a I,
}

fn run_request<I: Serialize + ?Sized>(inst_id: &str, input: &I) -> Result<ApiRequest, Error> {
    ApiRequest::post(format!("sl/{inst_id}/run")).json(&RunPayload { input })
}

fn run_sync_request<I: Serialize + ?Sized>(inst_id: &str, input: &I) -> Result<ApiRequest, Error> {
    ApiRequest::post(format!("sl/{inst_id}/runsync")).json(&RunPayload { input })
}

pub(super) fn status_request(inst_id: &str, job_id: &str) -> ApiRequest {
    ApiRequest::get(format!("sl/{inst_id}/status/{job_id}"))
}

pub(super) fn cancel_request(inst_id: &str, job_id: &str) -> ApiRequest {
    ApiRequest::get(format!("sl/{inst_id}/cancel/{job_id}"))
}

/// Serverless operations for one instance on the async client.
///
/// Obtained from [`Client::serverless`]; borrows the client and carries
/// the instance identifier every route embeds.
pub struct ServerlessEndpoint<'a, C: Connector, S> {
    client: &'a Client<C, S>,
    inst_id: String,
}

impl<'a, C: Connector, S> ServerlessEndpoint<'a, C, S> {
    pub(crate) fn new(client: &'a Client<C, S>, inst_id: String) -> Self {
        Self { client, inst_id }
    }

    /// The instance this endpoint view is bound to.
    #[must_use]
    pub fn inst_id(&self) -> &str {
        &self.inst_id
    }

    /// Job view for one task submitted to this endpoint.
    #[must_use]
    pub fn job(&self, job_id: impl Into<String>) -> Job<'a, C, S> {
        Job::new(self.client, self.inst_id.clone(), job_id.into())
    }
}

impl<C: Connector, S: Sleeper> ServerlessEndpoint<'_, C, S> {
    /// Submits a task for asynchronous execution.
    ///
    /// The payload is wrapped under an `input` key; the returned envelope
    /// carries the job identifier to poll with.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn run<I: Serialize + ?Sized>(&self, input: &I) -> Result<Envelope, Error> {
        self.client.execute(run_request(&self.inst_id, input)?).await
    }

    /// Submits a task and waits for its result in one round trip.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn run_sync<I: Serialize + ?Sized>(&self, input: &I) -> Result<Envelope, Error> {
        self.client
            .execute(run_sync_request(&self.inst_id, input)?)
            .await
    }

    /// Fetches the status of a submitted job.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn status(&self, job_id: &str) -> Result<Envelope, Error> {
        self.client.execute(status_request(&self.inst_id, job_id)).await
    }

    /// Cancels a submitted job.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn cancel(&self, job_id: &str) -> Result<Envelope, Error> {
        self.client.execute(cancel_request(&self.inst_id, job_id)).await
    }

    /// Fetches the endpoint's health status.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn health(&self) -> Result<Envelope, Error> {
        self.client.get(&format!("sl/{}/health", self.inst_id)).await
    }

    /// Fetches the endpoint's metrics.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn metrics(&self) -> Result<Envelope, Error> {
        self.client.get(&format!("sl/{}/metrics", self.inst_id)).await
    }

    /// Lists recent requests against the endpoint.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn requests(&self) -> Result<Envelope, Error> {
        self.client.get(&format!("sl/{}/_requests", self.inst_id)).await
    }

    /// Fetches details for one request.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn request_details(&self, request_id: &str) -> Result<Envelope, Error> {
        self.client
            .get(&format!("sl/{}/_requests/{request_id}", self.inst_id))
            .await
    }

    /// Lists the models available on the endpoint.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn models(&self) -> Result<Envelope, Error> {
        self.client.get(&format!("sl/{}/models", self.inst_id)).await
    }

    /// Fetches information about one model.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn model_info(&self, model_id: &str) -> Result<Envelope, Error> {
        self.client
            .get(&format!("sl/{}/models/{model_id}", self.inst_id))
            .await
    }
}

/// Serverless operations for one instance on the blocking client.
pub struct BlockingServerlessEndpoint<'a, T, S> {
    client: &'a blocking::Client<T, S>,
    inst_id: String,
}

impl<'a, T, S> BlockingServerlessEndpoint<'a, T, S> {
    pub(crate) fn new(client: &'a blocking::Client<T, S>, inst_id: String) -> Self {
        Self { client, inst_id }
    }

    /// The instance this endpoint view is bound to.
    #[must_use]
    pub fn inst_id(&self) -> &str {
        &self.inst_id
    }

    /// Job view for one task submitted to this endpoint.
    #[must_use]
    pub fn job(&self, job_id: impl Into<String>) -> BlockingJob<'a, T, S> {
        BlockingJob::new(self.client, self.inst_id.clone(), job_id.into())
    }
}

impl<T: BlockingHttpClient, S: BlockingSleeper> BlockingServerlessEndpoint<'_, T, S> {
    /// Submits a task for asynchronous execution.
    ///
    /// # Errors
    ///
    /// See [`blocking::Client::execute`].
    pub fn run<I: Serialize + ?Sized>(&self, input: &I) -> Result<Envelope, Error> {
        self.client.execute(run_request(&self.inst_id, input)?)
    }

    /// Submits a task and waits for its result in one round trip.
    ///
    /// # Errors
    ///
    /// See [`blocking::Client::execute`].
    pub fn run_sync<I: Serialize + ?Sized>(&self, input: &I) -> Result<Envelope, Error> {
        self.client.execute(run_sync_request(&self.inst_id, input)?)
    }

    /// Fetches the status of a submitted job.
    ///
    /// # Errors
    ///
    /// See [`blocking::Client::execute`].
    pub fn status(&self, job_id: &str) -> Result<Envelope, Error> {
        self.client.execute(status_request(&self.inst_id, job_id))
    }

    /// Cancels a submitted job.
    ///
    /// # Errors
    ///
    /// See [`blocking::Client::execute`].
    pub fn cancel(&self, job_id: &str) -> Result<Envelope, Error> {
        self.client.execute(cancel_request(&self.inst_id, job_id))
    }

    /// Fetches the endpoint's health status.
    ///
    /// # Errors
    ///
    /// See [`blocking::Client::execute`].
    pub fn health(&self) -> Result<Envelope, Error> {
        self.client.get(&format!("sl/{}/health", self.inst_id))
    }

    /// Fetches the endpoint's metrics.
    ///
    /// # Errors
    ///
    /// See [`blocking::Client::execute`].
    pub fn metrics(&self) -> Result<Envelope, Error> {
        self.client.get(&format!("sl/{}/metrics", self.inst_id))
    }

    /// Lists recent requests against the endpoint.
    ///
    /// # Errors
    ///
    /// See [`blocking::Client::execute`].
    pub fn requests(&self) -> Result<Envelope, Error> {
        self.client.get(&format!("sl/{}/_requests", self.inst_id))
    }

    /// Fetches details for one request.
    ///
    /// # Errors
    ///
    /// See [`blocking::Client::execute`].
    pub fn request_details(&self, request_id: &str) -> Result<Envelope, Error> {
        self.client
            .get(&format!("sl/{}/_requests/{request_id}", self.inst_id))
    }

    /// Lists the models available on the endpoint.
    ///
    /// # Errors
    ///
    /// See [`blocking::Client::execute`].
    pub fn models(&self) -> Result<Envelope, Error> {
        self.client.get(&format!("sl/{}/models", self.inst_id))
    }

    /// Fetches information about one model.
    ///
    /// # Errors
    ///
    /// See [`blocking::Client::execute`].
    pub fn model_info(&self, model_id: &str) -> Result<Envelope, Error> {
        self.client.get(&format!("sl/{}/models/{model_id}", self.inst_id))
    }
}
