//! Shared test doubles for the client and wrapper tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use http::StatusCode;
use serde_json::{Value, json};

use crate::client::Client;
use crate::credentials::Credentials;
use crate::time::{BlockingSleeper, InstantSleeper, Sleeper};
use crate::transport::{
    BlockingHttpClient, Connector, HttpClient, HttpRequest, HttpResponse, TransportError,
};

/// Serialized `{code, message, data}` body.
pub(crate) fn envelope_body(code: i64, message: &str, data: Value) -> Vec<u8> {
    serde_json::to_vec(&json!({"code": code, "message": message, "data": data})).unwrap()
}

/// A 200 response carrying the given envelope.
pub(crate) fn envelope_response(code: i64, message: &str, data: Value) -> HttpResponse {
    HttpResponse::new(
        StatusCode::OK,
        http::HeaderMap::new(),
        envelope_body(code, message, data),
    )
}

/// A 200 response carrying a success envelope with the given data.
pub(crate) fn success_response(data: Value) -> HttpResponse {
    envelope_response(20000, "success", data)
}

/// Mock transport that returns a configurable sequence of results and
/// records every dispatched request. Implements both the async and the
/// blocking transport trait, so one double serves both clients.
#[derive(Debug)]
pub(crate) struct MockTransport {
    results: Mutex<Vec<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
    call_count: AtomicUsize,
}

impl MockTransport {
    pub(crate) fn new(results: Vec<Result<HttpResponse, TransportError>>) -> Self {
        Self {
            results: Mutex::new(results),
            requests: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    /// One success envelope with null data.
    pub(crate) fn success() -> Self {
        Self::new(vec![Ok(success_response(Value::Null))])
    }

    /// `failures` retryable errors, then a success envelope.
    pub(crate) fn failing_then_success(failures: usize) -> Self {
        let mut results: Vec<Result<HttpResponse, TransportError>> = Vec::new();
        for _ in 0..failures {
            results.push(Err(TransportError::Timeout));
        }
        results.push(Ok(success_response(Value::Null)));
        Self::new(results)
    }

    /// `failures` retryable errors and nothing else.
    pub(crate) fn always_failing(failures: usize) -> Self {
        Self::new((0..failures).map(|_| Err(TransportError::Timeout)).collect())
    }

    fn dispatch(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);
        self.results.lock().unwrap().remove(0)
    }

    pub(crate) fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub(crate) fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The one captured request; panics if there is not exactly one.
    pub(crate) fn only_request(&self) -> HttpRequest {
        let requests = self.captured_requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }
}

impl HttpClient for MockTransport {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.dispatch(req)
    }
}

impl HttpClient for Arc<MockTransport> {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.dispatch(req)
    }
}

impl BlockingHttpClient for MockTransport {
    fn request(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.dispatch(req)
    }
}

impl BlockingHttpClient for Arc<MockTransport> {
    fn request(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.dispatch(req)
    }
}

/// Connector handing out a shared [`MockTransport`], counting how many
/// times a transport was built. Clones share the transport and the
/// count, so a test can keep a probe after moving one into a client.
#[derive(Debug, Clone)]
pub(crate) struct MockConnector {
    transport: Arc<MockTransport>,
    connect_count: Arc<AtomicUsize>,
}

impl MockConnector {
    pub(crate) fn new(transport: Arc<MockTransport>) -> Self {
        Self {
            transport,
            connect_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn connects(&self) -> usize {
        self.connect_count.load(Ordering::SeqCst)
    }
}

impl Connector for MockConnector {
    type Transport = Arc<MockTransport>;

    fn connect(&self) -> Result<Self::Transport, TransportError> {
        self.connect_count.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::clone(&self.transport))
    }
}

/// Connector that always fails, for session-open error paths.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FailingConnector;

impl Connector for FailingConnector {
    type Transport = MockTransport;

    fn connect(&self) -> Result<Self::Transport, TransportError> {
        Err(TransportError::InvalidUrl("mock connect failure".to_string()))
    }
}

/// Sleeper that returns immediately and records every requested delay.
/// Clones share the same recording.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingSleeper {
    sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn recorded(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

impl BlockingSleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

/// An async client wired to the given transport, with instant sleeps.
pub(crate) fn client_with(transport: Arc<MockTransport>) -> Client<MockConnector, InstantSleeper> {
    Client::with_connector(MockConnector::new(transport), Credentials::from_token("tok-123"))
        .with_sleeper(InstantSleeper)
}

/// A blocking client wired to the given transport, with instant sleeps.
pub(crate) fn blocking_client_with(
    transport: Arc<MockTransport>,
) -> crate::blocking::Client<Arc<MockTransport>, InstantSleeper> {
    crate::blocking::Client::with_transport(transport, Credentials::from_token("tok"))
        .with_sleeper(InstantSleeper)
}
