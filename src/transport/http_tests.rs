//! Tests for HTTP request/response types and the transport traits.

use super::{
    BlockingHttpClient, Connector, HttpClient, HttpRequest, HttpResponse, TransportError,
};

fn test_url() -> url::Url {
    url::Url::parse("https://api.submodel.ai/api/v1/area/list").unwrap()
}

mod http_request {
    use super::*;

    #[test]
    fn new_creates_request_with_method_and_url() {
        let url = test_url();
        let req = HttpRequest::new(http::Method::PUT, url.clone());

        assert_eq!(req.method, http::Method::PUT);
        assert_eq!(req.url, url);
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn get_creates_get_request() {
        let req = HttpRequest::get(test_url());

        assert_eq!(req.method, http::Method::GET);
    }

    #[test]
    fn post_creates_post_request() {
        let req = HttpRequest::post(test_url());

        assert_eq!(req.method, http::Method::POST);
    }

    #[test]
    fn with_body_sets_body() {
        let body = br#"{"input":{}}"#.to_vec();
        let req = HttpRequest::post(test_url()).with_body(body.clone());

        assert_eq!(req.body, Some(body));
    }

    #[test]
    fn with_header_adds_single_header() {
        let req = HttpRequest::get(test_url()).with_header(
            http::HeaderName::from_static("x-token"),
            http::HeaderValue::from_static("tok-123"),
        );

        assert_eq!(req.headers.get("x-token").unwrap(), "tok-123");
    }

    #[test]
    fn with_header_appends_multiple_values_for_same_name() {
        let req = HttpRequest::get(test_url())
            .with_header(
                http::header::ACCEPT,
                http::HeaderValue::from_static("text/html"),
            )
            .with_header(
                http::header::ACCEPT,
                http::HeaderValue::from_static("application/json"),
            );

        assert_eq!(req.headers.get_all(http::header::ACCEPT).iter().count(), 2);
    }

    #[test]
    fn clone_creates_independent_copy() {
        let req1 = HttpRequest::post(test_url()).with_body(b"original".to_vec());
        let req2 = req1.clone();

        assert_eq!(req1.body, req2.body);
        assert_eq!(req1.method, req2.method);
    }

    #[test]
    fn debug_format_is_readable() {
        let req = HttpRequest::get(test_url());
        let debug = format!("{req:?}");

        assert!(debug.contains("HttpRequest"));
        assert!(debug.contains("GET"));
    }
}

mod http_response {
    use super::*;

    #[test]
    fn new_creates_response_with_all_fields() {
        let body = br#"{"code":20000}"#.to_vec();
        let resp = HttpResponse::new(http::StatusCode::OK, http::HeaderMap::new(), body.clone());

        assert_eq!(resp.status, http::StatusCode::OK);
        assert!(resp.headers.is_empty());
        assert_eq!(resp.body, body);
    }

    #[test]
    fn is_success_returns_true_for_2xx() {
        let statuses = [
            http::StatusCode::OK,
            http::StatusCode::CREATED,
            http::StatusCode::ACCEPTED,
            http::StatusCode::NO_CONTENT,
        ];

        for status in statuses {
            let resp = HttpResponse::new(status, http::HeaderMap::new(), vec![]);
            assert!(resp.is_success(), "Expected {status} to be success");
        }
    }

    #[test]
    fn is_success_returns_false_for_non_2xx() {
        let statuses = [
            http::StatusCode::BAD_REQUEST,
            http::StatusCode::UNAUTHORIZED,
            http::StatusCode::NOT_FOUND,
            http::StatusCode::INTERNAL_SERVER_ERROR,
        ];

        for status in statuses {
            let resp = HttpResponse::new(status, http::HeaderMap::new(), vec![]);
            assert!(!resp.is_success(), "Expected {status} to not be success");
        }
    }

    #[test]
    fn body_text_returns_valid_utf8() {
        let resp = HttpResponse::new(
            http::StatusCode::OK,
            http::HeaderMap::new(),
            b"Hello, World!".to_vec(),
        );

        assert_eq!(resp.body_text(), Some("Hello, World!"));
    }

    #[test]
    fn body_text_returns_none_for_invalid_utf8() {
        let resp = HttpResponse::new(
            http::StatusCode::OK,
            http::HeaderMap::new(),
            vec![0xFF, 0xFE],
        );

        assert!(resp.body_text().is_none());
    }

    #[test]
    fn body_text_returns_empty_string_for_empty_body() {
        let resp = HttpResponse::new(http::StatusCode::OK, http::HeaderMap::new(), vec![]);

        assert_eq!(resp.body_text(), Some(""));
    }
}

mod transport_error {
    use super::*;
    use std::error::Error;

    #[test]
    fn connection_error_displays_message_and_preserves_source() {
        let source = std::io::Error::other("connection refused");
        let error = TransportError::Connection(Box::new(source));

        assert!(error.to_string().contains("Connection error"));
        assert!(
            error
                .source()
                .unwrap()
                .to_string()
                .contains("connection refused")
        );
    }

    #[test]
    fn timeout_displays_message_without_source() {
        let error = TransportError::Timeout;

        assert_eq!(error.to_string(), "Request timed out");
        assert!(error.source().is_none());
    }

    #[test]
    fn invalid_url_displays_detail() {
        let error = TransportError::InvalidUrl("missing scheme".to_string());

        assert!(error.to_string().contains("Invalid URL"));
        assert!(error.to_string().contains("missing scheme"));
    }

    #[test]
    fn connection_and_timeout_are_retryable() {
        let connection = TransportError::Connection(Box::new(std::io::Error::other("refused")));

        assert!(connection.is_retryable());
        assert!(TransportError::Timeout.is_retryable());
    }

    #[test]
    fn invalid_url_is_not_retryable() {
        let error = TransportError::InvalidUrl("bad".to_string());

        assert!(!error.is_retryable());
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TransportError>();
    }
}

mod transport_traits {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Minimal async transport returning one fixed response.
    struct FixedTransport {
        response: HttpResponse,
        call_count: AtomicUsize,
    }

    impl FixedTransport {
        fn new(response: HttpResponse) -> Self {
            Self {
                response,
                call_count: AtomicUsize::new(0),
            }
        }
    }

    impl HttpClient for FixedTransport {
        async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            Ok(self.response.clone())
        }
    }

    impl BlockingHttpClient for FixedTransport {
        fn request(&self, _req: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            Ok(self.response.clone())
        }
    }

    struct FixedConnector;

    impl Connector for FixedConnector {
        type Transport = FixedTransport;

        fn connect(&self) -> Result<Self::Transport, TransportError> {
            Ok(FixedTransport::new(HttpResponse::new(
                http::StatusCode::OK,
                http::HeaderMap::new(),
                vec![],
            )))
        }
    }

    #[tokio::test]
    async fn async_transport_returns_configured_response() {
        let transport = FixedTransport::new(HttpResponse::new(
            http::StatusCode::CREATED,
            http::HeaderMap::new(),
            b"created".to_vec(),
        ));

        let result = HttpClient::request(&transport, HttpRequest::get(test_url()))
            .await
            .unwrap();

        assert_eq!(result.status, http::StatusCode::CREATED);
        assert_eq!(result.body, b"created".to_vec());
    }

    #[test]
    fn blocking_transport_returns_configured_response() {
        let transport = FixedTransport::new(HttpResponse::new(
            http::StatusCode::OK,
            http::HeaderMap::new(),
            b"ok".to_vec(),
        ));

        let result = BlockingHttpClient::request(&transport, HttpRequest::get(test_url())).unwrap();

        assert_eq!(result.status, http::StatusCode::OK);
    }

    #[tokio::test]
    async fn transport_tracks_calls_across_both_traits() {
        let transport = FixedTransport::new(HttpResponse::new(
            http::StatusCode::OK,
            http::HeaderMap::new(),
            vec![],
        ));

        HttpClient::request(&transport, HttpRequest::get(test_url()))
            .await
            .unwrap();
        BlockingHttpClient::request(&transport, HttpRequest::get(test_url())).unwrap();

        assert_eq!(transport.call_count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn connector_builds_transport() {
        let transport = FixedConnector.connect().unwrap();

        assert_eq!(transport.call_count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn traits_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FixedTransport>();
        assert_send_sync::<FixedConnector>();
    }
}
