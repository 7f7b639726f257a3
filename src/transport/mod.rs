//! Pluggable HTTP transport layer.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting non-blocking dispatch ([`HttpClient`])
//! - Abstracting blocking dispatch ([`BlockingHttpClient`])
//! - Creating session-scoped transports ([`Connector`])
//! - Production reqwest implementations ([`ReqwestClient`],
//!   [`BlockingReqwestClient`], [`ReqwestConnector`])

mod client;
mod error;
mod http;

#[cfg(test)]
mod http_tests;

pub use client::{BlockingReqwestClient, DEFAULT_TIMEOUT, ReqwestClient, ReqwestConnector};
pub use error::TransportError;
pub use http::{BlockingHttpClient, Connector, HttpClient, HttpRequest, HttpResponse};
