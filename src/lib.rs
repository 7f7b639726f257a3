//! SubModel SDK: clients for the SubModel cloud GPU platform.
//!
//! Provides an async [`Client`] and a [`blocking::Client`] sharing one
//! request pipeline: credential headers, exponential-backoff retry of
//! transport failures, and decoding of the service's `{code, message,
//! data}` response envelope into typed errors. Typed views over the
//! platform resources (instances, devices, areas, serverless endpoints,
//! jobs) live in [`api`].
//!
//! # Example
//!
//! ```no_run
//! use submodel::{Client, Credentials};
//!
//! # async fn example() -> submodel::Result<()> {
//! let client = Client::new(Credentials::from_env()?);
//! let session = client.session()?;
//! let instances = session.instances().list(1, 10, Default::default()).await?;
//! println!("{}", instances.data);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod blocking;
mod client;
mod credentials;
mod envelope;
mod error;
mod request;
mod retry;
pub mod time;
pub mod transport;

#[cfg(test)]
mod testkit;

pub use client::{Client, SessionGuard};
pub use credentials::Credentials;
pub use envelope::Envelope;
pub use error::{Error, Result};
pub use request::{ApiRequest, Query};
pub use retry::RetryConfig;

/// Base address every relative endpoint path resolves against.
pub const DEFAULT_BASE_URL: &str = "https://api.submodel.ai/api/v1";
