//! Typed resource wrappers over the client executors.
//!
//! This module provides per-resource views for:
//! - Account and API-key management ([`Auth`])
//! - Compute instances ([`Instances`], [`CreateInstance`])
//! - Devices, areas, and bare-metal servers ([`Devices`], [`Areas`], [`Baremetal`])
//! - Serverless endpoints ([`ServerlessEndpoint`])
//! - Submitted jobs ([`Job`])
//!
//! Each wrapper borrows one client, assembles paths and payloads for its
//! routes, and delegates execution unchanged; retry and error mapping
//! live in the client alone. The `Blocking`-prefixed twins do the same
//! over [`crate::blocking::Client`].

mod auth;
mod device;
mod instance;
mod job;
mod serverless;

#[cfg(test)]
mod auth_tests;
#[cfg(test)]
mod device_tests;

pub use auth::{Auth, BlockingAuth};
pub use device::{
    Areas, Baremetal, BlockingAreas, BlockingBaremetal, BlockingDevices, DEFAULT_PROJECT,
    DeviceAction, Devices,
};
pub use instance::{
    BillingMethod, BlockingInstances, CreateInstance, InstanceAction, InstanceMode, Instances,
};
pub use job::{BlockingJob, Job, POLL_INTERVAL};
pub use serverless::{BlockingServerlessEndpoint, ServerlessEndpoint};
