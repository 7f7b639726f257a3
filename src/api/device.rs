//! Device, area, and bare-metal operations.

use std::fmt;
use std::str::FromStr;

use crate::Client;
use crate::blocking;
use crate::envelope::Envelope;
use crate::error::Error;
use crate::request::{ApiRequest, Query};
use crate::time::{BlockingSleeper, Sleeper};
use crate::transport::{BlockingHttpClient, Connector};

/// The project scope device control actions apply to by default.
pub const DEFAULT_PROJECT: &str = "global";

/// A control action applicable to a device.
///
/// The wire spellings are fixed by the service; note that
/// [`DeviceAction::SetLabel`] is spelled `set_label` here, unlike its
/// instance counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceAction {
    /// Start the device.
    Run,
    /// Stop the device.
    Stop,
    /// Release the device.
    Release,
    /// Execute a remote command.
    RemoteCmd,
    /// Set the device label.
    SetLabel,
    /// Reset the device token.
    ResetToken,
    /// Update the device configuration.
    SetConf,
    /// Set the device status.
    SetStatus,
}

impl DeviceAction {
    /// Every valid action, in wire order.
    pub const ALL: [Self; 8] = [
        Self::Run,
        Self::Stop,
        Self::Release,
        Self::RemoteCmd,
        Self::SetLabel,
        Self::ResetToken,
        Self::SetConf,
        Self::SetStatus,
    ];

    /// The wire spelling of this action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Run => "run",
            Self::Stop => "stop",
            Self::Release => "release",
            Self::RemoteCmd => "remote_cmd",
            Self::SetLabel => "set_label",
            Self::ResetToken => "reset_token",
            Self::SetConf => "set_conf",
            Self::SetStatus => "set_status",
        }
    }
}

impl fmt::Display for DeviceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceAction {
    type Err = Error;

    /// Parses a wire spelling, listing the allowed values on mismatch.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|action| action.as_str() == s)
            .copied()
            .ok_or_else(|| {
                Error::Validation(format!(
                    "invalid device action {s:?}, expected one of: {}",
                    Self::ALL.map(Self::as_str).join(", ")
                ))
            })
    }
}

fn list_devices_request(page: u32, limit: u32, search: Option<&str>) -> ApiRequest {
    ApiRequest::get("device/list").with_query(
        Query::new()
            .pair("page", page)
            .pair("limit", limit)
            .maybe_pair("search", search),
    )
}

fn control_device_request(
    action: DeviceAction,
    device_id: &str,
    project: &str,
    params: Query,
) -> ApiRequest {
    ApiRequest::get(format!("device/action/{action}/{device_id}/{project}")).with_query(params)
}

fn list_areas_request(page: u32, limit: u32) -> ApiRequest {
    ApiRequest::get("area/list").with_query(Query::new().pair("page", page).pair("limit", limit))
}

fn list_baremetals_request(page: u32, limit: u32) -> ApiRequest {
    ApiRequest::get("baremetal/list").with_query(
        Query::new()
            .pair("page", page)
            .pair("limit", limit)
            .pair("mode", "baremetal"),
    )
}

/// Device operations on the async client.
///
/// Obtained from [`Client::devices`]; borrows the client and holds no
/// state of its own.
pub struct Devices<'a, C: Connector, S> {
    client: &'a Client<C, S>,
}

impl<'a, C: Connector, S> Devices<'a, C, S> {
    pub(crate) const fn new(client: &'a Client<C, S>) -> Self {
        Self { client }
    }
}

impl<C: Connector, S: Sleeper> Devices<'_, C, S> {
    /// Lists devices, paginated, optionally filtered by a search term.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn list(
        &self,
        page: u32,
        limit: u32,
        search: Option<&str>,
    ) -> Result<Envelope, Error> {
        self.client
            .execute(list_devices_request(page, limit, search))
            .await
    }

    /// Fetches details for one device.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn detail(&self, device_id: &str) -> Result<Envelope, Error> {
        self.client.get(&format!("device/detail/{device_id}")).await
    }

    /// Applies a control action to a device in the default project scope.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn control(&self, action: DeviceAction, device_id: &str) -> Result<Envelope, Error> {
        self.control_with(action, device_id, DEFAULT_PROJECT, Query::new())
            .await
    }

    /// Applies a control action in an explicit project scope, with
    /// action-specific query parameters.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn control_with(
        &self,
        action: DeviceAction,
        device_id: &str,
        project: &str,
        params: Query,
    ) -> Result<Envelope, Error> {
        self.client
            .execute(control_device_request(action, device_id, project, params))
            .await
    }
}

/// Device operations on the blocking client.
pub struct BlockingDevices<'a, T, S> {
    client: &'a blocking::Client<T, S>,
}

impl<'a, T, S> BlockingDevices<'a, T, S> {
    pub(crate) const fn new(client: &'a blocking::Client<T, S>) -> Self {
        Self { client }
    }
}

impl<T: BlockingHttpClient, S: BlockingSleeper> BlockingDevices<'_, T, S> {
    /// Lists devices, paginated, optionally filtered by a search term.
    ///
    /// # Errors
    ///
    /// See [`blocking::Client::execute`].
    pub fn list(&self, page: u32, limit: u32, search: Option<&str>) -> Result<Envelope, Error> {
        self.client.execute(list_devices_request(page, limit, search))
    }

    /// Fetches details for one device.
    ///
    /// # Errors
    ///
    /// See [`blocking::Client::execute`].
    pub fn detail(&self, device_id: &str) -> Result<Envelope, Error> {
        self.client.get(&format!("device/detail/{device_id}"))
    }

    /// Applies a control action to a device in the default project scope.
    ///
    /// # Errors
    ///
    /// See [`blocking::Client::execute`].
    pub fn control(&self, action: DeviceAction, device_id: &str) -> Result<Envelope, Error> {
        self.control_with(action, device_id, DEFAULT_PROJECT, Query::new())
    }

    /// Applies a control action in an explicit project scope, with
    /// action-specific query parameters.
    ///
    /// # Errors
    ///
    /// See [`blocking::Client::execute`].
    pub fn control_with(
        &self,
        action: DeviceAction,
        device_id: &str,
        project: &str,
        params: Query,
    ) -> Result<Envelope, Error> {
        self.client
            .execute(control_device_request(action, device_id, project, params))
    }
}

/// Area operations on the async client.
///
/// Obtained from [`Client::areas`]; borrows the client and holds no
/// state of its own.
pub struct Areas<'a, C: Connector, S> {
    client: &'a Client<C, S>,
}

impl<'a, C: Connector, S> Areas<'a, C, S> {
    pub(crate) const fn new(client: &'a Client<C, S>) -> Self {
        Self { client }
    }
}

impl<C: Connector, S: Sleeper> Areas<'_, C, S> {
    /// Lists available areas, paginated.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn list(&self, page: u32, limit: u32) -> Result<Envelope, Error> {
        self.client.execute(list_areas_request(page, limit)).await
    }

    /// Fetches details for one area.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn detail(&self, area_id: &str) -> Result<Envelope, Error> {
        self.client.get(&format!("area/detail/{area_id}")).await
    }
}

/// Area operations on the blocking client.
pub struct BlockingAreas<'a, T, S> {
    client: &'a blocking::Client<T, S>,
}

impl<'a, T, S> BlockingAreas<'a, T, S> {
    pub(crate) const fn new(client: &'a blocking::Client<T, S>) -> Self {
        Self { client }
    }
}

impl<T: BlockingHttpClient, S: BlockingSleeper> BlockingAreas<'_, T, S> {
    /// Lists available areas, paginated.
    ///
    /// # Errors
    ///
    /// See [`blocking::Client::execute`].
    pub fn list(&self, page: u32, limit: u32) -> Result<Envelope, Error> {
        self.client.execute(list_areas_request(page, limit))
    }

    /// Fetches details for one area.
    ///
    /// # Errors
    ///
    /// See [`blocking::Client::execute`].
    pub fn detail(&self, area_id: &str) -> Result<Envelope, Error> {
        self.client.get(&format!("area/detail/{area_id}"))
    }
}

/// Bare-metal operations on the async client.
///
/// Obtained from [`Client::baremetal`]; borrows the client and holds no
/// state of its own.
pub struct Baremetal<'a, C: Connector, S> {
    client: &'a Client<C, S>,
}

impl<'a, C: Connector, S> Baremetal<'a, C, S> {
    pub(crate) const fn new(client: &'a Client<C, S>) -> Self {
        Self { client }
    }
}

impl<C: Connector, S: Sleeper> Baremetal<'_, C, S> {
    /// Lists bare-metal servers, paginated.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn list(&self, page: u32, limit: u32) -> Result<Envelope, Error> {
        self.client.execute(list_baremetals_request(page, limit)).await
    }
}

/// Bare-metal operations on the blocking client.
pub struct BlockingBaremetal<'a, T, S> {
    client: &'a blocking::Client<T, S>,
}

impl<'a, T, S> BlockingBaremetal<'a, T, S> {
    pub(crate) const fn new(client: &'a blocking::Client<T, S>) -> Self {
        Self { client }
    }
}

impl<T: BlockingHttpClient, S: BlockingSleeper> BlockingBaremetal<'_, T, S> {
    /// Lists bare-metal servers, paginated.
    ///
    /// # Errors
    ///
    /// See [`blocking::Client::execute`].
    pub fn list(&self, page: u32, limit: u32) -> Result<Envelope, Error> {
        self.client.execute(list_baremetals_request(page, limit))
    }
}
