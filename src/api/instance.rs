//! Compute instance operations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Client;
use crate::blocking;
use crate::envelope::Envelope;
use crate::error::Error;
use crate::request::{ApiRequest, Query};
use crate::time::{BlockingSleeper, Sleeper};
use crate::transport::{BlockingHttpClient, Connector};

/// How an instance is billed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingMethod {
    /// Pay as you go.
    #[default]
    Payg,
    /// Monthly subscription.
    Monthly,
}

impl BillingMethod {
    /// The wire spelling of this billing method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Payg => "payg",
            Self::Monthly => "monthly",
        }
    }
}

impl fmt::Display for BillingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The deployment mode of an instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceMode {
    /// Containerized pod.
    #[default]
    Pod,
    /// Dedicated bare-metal server.
    Baremetal,
    /// Autoscaled serverless deployment.
    Serverless,
}

impl InstanceMode {
    /// The wire spelling of this mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pod => "pod",
            Self::Baremetal => "baremetal",
            Self::Serverless => "serverless",
        }
    }
}

impl fmt::Display for InstanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A control action applicable to an instance.
///
/// The wire spellings are fixed by the service; note that
/// [`InstanceAction::SetLabel`] is spelled `setlabel` on this resource,
/// unlike its device counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstanceAction {
    /// Start the instance.
    Run,
    /// Stop the instance.
    Stop,
    /// Release the instance and its resources.
    Release,
    /// Restart the instance.
    Restart,
    /// Execute a remote command.
    RemoteCmd,
    /// Set the instance label.
    SetLabel,
    /// Reconfigure exposed ports.
    SetPorts,
    /// Change the OS image.
    ChangeImage,
    /// Update extended settings.
    SetExSetting,
    /// Set environment variables.
    SetEnvs,
}

impl InstanceAction {
    /// Every valid action, in wire order.
    pub const ALL: [Self; 10] = [
        Self::Run,
        Self::Stop,
        Self::Release,
        Self::Restart,
        Self::RemoteCmd,
        Self::SetLabel,
        Self::SetPorts,
        Self::ChangeImage,
        Self::SetExSetting,
        Self::SetEnvs,
    ];

    /// The wire spelling of this action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Run => "run",
            Self::Stop => "stop",
            Self::Release => "release",
            Self::Restart => "restart",
            Self::RemoteCmd => "remote_cmd",
            Self::SetLabel => "setlabel",
            Self::SetPorts => "set_ports",
            Self::ChangeImage => "change_image",
            Self::SetExSetting => "set_ex_setting",
            Self::SetEnvs => "set_envs",
        }
    }
}

impl fmt::Display for InstanceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstanceAction {
    type Err = Error;

    /// Parses a wire spelling, listing the allowed values on mismatch.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|action| action.as_str() == s)
            .copied()
            .ok_or_else(|| {
                Error::Validation(format!(
                    "invalid instance action {s:?}, expected one of: {}",
                    Self::ALL.map(Self::as_str).join(", ")
                ))
            })
    }
}

/// Parameters for creating an instance.
///
/// [`CreateInstance::new`] fills in the service defaults; override
/// individual fields with the `with_*` builders or directly. Fields not
/// modeled here go in `extra` and are flattened into the request body.
///
/// # Example
///
/// ```
/// use submodel::api::CreateInstance;
///
/// let spec = CreateInstance::new()
///     .with_plan("gpu-rtx4090-24g-2")
///     .with_pod_num(2)
///     .with_area(["as-01"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateInstance {
    /// Billing method.
    pub billing_method: BillingMethod,
    /// Deployment mode.
    pub mode: InstanceMode,
    /// Plan identifier (GPU model and count).
    pub plan: String,
    /// OS image.
    pub image: String,
    /// Number of pods.
    pub pod_num: u32,
    /// Candidate area identifiers; empty lets the service choose.
    pub area: Vec<String>,
    /// Additional configuration parameters.
    pub conf: Map<String, Value>,
    /// Container disk size in GB.
    pub container_size: u32,
    /// Persistent volume size in GB.
    pub volume_size: u32,
    /// Mount path of the persistent volume.
    pub volume_mount_path: String,
    /// Fields without a dedicated member, flattened into the body.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CreateInstance {
    /// Creates a spec with the service defaults: a pay-as-you-go pod on
    /// `gpu-rtx4090-24g-1` running `ubuntu-22.04`, one pod, 5 GB
    /// container disk, a 5 GB volume mounted at `/workspace`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            billing_method: BillingMethod::Payg,
            mode: InstanceMode::Pod,
            plan: "gpu-rtx4090-24g-1".to_string(),
            image: "ubuntu-22.04".to_string(),
            pod_num: 1,
            area: Vec::new(),
            conf: Map::new(),
            container_size: 5,
            volume_size: 5,
            volume_mount_path: "/workspace".to_string(),
            extra: Map::new(),
        }
    }

    /// Sets the billing method.
    #[must_use]
    pub const fn with_billing_method(mut self, billing_method: BillingMethod) -> Self {
        self.billing_method = billing_method;
        self
    }

    /// Sets the deployment mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: InstanceMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the plan identifier.
    #[must_use]
    pub fn with_plan(mut self, plan: impl Into<String>) -> Self {
        self.plan = plan.into();
        self
    }

    /// Sets the OS image.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Sets the number of pods.
    #[must_use]
    pub const fn with_pod_num(mut self, pod_num: u32) -> Self {
        self.pod_num = pod_num;
        self
    }

    /// Sets the candidate areas.
    #[must_use]
    pub fn with_area<I, A>(mut self, area: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.area = area.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the additional configuration parameters.
    #[must_use]
    pub fn with_conf(mut self, conf: Map<String, Value>) -> Self {
        self.conf = conf;
        self
    }

    /// Sets the container disk size in GB.
    #[must_use]
    pub const fn with_container_size(mut self, container_size: u32) -> Self {
        self.container_size = container_size;
        self
    }

    /// Sets the persistent volume size in GB.
    #[must_use]
    pub const fn with_volume_size(mut self, volume_size: u32) -> Self {
        self.volume_size = volume_size;
        self
    }

    /// Sets the volume mount path.
    #[must_use]
    pub fn with_volume_mount_path(mut self, path: impl Into<String>) -> Self {
        self.volume_mount_path = path.into();
        self
    }

    /// Adds a field without a dedicated member to the request body.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

impl Default for CreateInstance {
    fn default() -> Self {
        Self::new()
    }
}

fn create_request(spec: &CreateInstance) -> Result<ApiRequest, Error> {
    ApiRequest::post("inst/create").json(spec)
}

fn list_request(page: u32, limit: u32, mode: InstanceMode) -> ApiRequest {
    ApiRequest::get("inst/list").with_query(
        Query::new()
            .pair("page", page)
            .pair("limit", limit)
            .pair("mode", mode),
    )
}

fn control_request(
    action: InstanceAction,
    inst_id: &str,
    params: &Map<String, Value>,
) -> Result<ApiRequest, Error> {
    ApiRequest::post(format!("inst/action/{action}/{inst_id}")).json(params)
}

/// Instance operations on the async client.
///
/// Obtained from [`Client::instances`]; borrows the client and holds no
/// state of its own.
pub struct Instances<'a, C: Connector, S> {
    client: &'a Client<C, S>,
}

impl<'a, C: Connector, S> Instances<'a, C, S> {
    pub(crate) const fn new(client: &'a Client<C, S>) -> Self {
        Self { client }
    }
}

impl<C: Connector, S: Sleeper> Instances<'_, C, S> {
    /// Creates an instance.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn create(&self, spec: &CreateInstance) -> Result<Envelope, Error> {
        self.client.execute(create_request(spec)?).await
    }

    /// Lists instances of the given mode, paginated.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn list(&self, page: u32, limit: u32, mode: InstanceMode) -> Result<Envelope, Error> {
        self.client.execute(list_request(page, limit, mode)).await
    }

    /// Fetches details for one instance.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn detail(&self, inst_id: &str) -> Result<Envelope, Error> {
        self.client.get(&format!("inst/detail/{inst_id}")).await
    }

    /// Deletes an instance.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn delete(&self, inst_id: &str) -> Result<Envelope, Error> {
        self.client.post_empty(&format!("inst/delete/{inst_id}")).await
    }

    /// Applies a control action to an instance.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn control(&self, action: InstanceAction, inst_id: &str) -> Result<Envelope, Error> {
        self.control_with(action, inst_id, &Map::new()).await
    }

    /// Applies a control action with action-specific parameters.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn control_with(
        &self,
        action: InstanceAction,
        inst_id: &str,
        params: &Map<String, Value>,
    ) -> Result<Envelope, Error> {
        self.client
            .execute(control_request(action, inst_id, params)?)
            .await
    }

    /// Lists the pods of an instance.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn pods(&self, inst_id: &str) -> Result<Envelope, Error> {
        self.client.get(&format!("inst/cont/{inst_id}")).await
    }

    /// Fetches the logs of one pod.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn pod_logs(&self, inst_id: &str, pod_id: &str) -> Result<Envelope, Error> {
        self.client
            .get(&format!("inst/{inst_id}/pod/{pod_id}/logs"))
            .await
    }

    /// Terminates one pod.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn terminate_pod(&self, inst_id: &str, pod_id: &str) -> Result<Envelope, Error> {
        self.client
            .get(&format!("inst/{inst_id}/pod/{pod_id}/terminate"))
            .await
    }
}

/// Instance operations on the blocking client.
pub struct BlockingInstances<'a, T, S> {
    client: &'a blocking::Client<T, S>,
}

impl<'a, T, S> BlockingInstances<'a, T, S> {
    pub(crate) const fn new(client: &'a blocking::Client<T, S>) -> Self {
        Self { client }
    }
}

impl<T: BlockingHttpClient, S: BlockingSleeper> BlockingInstances<'_, T, S> {
    /// Creates an instance.
    ///
    /// # Errors
    ///
    /// See [`blocking::Client::execute`].
    pub fn create(&self, spec: &CreateInstance) -> Result<Envelope, Error> {
        self.client.execute(create_request(spec)?)
    }

    /// Lists instances of the given mode, paginated.
    ///
    /// # Errors
    ///
    /// See [`blocking::Client::execute`].
    pub fn list(&self, page: u32, limit: u32, mode: InstanceMode) -> Result<Envelope, Error> {
        self.client.execute(list_request(page, limit, mode))
    }

    /// Fetches details for one instance.
    ///
    /// # Errors
    ///
    /// See [`blocking::Client::execute`].
    pub fn detail(&self, inst_id: &str) -> Result<Envelope, Error> {
        self.client.get(&format!("inst/detail/{inst_id}"))
    }

    /// Deletes an instance.
    ///
    /// # Errors
    ///
    /// See [`blocking::Client::execute`].
    pub fn delete(&self, inst_id: &str) -> Result<Envelope, Error> {
        self.client.post_empty(&format!("inst/delete/{inst_id}"))
    }

    /// Applies a control action to an instance.
    ///
    /// # Errors
    ///
    /// See [`blocking::Client::execute`].
    pub fn control(&self, action: InstanceAction, inst_id: &str) -> Result<Envelope, Error> {
        self.control_with(action, inst_id, &Map::new())
    }

    /// Applies a control action with action-specific parameters.
    ///
    /// # Errors
    ///
    /// See [`blocking::Client::execute`].
    pub fn control_with(
        &self,
        action: InstanceAction,
        inst_id: &str,
        params: &Map<String, Value>,
    ) -> Result<Envelope, Error> {
        self.client.execute(control_request(action, inst_id, params)?)
    }

    /// Lists the pods of an instance.
    ///
    /// # Errors
    ///
    /// See [`blocking::Client::execute`].
    pub fn pods(&self, inst_id: &str) -> Result<Envelope, Error> {
        self.client.get(&format!("inst/cont/{inst_id}"))
    }

    /// Fetches the logs of one pod.
    ///
    /// # Errors
    ///
    /// See [`blocking::Client::execute`].
    pub fn pod_logs(&self, inst_id: &str, pod_id: &str) -> Result<Envelope, Error> {
        self.client.get(&format!("inst/{inst_id}/pod/{pod_id}/logs"))
    }

    /// Terminates one pod.
    ///
    /// # Errors
    ///
    /// See [`blocking::Client::execute`].
    pub fn terminate_pod(&self, inst_id: &str, pod_id: &str) -> Result<Envelope, Error> {
        self.client
            .get(&format!("inst/{inst_id}/pod/{pod_id}/terminate"))
    }
}
