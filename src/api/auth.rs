//! Account and API-key operations.

use serde::Serialize;

use crate::Client;
use crate::blocking;
use crate::envelope::Envelope;
use crate::error::Error;
use crate::request::ApiRequest;
use crate::time::{BlockingSleeper, Sleeper};
use crate::transport::{BlockingHttpClient, Connector};

#[derive(Serialize)]
struct AccountPayload<'a> {
    username: &'a str,
    password: &'a str,
}

fn register_request(username: &str, password: &str) -> Result<ApiRequest, Error> {
    ApiRequest::post("user/reg").json(&AccountPayload { username, password })
}

fn login_request(username: &str, password: &str) -> Result<ApiRequest, Error> {
    ApiRequest::post("user/login").json(&AccountPayload { username, password })
}

fn remove_api_key_request(key: &str) -> ApiRequest {
    ApiRequest::get(format!("user/remove_api_key/{key}"))
}

fn set_api_key_active_request(key: &str, active: bool) -> ApiRequest {
    ApiRequest::get(format!("user/active_api_key/{key}/{active}"))
}

/// Account operations on the async client.
///
/// Obtained from [`Client::auth`]; borrows the client and holds no state
/// of its own.
pub struct Auth<'a, C: Connector, S> {
    client: &'a Client<C, S>,
}

impl<'a, C: Connector, S> Auth<'a, C, S> {
    pub(crate) const fn new(client: &'a Client<C, S>) -> Self {
        Self { client }
    }
}

impl<C: Connector, S: Sleeper> Auth<'_, C, S> {
    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn register(&self, username: &str, password: &str) -> Result<Envelope, Error> {
        self.client.execute(register_request(username, password)?).await
    }

    /// Logs in to an account.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn login(&self, username: &str, password: &str) -> Result<Envelope, Error> {
        self.client.execute(login_request(username, password)?).await
    }

    /// Logs out of the current account.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn logout(&self) -> Result<Envelope, Error> {
        self.client.get("user/logout").await
    }

    /// Fetches information about the current user.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn user_info(&self) -> Result<Envelope, Error> {
        self.client.get("user/info").await
    }

    /// Generates a new API key.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn generate_api_key(&self) -> Result<Envelope, Error> {
        self.client.get("user/generate_api_key").await
    }

    /// Lists the account's API keys.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn list_api_keys(&self) -> Result<Envelope, Error> {
        self.client.get("user/list_api_key").await
    }

    /// Deletes an API key.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn remove_api_key(&self, key: &str) -> Result<Envelope, Error> {
        self.client.execute(remove_api_key_request(key)).await
    }

    /// Activates or deactivates an API key.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn set_api_key_active(&self, key: &str, active: bool) -> Result<Envelope, Error> {
        self.client.execute(set_api_key_active_request(key, active)).await
    }
}

/// Account operations on the blocking client.
pub struct BlockingAuth<'a, T, S> {
    client: &'a blocking::Client<T, S>,
}

impl<'a, T, S> BlockingAuth<'a, T, S> {
    pub(crate) const fn new(client: &'a blocking::Client<T, S>) -> Self {
        Self { client }
    }
}

impl<T: BlockingHttpClient, S: BlockingSleeper> BlockingAuth<'_, T, S> {
    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// See [`blocking::Client::execute`].
    pub fn register(&self, username: &str, password: &str) -> Result<Envelope, Error> {
        self.client.execute(register_request(username, password)?)
    }

    /// Logs in to an account.
    ///
    /// # Errors
    ///
    /// See [`blocking::Client::execute`].
    pub fn login(&self, username: &str, password: &str) -> Result<Envelope, Error> {
        self.client.execute(login_request(username, password)?)
    }

    /// Logs out of the current account.
    ///
    /// # Errors
    ///
    /// See [`blocking::Client::execute`].
    pub fn logout(&self) -> Result<Envelope, Error> {
        self.client.get("user/logout")
    }

    /// Fetches information about the current user.
    ///
    /// # Errors
    ///
    /// See [`blocking::Client::execute`].
    pub fn user_info(&self) -> Result<Envelope, Error> {
        self.client.get("user/info")
    }

    /// Generates a new API key.
    ///
    /// # Errors
    ///
    /// See [`blocking::Client::execute`].
    pub fn generate_api_key(&self) -> Result<Envelope, Error> {
        self.client.get("user/generate_api_key")
    }

    /// Lists the account's API keys.
    ///
    /// # Errors
    ///
    /// See [`blocking::Client::execute`].
    pub fn list_api_keys(&self) -> Result<Envelope, Error> {
        self.client.get("user/list_api_key")
    }

    /// Deletes an API key.
    ///
    /// # Errors
    ///
    /// See [`blocking::Client::execute`].
    pub fn remove_api_key(&self, key: &str) -> Result<Envelope, Error> {
        self.client.execute(remove_api_key_request(key))
    }

    /// Activates or deactivates an API key.
    ///
    /// # Errors
    ///
    /// See [`blocking::Client::execute`].
    pub fn set_api_key_active(&self, key: &str, active: bool) -> Result<Envelope, Error> {
        self.client.execute(set_api_key_active_request(key, active))
    }
}
