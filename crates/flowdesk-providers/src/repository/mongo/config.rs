//! MongoDB connection settings

use crate::constants::{
    ENV_DB_PASSWORD, ENV_DB_URI, ENV_DB_USERNAME, MONGODB_APP_NAME, MONGODB_DEFAULT_AUTH_SOURCE,
    MONGODB_SERVER_SELECTION_TIMEOUT_MS,
};
use flowdesk_domain::error::{Error, Result};
use mongodb::options::{ClientOptions, Credential, ServerAddress};
use std::time::Duration;

/// Connection settings of a [`MongoRepository`](super::MongoRepository)
///
/// `hosts` accepts the `host[:port][,host[:port]...]` form of `DB_URI`; a
/// leading `mongodb://` and anything after the host list are ignored.
#[derive(Clone)]
pub struct MongoSettings {
    hosts: String,
    username: String,
    password: String,
    auth_source: String,
    app_name: String,
    server_selection_timeout: Duration,
    operation_timeout: Option<Duration>,
}

impl MongoSettings {
    /// Settings with the three required credentials
    ///
    /// # Errors
    /// `Configuration` naming the first empty value.
    pub fn new<H, U, P>(hosts: H, username: U, password: P) -> Result<Self>
    where
        H: Into<String>,
        U: Into<String>,
        P: Into<String>,
    {
        let settings = Self {
            hosts: hosts.into(),
            username: username.into(),
            password: password.into(),
            auth_source: MONGODB_DEFAULT_AUTH_SOURCE.to_string(),
            app_name: MONGODB_APP_NAME.to_string(),
            server_selection_timeout: Duration::from_millis(MONGODB_SERVER_SELECTION_TIMEOUT_MS),
            operation_timeout: None,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Settings from `DB_URI`, `DB_USERNAME` and `DB_PASSWORD`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Settings from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| {
                    Error::configuration(format!(
                        "{name} is not set; MongoDB credentials are required"
                    ))
                })
        };
        Self::new(
            require(ENV_DB_URI)?,
            require(ENV_DB_USERNAME)?,
            require(ENV_DB_PASSWORD)?,
        )
    }

    /// Authentication database (default `admin`)
    #[must_use]
    pub fn with_auth_source<S: Into<String>>(mut self, auth_source: S) -> Self {
        self.auth_source = auth_source.into();
        self
    }

    /// Application name reported to the server
    #[must_use]
    pub fn with_app_name<S: Into<String>>(mut self, app_name: S) -> Self {
        self.app_name = app_name.into();
        self
    }

    /// How long the driver waits for a usable server
    #[must_use]
    pub fn with_server_selection_timeout(mut self, timeout: Duration) -> Self {
        self.server_selection_timeout = timeout;
        self
    }

    /// Deadline applied to every repository call; `None` disables it
    #[must_use]
    pub fn with_operation_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.operation_timeout = timeout;
        self
    }

    /// Host list as configured
    pub fn hosts(&self) -> &str {
        &self.hosts
    }

    /// Username used for authentication
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Authentication database
    pub fn auth_source(&self) -> &str {
        &self.auth_source
    }

    /// Per-call deadline, if any
    pub fn operation_timeout(&self) -> Option<Duration> {
        self.operation_timeout
    }

    /// Parse the host list into driver addresses
    pub fn server_addresses(&self) -> Result<Vec<ServerAddress>> {
        let hosts = self.hosts.trim();
        let hosts = hosts.strip_prefix("mongodb://").unwrap_or(hosts);
        let hosts = hosts.rsplit_once('@').map_or(hosts, |(_, rest)| rest);
        let hosts = hosts.split(['/', '?']).next().unwrap_or_default();

        let addresses = hosts
            .split(',')
            .map(str::trim)
            .filter(|host| !host.is_empty())
            .map(|host| {
                ServerAddress::parse(host).map_err(|e| {
                    Error::configuration_with_source(format!("invalid MongoDB host '{host}'"), e)
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if addresses.is_empty() {
            return Err(Error::configuration(format!(
                "{ENV_DB_URI} does not name any host"
            )));
        }
        Ok(addresses)
    }

    /// Driver options; building them performs no I/O
    pub fn client_options(&self) -> Result<ClientOptions> {
        let mut credential = Credential::default();
        credential.username = Some(self.username.clone());
        credential.password = Some(self.password.clone());
        credential.source = Some(self.auth_source.clone());

        let mut options = ClientOptions::default();
        options.hosts = self.server_addresses()?;
        options.app_name = Some(self.app_name.clone());
        options.server_selection_timeout = Some(self.server_selection_timeout);
        options.credential = Some(credential);
        Ok(options)
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [
            (ENV_DB_URI, &self.hosts),
            (ENV_DB_USERNAME, &self.username),
            (ENV_DB_PASSWORD, &self.password),
        ] {
            if value.trim().is_empty() {
                return Err(Error::configuration(format!(
                    "{name} is empty; MongoDB credentials are required"
                )));
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for MongoSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoSettings")
            .field("hosts", &self.hosts)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("auth_source", &self.auth_source)
            .field("app_name", &self.app_name)
            .field("server_selection_timeout", &self.server_selection_timeout)
            .field("operation_timeout", &self.operation_timeout)
            .finish()
    }
}
