//! Connection configuration.
//!
//! A [`ClientConfig`] can be built in code, loaded from a TOML file, and
//! overridden from `FLUIDDB_*` environment variables:
//!
//! ```toml
//! base_url = "http://sandbox.fluidinfo.com"
//! username = "alice"
//! password = "secret"
//! always_use_json = false
//! timeout_secs = 30
//! ```

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Deserializer};

use fluiddb_core::{Error, Result};

/// The production FluidDB endpoint.
pub const FLUIDDB_URL: &str = "http://fluiddb.fluidinfo.com";

/// The sandbox endpoint, for experiments and test runs.
pub const SANDBOX_URL: &str = "http://sandbox.fluidinfo.com";

/// Environment variable overriding the base URL.
pub const ENV_URL: &str = "FLUIDDB_URL";
/// Environment variable overriding the username.
pub const ENV_USERNAME: &str = "FLUIDDB_USERNAME";
/// Environment variable overriding the password.
pub const ENV_PASSWORD: &str = "FLUIDDB_PASSWORD";

/// Settings for one client session.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Base URL every resource path is appended to.
    pub base_url: String,
    /// Username for basic auth. Empty means anonymous.
    pub username: String,
    /// Password for basic auth. Empty means anonymous.
    pub password: String,
    /// Add `format=json` to every call that does not choose a format.
    pub always_use_json: bool,
    /// Whole-request timeout. `None` waits indefinitely.
    ///
    /// Written as `timeout_secs` in files; fractions of a second are kept.
    #[serde(rename = "timeout_secs", deserialize_with = "deserialize_secs")]
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: FLUIDDB_URL.to_string(),
            username: String::new(),
            password: String::new(),
            always_use_json: false,
            timeout: None,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &redacted(&self.password))
            .field("always_use_json", &self.always_use_json)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Read a non-negative number of seconds, integer or fractional.
fn deserialize_secs<'de, D>(deserializer: D) -> std::result::Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer)?
        .map(|secs| {
            Duration::try_from_secs_f64(secs).map_err(|e| {
                serde::de::Error::custom(format!("invalid timeout_secs {secs}: {e}"))
            })
        })
        .transpose()
}

fn redacted(secret: &str) -> &'static str {
    if secret.is_empty() { "" } else { "<redacted>" }
}

impl ClientConfig {
    /// Anonymous configuration pointing at the sandbox.
    pub fn sandbox() -> Self {
        Self::default().with_base_url(SANDBOX_URL)
    }

    /// Replace the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set basic-auth credentials.
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Toggle `format=json` injection.
    pub fn with_always_use_json(mut self, always_use_json: bool) -> Self {
        self.always_use_json = always_use_json;
        self
    }

    /// Set a whole-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The configured timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns `true` when both username and password are set.
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("invalid client config: {e}")))
    }

    /// Load a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("{}: {e}", path.display())))
    }

    /// Apply `FLUIDDB_URL`, `FLUIDDB_USERNAME` and `FLUIDDB_PASSWORD`.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// Keys are the `ENV_*` constants of this module; empty values are
    /// ignored.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.is_empty());
        if let Some(url) = lookup(ENV_URL) {
            self.base_url = url;
        }
        if let Some(username) = lookup(ENV_USERNAME) {
            self.username = username;
        }
        if let Some(password) = lookup(ENV_PASSWORD) {
            self.password = password;
        }
        self
    }

    /// Take username and password from a [`Credentials`] record.
    pub fn with_credentials_from(self, credentials: Credentials) -> Self {
        self.with_credentials(credentials.username, credentials.password)
    }
}

/// A username/password pair as stored in a `credentials.json` file.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    /// FluidDB username.
    pub username: String,
    /// FluidDB password.
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &redacted(&self.password))
            .finish()
    }
}

impl Credentials {
    /// Read `{"username": ..., "password": ...}` from a JSON file.
    ///
    /// Both fields must be non-empty.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let credentials: Self = serde_json::from_str(&content)?;
        if credentials.username.is_empty() || credentials.password.is_empty() {
            return Err(Error::config(format!(
                "{} must supply a username and password",
                path.display()
            )));
        }
        Ok(credentials)
    }
}
