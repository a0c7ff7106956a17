//! Configuration types for dynupdate
//!
//! Two layers:
//! - [`Credentials`]: the `user` / `clientkey` / `hostname` settings file,
//!   parsed strictly from YAML
//! - [`UpdaterConfig`]: credentials plus the endpoints and paths one run uses

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::request::{REDACTED_KEY, UrlEscaping};

/// Default settings file read by the binary
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Default DynDNS update host
pub const DEFAULT_UPDATE_HOST: &str = "members.dyndns.org";

/// Default file holding the last IP sent to the provider
pub const DEFAULT_STATE_PATH: &str = "last-ip.txt";

/// Default "what is my IP" endpoint
pub const DEFAULT_CHECK_IP_URL: &str = "http://checkip.dyndns.com";

/// Account and host settings loaded from the settings file
///
/// ```yaml
/// user: alice
/// clientkey: 0123456789abcdef
/// hostname: home.example.com
/// ```
///
/// Unknown keys are rejected. The Debug implementation hides the client key.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Credentials {
    /// Provider account name
    pub user: String,

    /// Provider client key (updater password)
    /// ⚠️ NEVER log this value
    #[serde(rename = "clientkey")]
    pub client_key: String,

    /// Hostname whose address is updated
    pub hostname: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("client_key", &REDACTED_KEY)
            .field("hostname", &self.hostname)
            .finish()
    }
}

impl Credentials {
    /// Create credentials from their parts
    pub fn new(
        user: impl Into<String>,
        client_key: impl Into<String>,
        hostname: impl Into<String>,
    ) -> Self {
        Self {
            user: user.into(),
            client_key: client_key.into(),
            hostname: hostname.into(),
        }
    }

    /// Parse credentials from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let credentials: Credentials = serde_yaml::from_str(content)?;
        Ok(credentials)
    }

    /// Read and parse the settings file at `path`
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::config(format!(
                "Error reading config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml_str(&content).map_err(|e| {
            Error::config(format!(
                "Error reading config file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Validate the credentials
    pub fn validate(&self) -> Result<()> {
        if self.user.is_empty() {
            return Err(Error::config("user cannot be empty"));
        }
        if self.client_key.is_empty() {
            return Err(Error::config("clientkey cannot be empty"));
        }
        if self.hostname.is_empty() {
            return Err(Error::config("hostname cannot be empty"));
        }
        Ok(())
    }
}

/// Settings for a single update run
#[derive(Debug, Clone)]
pub struct UpdaterConfig {
    /// Account and hostname
    pub credentials: Credentials,

    /// Host receiving the `/v3/update` request
    pub update_host: String,

    /// File holding the last IP sent to the provider
    pub state_path: PathBuf,

    /// "What is my IP" endpoint
    pub check_ip_url: String,

    /// How user-supplied fields are substituted into the update URL
    pub url_escaping: UrlEscaping,

    /// HTTP timeout in seconds; `None` keeps the transport default
    pub http_timeout_secs: Option<u64>,

    /// Log the update instead of sending it
    pub dry_run: bool,
}

impl UpdaterConfig {
    /// Create a configuration with default endpoints and paths
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            update_host: DEFAULT_UPDATE_HOST.to_string(),
            state_path: PathBuf::from(DEFAULT_STATE_PATH),
            check_ip_url: DEFAULT_CHECK_IP_URL.to_string(),
            url_escaping: UrlEscaping::default(),
            http_timeout_secs: None,
            dry_run: false,
        }
    }

    /// Set the update host
    pub fn with_update_host(mut self, update_host: impl Into<String>) -> Self {
        self.update_host = update_host.into();
        self
    }

    /// Set the state file path
    pub fn with_state_path(mut self, state_path: impl Into<PathBuf>) -> Self {
        self.state_path = state_path.into();
        self
    }

    /// Set the checker URL
    pub fn with_check_ip_url(mut self, url: impl Into<String>) -> Self {
        self.check_ip_url = url.into();
        self
    }

    /// Set the URL escaping mode
    pub fn with_url_escaping(mut self, url_escaping: UrlEscaping) -> Self {
        self.url_escaping = url_escaping;
        self
    }

    /// Set the HTTP timeout
    pub fn with_http_timeout_secs(mut self, secs: Option<u64>) -> Self {
        self.http_timeout_secs = secs;
        self
    }

    /// Enable or disable dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.credentials.validate()?;

        if self.update_host.is_empty() {
            return Err(Error::config("update host cannot be empty"));
        }

        if self.state_path.as_os_str().is_empty() {
            return Err(Error::config("state file path cannot be empty"));
        }

        if !self.check_ip_url.starts_with("http://") && !self.check_ip_url.starts_with("https://")
        {
            return Err(Error::config(format!(
                "check IP URL must use HTTP or HTTPS scheme. Got: {}",
                self.check_ip_url
            )));
        }

        if let Some(secs) = self.http_timeout_secs
            && !(1..=300).contains(&secs)
        {
            return Err(Error::config(format!(
                "HTTP timeout must be between 1 and 300 seconds. Got: {}",
                secs
            )));
        }

        Ok(())
    }
}
