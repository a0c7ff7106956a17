//! DynDNS v3 update request construction
//!
//! The update target is
//!
//! ```text
//! http://{user}:{client_key}@{update_host}/v3/update?hostname={host_name}&myip={my_ip}
//! ```
//!
//! By default the fields are substituted as-is, so credentials or hostnames
//! containing URL metacharacters produce an unusable URL. [`UrlEscaping::Percent`]
//! encodes the user-supplied fields instead.

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::{Error, Result};

/// Placeholder for the client key in loggable URLs and Debug output
pub const REDACTED_KEY: &str = "<REDACTED>";

/// How user-supplied fields are placed into the update URL
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UrlEscaping {
    /// Plain substitution, no encoding
    #[default]
    Verbatim,
    /// Percent-encode userinfo and query values
    Percent,
}

impl FromStr for UrlEscaping {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "verbatim" => Ok(Self::Verbatim),
            "percent" => Ok(Self::Percent),
            other => Err(Error::config(format!(
                "URL escaping '{}' is not valid. Valid modes: verbatim, percent",
                other
            ))),
        }
    }
}

impl fmt::Display for UrlEscaping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verbatim => f.write_str("verbatim"),
            Self::Percent => f.write_str("percent"),
        }
    }
}

/// Everything needed to build one update request
#[derive(Clone, PartialEq, Eq)]
pub struct UpdateParams {
    pub user: String,
    pub client_key: String,
    pub update_host: String,
    pub host_name: String,
    pub my_ip: String,
}

impl fmt::Debug for UpdateParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateParams")
            .field("user", &self.user)
            .field("client_key", &REDACTED_KEY)
            .field("update_host", &self.update_host)
            .field("host_name", &self.host_name)
            .field("my_ip", &self.my_ip)
            .finish()
    }
}

impl UpdateParams {
    pub fn new(
        user: impl Into<String>,
        client_key: impl Into<String>,
        update_host: impl Into<String>,
        host_name: impl Into<String>,
        my_ip: impl Into<String>,
    ) -> Self {
        Self {
            user: user.into(),
            client_key: client_key.into(),
            update_host: update_host.into(),
            host_name: host_name.into(),
            my_ip: my_ip.into(),
        }
    }

    /// Build the request URL
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if the update host or IP is empty, or if the
    /// percent-encoded form cannot be assembled into a URL.
    pub fn url(&self, escaping: UrlEscaping) -> Result<String> {
        self.render(&self.client_key, escaping)
    }

    /// Build the request URL with the client key masked, for logs and errors
    pub fn redacted_url(&self, escaping: UrlEscaping) -> Result<String> {
        let url = self.render(REDACTED_KEY, escaping)?;
        // Percent mode encodes the placeholder's angle brackets in userinfo
        Ok(url.replacen("%3CREDACTED%3E", REDACTED_KEY, 1))
    }

    fn render(&self, client_key: &str, escaping: UrlEscaping) -> Result<String> {
        if self.update_host.is_empty() {
            return Err(Error::invalid_input("update host cannot be empty"));
        }
        if self.my_ip.is_empty() {
            return Err(Error::invalid_input("IP address cannot be empty"));
        }

        match escaping {
            UrlEscaping::Verbatim => Ok(format!(
                "http://{}:{}@{}/v3/update?hostname={}&myip={}",
                self.user, client_key, self.update_host, self.host_name, self.my_ip
            )),
            UrlEscaping::Percent => {
                let mut url = Url::parse(&format!("http://{}/v3/update", self.update_host))
                    .map_err(|e| {
                        Error::invalid_input(format!(
                            "Invalid update host '{}': {}",
                            self.update_host, e
                        ))
                    })?;

                url.set_username(&self.user)
                    .map_err(|_| Error::invalid_input("update URL cannot carry a user name"))?;
                url.set_password(Some(client_key))
                    .map_err(|_| Error::invalid_input("update URL cannot carry a password"))?;
                url.query_pairs_mut()
                    .append_pair("hostname", &self.host_name)
                    .append_pair("myip", &self.my_ip);

                Ok(url.into())
            }
        }
    }
}
