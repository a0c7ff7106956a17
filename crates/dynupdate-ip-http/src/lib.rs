// # HTTP IP Source
//
// This crate provides the "what is my IP" lookup for dynupdate.
//
// ## Behavior
//
// - One GET per lookup against the configured checker URL
//   (default `http://checkip.dyndns.com`)
// - Anything but a 200 answer is an error
// - The body is searched for the first IPv4 address; no particular format is
//   assumed, so plain-text and HTML checkers both work
// - A 200 answer without an address yields an empty string, which the updater
//   treats as "could not determine"

use async_trait::async_trait;
use dynupdate_core::config::UpdaterConfig;
use dynupdate_core::extract_ip;
use dynupdate_core::traits::IpSource;
use dynupdate_core::{Error, Result};

use std::time::Duration;

/// HTTP-based IP source
#[derive(Debug, Clone)]
pub struct HttpIpSource {
    /// URL to fetch IP from
    url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpIpSource {
    /// Create a new HTTP IP source
    ///
    /// # Parameters
    ///
    /// - `url`: Checker URL (e.g., "http://checkip.dyndns.com")
    /// - `timeout`: Request timeout; `None` keeps the transport default
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }

    /// Create the source described by `config`
    pub fn from_config(config: &UpdaterConfig) -> Result<Self> {
        Self::new(
            config.check_ip_url.clone(),
            config.http_timeout_secs.map(Duration::from_secs),
        )
    }

    /// Checker URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the checker body
    async fn fetch_body(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::network(format!("Request to {} failed: {}", self.url, e)))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(Error::http_status(&self.url, status.as_u16()));
        }

        response.text().await.map_err(|e| {
            Error::network(format!("Failed to read response from {}: {}", self.url, e))
        })
    }
}

#[async_trait]
impl IpSource for HttpIpSource {
    async fn current(&self) -> Result<String> {
        let body = self.fetch_body().await?;
        tracing::trace!("Checker response body: {}", body);

        let ip = extract_ip(&body);
        if ip.is_empty() {
            tracing::debug!("No IPv4 address in response from {}", self.url);
        }
        Ok(ip)
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}
