//! Core update workflow
//!
//! The [`Updater`] runs one pass of the dynamic DNS workflow:
//!
//! ```text
//! ┌─────────────┐   last IP    ┌─────────────┐   current IP   ┌─────────────┐
//! │ StateStore  │ ───────────▶ │   Updater   │ ◀───────────── │  IpSource   │
//! │ (read)      │              └─────────────┘                └─────────────┘
//! └─────────────┘                     │
//!                       has_changed?  │
//!                 ┌───────────────────┴───────────────────┐
//!                 ▼                                       ▼
//!          ┌─────────────┐                         ┌─────────────┐
//!          │ DnsProvider │ ── on success ────────▶ │ StateStore  │
//!          │ (update)    │                         │ (write)     │
//!          └─────────────┘                         └─────────────┘
//! ```
//!
//! ## Steps
//!
//! 1. Read the last IP; a read failure is logged and treated as a first run
//! 2. Fetch the current IP; any failure ends the run
//! 3. Compare; an unchanged address ends the run successfully
//! 4. Send the update; any failure ends the run
//! 5. Persist the new IP; a write failure ends the run
//!
//! Nothing is retried. The caller decides what a failure means for the process.

use crate::config::UpdaterConfig;
use crate::detect::has_changed;
use crate::error::Result;
use crate::traits::{DnsProvider, IpSource, StateStore, UpdateResult};
use tracing::{debug, info, warn};

/// How a successful run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The current IP matches the last recorded one
    Unchanged {
        current_ip: String,
    },

    /// The checker answered but its body held no IPv4 address
    Undetermined,

    /// The provider was updated and the new IP recorded
    Updated {
        previous_ip: Option<String>,
        new_ip: String,
        response: String,
    },

    /// Dry-run: the update was logged, not sent, and nothing was recorded
    DryRun {
        previous_ip: Option<String>,
        new_ip: String,
        target: String,
    },
}

/// One-shot dynamic DNS updater
///
/// ## Lifecycle
///
/// 1. Create with [`Updater::new()`]
/// 2. Call [`Updater::run_once()`]
/// 3. Drop; the external scheduler starts a fresh process next time
pub struct Updater {
    /// Source of the current IP
    ip_source: Box<dyn IpSource>,

    /// Provider receiving the update
    provider: Box<dyn DnsProvider>,

    /// Last-IP record
    state_store: Box<dyn StateStore>,

    /// Hostname being kept current
    hostname: String,
}

impl Updater {
    /// Create a new updater
    ///
    /// # Parameters
    ///
    /// - `ip_source`: IP source implementation
    /// - `provider`: DNS provider implementation
    /// - `state_store`: State store implementation
    /// - `config`: Run configuration; validated here
    pub fn new(
        ip_source: Box<dyn IpSource>,
        provider: Box<dyn DnsProvider>,
        state_store: Box<dyn StateStore>,
        config: &UpdaterConfig,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            ip_source,
            provider,
            state_store,
            hostname: config.credentials.hostname.clone(),
        })
    }

    /// Hostname this updater keeps current
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Run the workflow once
    ///
    /// # Returns
    ///
    /// - `Ok(RunOutcome)`: The run finished; see the variant for what happened
    /// - `Err(Error)`: A fatal step failed (fetch, update or persist)
    pub async fn run_once(&self) -> Result<RunOutcome> {
        let last_ip = self.read_last_ip().await;

        let current_ip = self.ip_source.current().await?;
        debug!(
            "Current IP from {}: '{}'",
            self.ip_source.source_name(),
            current_ip
        );

        if !has_changed(&current_ip, &last_ip) {
            if current_ip.is_empty() {
                warn!(
                    "No IPv4 address found in {} response, nothing to update",
                    self.ip_source.source_name()
                );
                return Ok(RunOutcome::Undetermined);
            }

            info!("IP unchanged.");
            return Ok(RunOutcome::Unchanged { current_ip });
        }

        let previous_ip = (!last_ip.is_empty()).then_some(last_ip);
        info!(
            "IP changed from {} to {}",
            previous_ip.as_deref().unwrap_or("<none>"),
            current_ip
        );

        let result = self
            .provider
            .update_record(&self.hostname, &current_ip)
            .await?;

        match result {
            UpdateResult::Sent { response } => {
                info!(
                    "Updated {} -> {} via {}",
                    self.hostname,
                    current_ip,
                    self.provider.provider_name()
                );

                self.state_store.write_last(&current_ip).await?;
                debug!("Recorded {} as last IP", current_ip);

                Ok(RunOutcome::Updated {
                    previous_ip,
                    new_ip: current_ip,
                    response,
                })
            }
            UpdateResult::DryRun { target } => {
                info!("[DRY-RUN] Not recording {} as last IP", current_ip);
                Ok(RunOutcome::DryRun {
                    previous_ip,
                    new_ip: current_ip,
                    target,
                })
            }
        }
    }

    /// Read the last IP, falling back to "" when no record is available
    async fn read_last_ip(&self) -> String {
        match self.state_store.read_last().await {
            Ok(ip) => {
                debug!("Last recorded IP: '{}'", ip);
                ip
            }
            Err(e) => {
                warn!("{}", e);
                warn!("Continuing...");
                String::new()
            }
        }
    }
}
