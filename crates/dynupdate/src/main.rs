// # dynupdate - one-shot DynDNS updater
//
// The binary is a THIN integration layer:
// 1. Read settings from environment variables
// 2. Initialize logging and the runtime
// 3. Load the credentials file and build the components
// 4. Run the updater once and turn its result into an exit code
//
// All update logic lives in dynupdate-core. Scheduling is external (cron,
// systemd timer); every invocation does at most one update.
//
// ## Configuration
//
// - `DYNUPDATE_CONFIG`: Credentials file (default `config.yaml`)
// - `DYNUPDATE_STATE_PATH`: Last-IP file (default `last-ip.txt`)
// - `DYNUPDATE_CHECK_IP_URL`: "What is my IP" endpoint (default `http://checkip.dyndns.com`)
// - `DYNUPDATE_UPDATE_HOST`: Update host (default `members.dyndns.org`)
// - `DYNUPDATE_URL_ESCAPING`: `verbatim` or `percent` (default `verbatim`)
// - `DYNUPDATE_HTTP_TIMEOUT_SECS`: HTTP timeout, 1-300 seconds (optional)
// - `DYNUPDATE_MODE`: `live` or `dry-run` (default `live`)
// - `DYNUPDATE_LOG_LEVEL`: trace, debug, info, warn, error (default `info`)
//
// ## Example
//
// ```bash
// cat > config.yaml <<EOF
// user: alice
// clientkey: 0123456789abcdef
// hostname: home.example.com
// EOF
//
// DYNUPDATE_MODE=dry-run dynupdate
// ```

use anyhow::{Context, Result};
use dynupdate_core::config::{
    Credentials, DEFAULT_CHECK_IP_URL, DEFAULT_CONFIG_PATH, DEFAULT_STATE_PATH,
    DEFAULT_UPDATE_HOST, UpdaterConfig,
};
use dynupdate_core::{FileStateStore, RunOutcome, Updater, UrlEscaping};
use dynupdate_ip_http::HttpIpSource;
use dynupdate_provider_dyndns::DynDnsProvider;
use std::env;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// - 0: The run finished (updated, unchanged, undetermined or dry run)
/// - 1: Configuration or startup error
/// - 2: Runtime error (network, HTTP status, state write)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DynUpdateExitCode {
    Success = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<DynUpdateExitCode> for ExitCode {
    fn from(code: DynUpdateExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Process settings read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
struct Settings {
    config_path: String,
    state_path: String,
    check_ip_url: String,
    update_host: String,
    url_escaping: UrlEscaping,
    http_timeout_secs: Option<u64>,
    mode: String,
    log_level: String,
}

impl Settings {
    /// Load settings from environment variables
    fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through `lookup`, which maps a variable name to its value
    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let url_escaping = match lookup("DYNUPDATE_URL_ESCAPING") {
            Some(value) => value
                .parse::<UrlEscaping>()
                .context("DYNUPDATE_URL_ESCAPING is not valid")?,
            None => UrlEscaping::default(),
        };

        let http_timeout_secs = match lookup("DYNUPDATE_HTTP_TIMEOUT_SECS") {
            Some(value) => Some(value.trim().parse::<u64>().with_context(|| {
                format!(
                    "DYNUPDATE_HTTP_TIMEOUT_SECS must be a number of seconds. Got: {}",
                    value
                )
            })?),
            None => None,
        };

        Ok(Self {
            config_path: or_default("DYNUPDATE_CONFIG", DEFAULT_CONFIG_PATH),
            state_path: or_default("DYNUPDATE_STATE_PATH", DEFAULT_STATE_PATH),
            check_ip_url: or_default("DYNUPDATE_CHECK_IP_URL", DEFAULT_CHECK_IP_URL),
            update_host: or_default("DYNUPDATE_UPDATE_HOST", DEFAULT_UPDATE_HOST),
            url_escaping,
            http_timeout_secs,
            mode: or_default("DYNUPDATE_MODE", "live"),
            log_level: or_default("DYNUPDATE_LOG_LEVEL", "info"),
        })
    }

    /// Validate the settings only the environment defines
    ///
    /// Paths, hosts, the checker URL and the timeout are checked by
    /// `UpdaterConfig::validate` once the credentials are loaded.
    fn validate(&self) -> Result<()> {
        if self.config_path.is_empty() {
            anyhow::bail!("DYNUPDATE_CONFIG cannot be empty");
        }

        match self.mode.as_str() {
            "live" | "dry-run" => {}
            _ => anyhow::bail!(
                "DYNUPDATE_MODE '{}' is not valid. Valid modes: live, dry-run",
                self.mode
            ),
        }

        self.level()?;

        Ok(())
    }

    fn is_dry_run(&self) -> bool {
        self.mode == "dry-run"
    }

    fn level(&self) -> Result<Level> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            _ => anyhow::bail!(
                "DYNUPDATE_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }
    }

    /// Combine the environment settings with the loaded credentials
    fn updater_config(&self, credentials: Credentials) -> UpdaterConfig {
        UpdaterConfig::new(credentials)
            .with_state_path(&self.state_path)
            .with_check_ip_url(self.check_ip_url.clone())
            .with_update_host(self.update_host.clone())
            .with_url_escaping(self.url_escaping)
            .with_http_timeout_secs(self.http_timeout_secs)
            .with_dry_run(self.is_dry_run())
    }
}

fn main() -> ExitCode {
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return DynUpdateExitCode::ConfigError.into();
        }
    };

    if let Err(e) = settings.validate() {
        eprintln!("Configuration validation error: {:#}", e);
        return DynUpdateExitCode::ConfigError.into();
    }

    let log_level = settings.level().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return DynUpdateExitCode::ConfigError.into();
    }

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return DynUpdateExitCode::RuntimeError.into();
        }
    };

    rt.block_on(run(settings)).into()
}

/// Build the updater and run it once
async fn run(settings: Settings) -> DynUpdateExitCode {
    let updater = match build_updater(&settings).await {
        Ok(updater) => updater,
        Err(e) => {
            error!("{:#}", e);
            return DynUpdateExitCode::ConfigError;
        }
    };

    info!("Checking {} [mode: {}]", updater.hostname(), settings.mode);

    match updater.run_once().await {
        Ok(outcome) => {
            report(&outcome);
            DynUpdateExitCode::Success
        }
        Err(e) => {
            error!("Unable to complete the update due to: {}", e);
            DynUpdateExitCode::RuntimeError
        }
    }
}

async fn build_updater(settings: &Settings) -> Result<Updater> {
    let credentials = Credentials::load(&settings.config_path).await?;
    let config = settings.updater_config(credentials);
    config.validate()?;

    let ip_source = HttpIpSource::from_config(&config)?;
    let provider = DynDnsProvider::from_config(&config)?;
    let state_store = FileStateStore::new(&config.state_path).await?;
    info!("Last IP record: {}", state_store.path().display());

    let updater = Updater::new(
        Box::new(ip_source),
        Box::new(provider),
        Box::new(state_store),
        &config,
    )?;

    Ok(updater)
}

fn report(outcome: &RunOutcome) {
    match outcome {
        RunOutcome::Unchanged { current_ip } => {
            info!("Nothing to do, {} is current", current_ip);
        }
        RunOutcome::Undetermined => {
            info!("Current IP could not be determined, nothing sent");
        }
        RunOutcome::Updated { new_ip, response, .. } => {
            info!("Update sent for {}: {}", new_ip, response.trim_end());
        }
        RunOutcome::DryRun { new_ip, target, .. } => {
            info!("[DRY-RUN] Update for {} not sent: {}", new_ip, target);
        }
    }
}
