// # DNS Provider Trait
//
// Defines the interface for notifying a dynamic DNS provider of a new IP.
//
// ## Implementations
//
// - DynDNS v3: `dynupdate-provider-dyndns` crate
//
// ## Usage
//
// ```rust,ignore
// use dynupdate_core::DnsProvider;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let provider = /* DnsProvider implementation */;
//
//     provider.update_record("home.example.com", "203.0.113.5").await?;
//
//     Ok(())
// }
// ```

use async_trait::async_trait;

/// Result of a provider update call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateResult {
    /// The request was sent and answered with 200
    Sent {
        /// Response body, verbatim
        response: String,
    },
    /// Dry-run: nothing was sent
    DryRun {
        /// The request target with secrets redacted
        target: String,
    },
}

/// Trait for DNS provider implementations
///
/// # Contract
///
/// - Exactly one request per call; retry policy does not exist in this system
/// - Transport failures and non-200 answers are errors
/// - The response body is returned verbatim and does not decide success
/// - Secrets never appear in logs or error messages
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Tell the provider that `hostname` now resolves to `new_ip`
    ///
    /// # Returns
    ///
    /// - `Ok(UpdateResult)`: What was done
    /// - `Err(Error)`: If the request failed
    async fn update_record(
        &self,
        hostname: &str,
        new_ip: &str,
    ) -> Result<UpdateResult, crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
