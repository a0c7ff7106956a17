// # IP Source Trait
//
// Defines the interface for determining the caller's current public IP.
//
// ## Implementations
//
// - HTTP checker: `dynupdate-ip-http` crate
//
// ## Usage
//
// ```rust,ignore
// use dynupdate_core::IpSource;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let source = /* IpSource implementation */;
//
//     let current_ip = source.current().await?;
//     if current_ip.is_empty() {
//         println!("checker answered without an address");
//     }
//
//     Ok(())
// }
// ```

use async_trait::async_trait;

/// Trait for IP source implementations
///
/// # Contract
///
/// - One call performs at most one lookup; no retries, no caching across runs
/// - Transport failures and non-200 answers are errors
/// - A successful lookup whose answer holds no address returns an empty string
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Determine the current IP address
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The dotted-quad address, or empty if none was found
    /// - `Err(Error)`: If the lookup itself failed
    async fn current(&self) -> Result<String, crate::Error>;

    /// Name of the source, for logging
    fn source_name(&self) -> &'static str;
}
