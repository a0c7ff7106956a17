//! Core traits for dynupdate
//!
//! The updater talks to the outside world only through these interfaces.
//!
//! - [`IpSource`]: Determine the current public IP
//! - [`DnsProvider`]: Send the update request to the provider
//! - [`StateStore`]: Persist the last IP that was sent

pub mod dns_provider;
pub mod ip_source;
pub mod state_store;

pub use dns_provider::{DnsProvider, UpdateResult};
pub use ip_source::IpSource;
pub use state_store::StateStore;
