// # dynupdate-core
//
// Core library for the dynupdate dynamic DNS client.
//
// ## Architecture Overview
//
// This library provides everything one update run needs, minus the network
// clients themselves:
// - **extract**: Pull the first IPv4 address out of a "what is my IP" response
// - **detect**: Decide whether the provider must be notified
// - **request**: Build the DynDNS v3 update URL
// - **StateStore**: Persist the last IP that was sent to the provider
// - **Updater**: Run the read → fetch → compare → update → persist sequence
//
// The HTTP checker lives in `dynupdate-ip-http`, the DynDNS client in
// `dynupdate-provider-dyndns`, and the `dynupdate` binary wires them together.
//
// ## Design Principles
//
// 1. **One-shot**: A run does its work and returns; scheduling is external
// 2. **Typed outcomes**: The updater returns a result, the binary decides how to exit
// 3. **Explicit settings**: Hosts, paths and URLs are config fields, not globals

pub mod config;
pub mod detect;
pub mod engine;
pub mod error;
pub mod extract;
pub mod request;
pub mod state;
pub mod traits;

// Re-export core types for convenience
pub use config::{Credentials, UpdaterConfig};
pub use detect::has_changed;
pub use engine::{RunOutcome, Updater};
pub use error::{Error, Result};
pub use extract::extract_ip;
pub use request::{UpdateParams, UrlEscaping};
pub use state::{FileStateStore, MemoryStateStore};
pub use traits::{DnsProvider, IpSource, StateStore, UpdateResult};
