// # State Store Trait
//
// Defines the interface for the last-IP record.
//
// ## Purpose
//
// The store remembers the IP most recently sent to the provider so that a
// later run with the same address makes no provider call.
//
// ## Implementations
//
// - File-based: one-line text file (`FileStateStore`)
// - In-memory: tests and dry runs (`MemoryStateStore`)

use async_trait::async_trait;

/// Trait for state store implementations
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Read the last recorded IP
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The recorded IP, or empty if the record holds none
    /// - `Err(Error)`: The record does not exist or cannot be read
    async fn read_last(&self) -> Result<String, crate::Error>;

    /// Replace the record with `ip`
    ///
    /// # Returns
    ///
    /// - `Ok(())`: The IP is durably recorded
    /// - `Err(Error)`: Storage error
    async fn write_last(&self, ip: &str) -> Result<(), crate::Error>;
}
