// # Memory State Store
//
// In-memory implementation of StateStore.
//
// ## Purpose
//
// Holds the last IP for the lifetime of the process only. Used by tests and
// by embedders that keep their own record; the binary always uses the file store.
//
// An empty store behaves like a missing state file: `read_last` fails and
// the updater treats the run as the first one.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::Error;
use crate::traits::state_store::StateStore;

/// In-memory last-IP store
///
/// Clones share the same slot, so a test can keep one handle and give the
/// other to the updater.
#[derive(Debug, Clone, Default)]
pub struct MemoryStateStore {
    inner: Arc<RwLock<Option<String>>>,
}

impl MemoryStateStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `ip`
    pub fn with_last_ip(ip: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(ip.into()))),
        }
    }

    /// Current contents, if anything was recorded
    pub async fn snapshot(&self) -> Option<String> {
        self.inner.read().await.clone()
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn read_last(&self) -> Result<String, Error> {
        self.inner
            .read()
            .await
            .clone()
            .ok_or_else(|| Error::store_read("no IP recorded"))
    }

    async fn write_last(&self, ip: &str) -> Result<(), Error> {
        *self.inner.write().await = Some(ip.to_string());
        Ok(())
    }
}
