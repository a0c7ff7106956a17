//! Test doubles and common utilities for updater contract tests
//!
//! Each double records how often it was called so tests can assert which
//! steps of a run happened.

use dynupdate_core::config::{Credentials, UpdaterConfig};
use dynupdate_core::error::{Error, Result};
use dynupdate_core::traits::{DnsProvider, IpSource, StateStore, UpdateResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// What a [`ScriptedIpSource`] answers with
#[derive(Debug, Clone)]
pub enum CheckerReply {
    /// Lookup succeeded with this (possibly empty) address
    Address(String),
    /// Checker answered with a non-200 status
    Status(u16),
    /// Checker could not be reached
    Unreachable,
}

/// An IpSource returning a fixed reply
#[derive(Clone)]
pub struct ScriptedIpSource {
    reply: CheckerReply,
    calls: Arc<AtomicUsize>,
}

impl ScriptedIpSource {
    pub fn new(reply: CheckerReply) -> Self {
        Self {
            reply,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn address(ip: &str) -> Self {
        Self::new(CheckerReply::Address(ip.to_string()))
    }

    /// Number of times current() was called
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl IpSource for ScriptedIpSource {
    async fn current(&self) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            CheckerReply::Address(ip) => Ok(ip.clone()),
            CheckerReply::Status(status) => {
                Err(Error::http_status("http://checkip.test", *status))
            }
            CheckerReply::Unreachable => Err(Error::network("connection refused")),
        }
    }

    fn source_name(&self) -> &'static str {
        "scripted"
    }
}

/// How a [`MockDnsProvider`] behaves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderMode {
    /// Answer 200 with a DynDNS-style body
    Accept,
    /// Answer with this status
    Reject(u16),
    /// Report a dry run
    DryRun,
}

/// A DnsProvider that records every call
#[derive(Clone)]
pub struct MockDnsProvider {
    mode: ProviderMode,
    updates: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockDnsProvider {
    pub fn new(mode: ProviderMode) -> Self {
        Self {
            mode,
            updates: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of times update_record() was called
    pub fn update_call_count(&self) -> usize {
        self.updates.lock().unwrap().len()
    }

    /// (hostname, ip) pairs passed to update_record()
    pub fn updates(&self) -> Vec<(String, String)> {
        self.updates.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl DnsProvider for MockDnsProvider {
    async fn update_record(&self, hostname: &str, new_ip: &str) -> Result<UpdateResult> {
        self.updates
            .lock()
            .unwrap()
            .push((hostname.to_string(), new_ip.to_string()));

        match self.mode {
            ProviderMode::Accept => Ok(UpdateResult::Sent {
                response: format!("good {}", new_ip),
            }),
            ProviderMode::Reject(status) => Err(Error::http_status(
                "http://u:<REDACTED>@members.test/v3/update",
                status,
            )),
            ProviderMode::DryRun => Ok(UpdateResult::DryRun {
                target: format!(
                    "http://u:<REDACTED>@members.test/v3/update?hostname={}&myip={}",
                    hostname, new_ip
                ),
            }),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// A StateStore that counts calls and can be told to fail
#[derive(Clone, Default)]
pub struct MockStateStore {
    state: Arc<Mutex<Option<String>>>,
    reads: Arc<AtomicUsize>,
    writes: Arc<AtomicUsize>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MockStateStore {
    /// Store with no record, like a missing state file
    pub fn empty() -> Self {
        Self::default()
    }

    /// Store already holding `ip`
    pub fn holding(ip: &str) -> Self {
        let store = Self::default();
        *store.state.lock().unwrap() = Some(ip.to_string());
        store
    }

    /// Make every read fail
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Make every write fail
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn contents(&self) -> Option<String> {
        self.state.lock().unwrap().clone()
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl StateStore for MockStateStore {
    async fn read_last(&self) -> Result<String> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads {
            return Err(Error::store_read("permission denied"));
        }
        self.state
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Error::store_read("last-ip.txt does not exist"))
    }

    async fn write_last(&self, ip: &str) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            return Err(Error::store_write("read-only file system"));
        }
        *self.state.lock().unwrap() = Some(ip.to_string());
        Ok(())
    }
}

/// Helper to create a minimal UpdaterConfig for testing
pub fn minimal_config(hostname: &str) -> UpdaterConfig {
    UpdaterConfig::new(Credentials::new("test-user", "test-key", hostname))
        .with_check_ip_url("http://checkip.test")
}
