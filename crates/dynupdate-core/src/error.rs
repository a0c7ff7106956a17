//! Error types for dynupdate
//!
//! Every failure a run can hit maps to one of these variants. Only
//! [`Error::StoreRead`] is recovered inside the updater; everything else ends
//! the run.

use thiserror::Error;

/// Result type alias for dynupdate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for dynupdate
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or malformed settings
    #[error("Configuration error: {0}")]
    Config(String),

    /// The last-IP record could not be read
    #[error("Unable to read last IP: {0}")]
    StoreRead(String),

    /// The new IP could not be persisted after an update
    #[error("Unable to write IP to state file: {0}")]
    StoreWrite(String),

    /// Transport-level failure talking to the checker or the provider
    #[error("Network error: {0}")]
    Network(String),

    /// A request completed with a status other than 200
    #[error("HTTP error: {url} returned {status}")]
    HttpStatus {
        /// Target of the request, with secrets redacted
        url: String,
        /// Status code received
        status: u16,
    },

    /// Invalid input to one of the builders
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a state read error
    pub fn store_read(msg: impl Into<String>) -> Self {
        Self::StoreRead(msg.into())
    }

    /// Create a state write error
    pub fn store_write(msg: impl Into<String>) -> Self {
        Self::StoreWrite(msg.into())
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create an HTTP status error
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether this error came from talking to a remote endpoint
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_) | Self::HttpStatus { .. })
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Config(err.to_string())
    }
}
