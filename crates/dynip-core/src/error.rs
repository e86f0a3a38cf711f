//! Error types for the dynip updater
//!
//! Every failure is fatal for the run. Nothing here is retried; errors
//! bubble up to the binary, which logs the chain and exits non-zero.

use thiserror::Error;

use crate::ipv4::Ipv4Error;

/// Result type alias for dynip operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the dynip updater
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed IPv4 literal
    #[error("Invalid IPv4 address")]
    Validation(#[from] Ipv4Error),

    /// Echo endpoint unreachable, non-200, or unreadable body
    #[error("Network error: {0}")]
    Network(String),

    /// Configuration missing, malformed, or invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Target hosted zone absent
    #[error("Not found: {0}")]
    NotFound(String),

    /// DNS provider API call failed
    #[error("Provider error ({provider}): {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },
}

impl Error {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a provider-specific error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }
}
