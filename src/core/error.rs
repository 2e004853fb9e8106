//! Crate-level error type.
//!
//! Per-request failures never reach this type: the dispatcher turns them into
//! envelopes. What ends up here is what stops the server from starting.

use thiserror::Error;

use super::capability::ConfigurationError;

/// A specialized Result type for server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for server startup.
#[derive(Debug, Error)]
pub enum Error {
    /// Capability groups could not be built or composed.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// The outbound HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}
