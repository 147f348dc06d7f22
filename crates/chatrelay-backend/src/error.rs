//! Errors raised while setting up the backend client.
//!
//! Call-time failures are never reported through this type; they are
//! classified into the core `UpstreamError` at the port boundary.

use thiserror::Error;

/// Result type alias for client construction.
pub type BackendResult<T> = Result<T, BackendError>;

#[derive(Debug, Error)]
pub enum BackendError {
    /// The reqwest client could not be built (TLS backend, etc.).
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}
