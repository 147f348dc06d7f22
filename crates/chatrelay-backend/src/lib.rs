//! HTTP client for OpenAI-compatible completion backends.
//!
//! Implements the core [`chatrelay_core::CompletionBackend`] port with
//! reqwest. Transport failures are classified here (refused, lookup,
//! timeout, other) so the relay never sees reqwest or hyper types.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod classify;
mod client;
mod config;
mod error;

// ============================================================================
// Public API
// ============================================================================

pub use client::HttpCompletionBackend;
pub use config::BackendClientConfig;
pub use error::{BackendError, BackendResult};

// Silence unused dev-dependency warnings; used by integration tests
#[cfg(test)]
use axum as _;
#[cfg(test)]
use tokio as _;
#[cfg(test)]
use tokio_test as _;
