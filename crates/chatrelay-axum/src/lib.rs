//! Axum web server adapter for chatrelay.
//!
//! Exposes the relay over HTTP (`/chat`, `/chat/test`, `/chat/config`)
//! together with health, index and Prometheus metrics endpoints.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings; used by integration tests
#[cfg(test)]
use async_trait as _;
#[cfg(test)]
use http_body_util as _;
#[cfg(test)]
use tower as _;

pub mod bootstrap;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod routes;
pub mod state;

// Re-export primary types
pub use bootstrap::{AxumContext, CorsConfig, ServerConfig, bootstrap, start_server};
pub use error::HttpError;
pub use metrics::RelayMetrics;
pub use routes::create_router;
pub use state::AppState;
