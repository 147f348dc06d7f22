//! Completion backend port.
//!
//! This port is the only seam between the relay pipeline and the network.
//! Implementations own the transport and must classify its failures into
//! [`UpstreamError`]; the pipeline never inspects transport-specific errors.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::CompletionRequest;

/// Raw body returned by a backend that answered with a success status.
///
/// The body is not interpreted here; that is the extractor's job.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub body: serde_json::Value,
}

impl RawResponse {
    pub const fn new(body: serde_json::Value) -> Self {
        Self { body }
    }
}

/// Why the backend could not be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnreachableReason {
    /// The backend host actively refused the connection.
    ConnectionRefused,
    /// The backend host name could not be resolved.
    NameResolution,
    /// Any other transport-level failure.
    Other,
}

/// Transport and application failures reported by a backend.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UpstreamError {
    /// No usable response: connection refused, DNS failure, reset, etc.
    #[error("Backend unreachable: {detail}")]
    Unreachable {
        reason: UnreachableReason,
        detail: String,
    },

    /// The configured timeout elapsed before the backend answered.
    #[error("Backend request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// The backend answered with a non-success HTTP status.
    #[error("Backend returned status {status}")]
    Application {
        status: u16,
        /// Error body as sent by the backend (`null` if unparsable).
        body: serde_json::Value,
    },
}

/// Port for issuing a single completion call to the backend.
///
/// Implementations must not retry; the call is attempted exactly once and
/// abandoned when `timeout` elapses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send `request` to the backend's completion endpoint.
    async fn attempt_call(
        &self,
        request: &CompletionRequest,
        timeout: Duration,
    ) -> Result<RawResponse, UpstreamError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_error_message() {
        let err = UpstreamError::Timeout(Duration::from_millis(1500));
        assert_eq!(err.to_string(), "Backend request timed out after 1500ms");
    }

    #[test]
    fn test_application_error_message() {
        let err = UpstreamError::Application {
            status: 429,
            body: serde_json::Value::Null,
        };
        assert!(err.to_string().contains("429"));
    }
}
