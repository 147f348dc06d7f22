//! Timed backend call and upstream failure classification.

use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::RelayConfig;
use crate::domain::CompletionRequest;
use crate::error::RelayError;
use crate::ports::{CompletionBackend, RawResponse, UpstreamError};

/// Fallback message when the backend's error body says nothing useful.
pub const UNKNOWN_BACKEND_ERROR: &str = "Unknown error from the completion backend";

/// Raw backend reply with the time spent waiting for it.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedResponse {
    pub response: RawResponse,
    pub latency: Duration,
}

/// Issue exactly one backend call bounded by the configured timeout.
pub async fn call_backend(
    backend: &dyn CompletionBackend,
    request: &CompletionRequest,
    config: &RelayConfig,
) -> Result<TimedResponse, RelayError> {
    debug!(
        endpoint = %config.backend_url,
        messages = request.messages.len(),
        "Sending completion request"
    );

    let started = Instant::now();
    let result = backend.attempt_call(request, config.timeout).await;
    let latency = started.elapsed();

    match result {
        Ok(response) => Ok(TimedResponse { response, latency }),
        Err(err) => {
            warn!(
                error = %err,
                latency_ms = latency.as_millis(),
                "Completion backend call failed"
            );
            Err(classify_upstream(err, config))
        }
    }
}

/// Map a port-level failure to the relay taxonomy.
pub fn classify_upstream(err: UpstreamError, config: &RelayConfig) -> RelayError {
    match err {
        UpstreamError::Unreachable { reason, detail } => RelayError::BackendUnreachable {
            reason,
            endpoint: config.backend_url.clone(),
            detail,
        },
        UpstreamError::Timeout(_) => RelayError::BackendTimeout {
            timeout_ms: config.timeout_ms(),
        },
        UpstreamError::Application { status, body } => RelayError::BackendApplicationError {
            status,
            message: backend_error_message(&body),
        },
    }
}

/// The backend's own error text: `error.message`, then `message`.
pub fn backend_error_message(body: &Value) -> String {
    body.pointer("/error/message")
        .and_then(Value::as_str)
        .or_else(|| body.get("message").and_then(Value::as_str))
        .filter(|message| !message.is_empty())
        .unwrap_or(UNKNOWN_BACKEND_ERROR)
        .to_string()
}
