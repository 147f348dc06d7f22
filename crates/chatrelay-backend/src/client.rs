//! reqwest implementation of the completion backend port.

use std::time::Duration;

use async_trait::async_trait;
use chatrelay_core::{CompletionBackend, CompletionRequest, RawResponse, UpstreamError};
use serde_json::Value;
use tracing::{debug, warn};

use crate::classify::classify_transport;
use crate::config::BackendClientConfig;
use crate::error::BackendResult;

/// Completion backend reached over HTTP.
///
/// Holds one pooled `reqwest::Client`, which is safe to share across
/// concurrent requests.
#[derive(Debug, Clone)]
pub struct HttpCompletionBackend {
    client: reqwest::Client,
    completions_url: String,
}

impl HttpCompletionBackend {
    /// Build a client for the backend described by `config`.
    pub fn new(config: &BackendClientConfig) -> BackendResult<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .pool_max_idle_per_host(config.pool_max_idle_per_host);
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            client: builder.build()?,
            completions_url: config.completions_url(),
        })
    }

    /// Full URL this backend posts completions to.
    pub fn completions_url(&self) -> &str {
        &self.completions_url
    }
}

#[async_trait]
impl CompletionBackend for HttpCompletionBackend {
    async fn attempt_call(
        &self,
        request: &CompletionRequest,
        timeout: Duration,
    ) -> Result<RawResponse, UpstreamError> {
        debug!(url = %self.completions_url, model = %request.model, "POST completion");

        let response = self
            .client
            .post(&self.completions_url)
            .timeout(timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| classify_transport(&e, timeout))?;

        let status = response.status();
        // The timeout also covers reading the body.
        let bytes = response
            .bytes()
            .await
            .map_err(|e| classify_transport(&e, timeout))?;
        let body = parse_body(&bytes);

        if !status.is_success() {
            return Err(UpstreamError::Application {
                status: status.as_u16(),
                body,
            });
        }

        Ok(RawResponse::new(body))
    }
}

/// Parse a response body as JSON, falling back to `null`.
fn parse_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes).unwrap_or_else(|e| {
        warn!("Backend response body is not JSON: {e}");
        Value::Null
    })
}
