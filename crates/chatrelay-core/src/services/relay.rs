//! Chat relay service.
//!
//! `ChatRelay` is the entry point adapters call for every inbound chat
//! request. It owns nothing mutable: configuration and the backend port are
//! shared read-only across concurrent requests.

use std::sync::Arc;

use tracing::{error, info};

use crate::config::RelayConfig;
use crate::domain::{ChatReply, InboundChat, ProbeReport};
use crate::error::{ClassifiedError, RelayError};
use crate::pipeline::{
    build_probe_request, build_request, call_backend, extract_completion, probe_content,
    validate_message, window_history,
};
use crate::ports::CompletionBackend;

/// Characters of message text included in log lines.
const LOG_PREVIEW_CHARS: usize = 100;

/// Stateless relay between chat clients and the completion backend.
#[derive(Clone)]
pub struct ChatRelay {
    backend: Arc<dyn CompletionBackend>,
    config: Arc<RelayConfig>,
}

impl ChatRelay {
    pub fn new(backend: Arc<dyn CompletionBackend>, config: Arc<RelayConfig>) -> Self {
        Self { backend, config }
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Handle one chat request, returning the reply or its classified failure.
    pub async fn handle_chat(&self, inbound: &InboundChat) -> Result<ChatReply, ClassifiedError> {
        self.relay(inbound).await.map_err(|err| {
            let classified = err.classify(self.config.environment);
            error!(
                category = %classified.category,
                status = classified.status,
                error = %err,
                "Chat request failed"
            );
            classified
        })
    }

    async fn relay(&self, inbound: &InboundChat) -> Result<ChatReply, RelayError> {
        let message = validate_message(inbound.message.as_ref(), self.config.max_message_length)?;
        info!(preview = %preview(&message), "Received chat request");

        let history = window_history(inbound.history.as_ref(), self.config.history_limit);
        let request = build_request(&self.config.model, message, history);

        let timed = call_backend(self.backend.as_ref(), &request, &self.config).await?;
        info!(
            latency_ms = timed.latency.as_millis(),
            "Received response from completion backend"
        );

        let extracted = extract_completion(&timed.response.body, &self.config.model)?;
        info!(preview = %preview(&extracted.text), "Sending chat response");

        Ok(ChatReply::from_extracted(extracted, timed.latency))
    }

    /// Send the canned probe request to check that the backend answers.
    ///
    /// Any failure, including a backend error status or a body without a
    /// `choices` array, is returned as-is so the caller can report it as a
    /// connectivity problem.
    pub async fn probe(&self) -> Result<ProbeReport, RelayError> {
        info!(endpoint = %self.config.backend_url, "Testing connection to completion backend");

        let request = build_probe_request(&self.config.model);
        let timed = call_backend(self.backend.as_ref(), &request, &self.config).await?;

        Ok(ProbeReport {
            latency: timed.latency,
            content: probe_content(&timed.response.body)?,
        })
    }
}

impl std::fmt::Debug for ChatRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatRelay")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(LOG_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
