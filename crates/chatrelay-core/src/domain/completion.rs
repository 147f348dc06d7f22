//! Completion request and reply types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::chat::ConversationWindow;

/// Request body for the backend's `/v1/chat/completions` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: ConversationWindow,
    pub max_tokens: u32,
    pub temperature: f32,
    pub stream: bool,
}

/// Text pulled out of a backend response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedCompletion {
    /// Trimmed completion text.
    pub text: String,
    /// Model reported by the backend, or the configured fallback.
    pub model: String,
    /// Usage statistics, passed through untouched.
    pub usage: Option<serde_json::Value>,
}

/// Successful relay outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub text: String,
    pub model: String,
    pub usage: Option<serde_json::Value>,
    /// Wall-clock time spent waiting on the backend.
    pub latency: Duration,
}

impl ChatReply {
    pub(crate) fn from_extracted(extracted: ExtractedCompletion, latency: Duration) -> Self {
        Self {
            text: extracted.text,
            model: extracted.model,
            usage: extracted.usage,
            latency,
        }
    }

    /// Latency in whole milliseconds, as reported to clients.
    #[must_use]
    pub fn latency_ms(&self) -> u64 {
        u64::try_from(self.latency.as_millis()).unwrap_or(u64::MAX)
    }
}

/// Outcome of the connectivity probe.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeReport {
    pub latency: Duration,
    /// First choice's content, if the backend returned any.
    pub content: Option<String>,
}

impl ProbeReport {
    /// Latency in whole milliseconds.
    #[must_use]
    pub fn latency_ms(&self) -> u64 {
        u64::try_from(self.latency.as_millis()).unwrap_or(u64::MAX)
    }
}
