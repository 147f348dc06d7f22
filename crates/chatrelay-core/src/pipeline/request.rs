//! Outbound completion request assembly.

use crate::domain::{ChatMessage, CompletionRequest};

/// Generation budget for chat completions.
pub const CHAT_MAX_TOKENS: u32 = 2000;

/// Sampling temperature for chat completions.
pub const CHAT_TEMPERATURE: f32 = 0.7;

/// Fixed prompt used by the connectivity probe.
pub const PROBE_PROMPT: &str = "Hello, this is a test message.";

const PROBE_MAX_TOKENS: u32 = 50;
const PROBE_TEMPERATURE: f32 = 0.1;

/// Append the current user message to the window and wrap it in a request.
pub fn build_request(
    model: &str,
    message: String,
    mut history: Vec<ChatMessage>,
) -> CompletionRequest {
    history.push(ChatMessage::user(message));

    CompletionRequest {
        model: model.to_string(),
        messages: history,
        max_tokens: CHAT_MAX_TOKENS,
        temperature: CHAT_TEMPERATURE,
        stream: false,
    }
}

/// Build the canned request sent by the connectivity probe.
pub fn build_probe_request(model: &str) -> CompletionRequest {
    CompletionRequest {
        model: model.to_string(),
        messages: vec![ChatMessage::user(PROBE_PROMPT)],
        max_tokens: PROBE_MAX_TOKENS,
        temperature: PROBE_TEMPERATURE,
        stream: false,
    }
}
