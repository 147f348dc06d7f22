//! Chat domain types.
//!
//! These types represent conversation turns as they are sent to the
//! completion backend, independent of any transport concerns.

use serde::{Deserialize, Serialize};

/// The role of a message sender.
///
/// The backend only ever sees these two roles; anything a caller supplies
/// is normalized into one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    /// Normalize an arbitrary caller-supplied role.
    ///
    /// Exactly `"assistant"` maps to [`MessageRole::Assistant`]; every other
    /// value (including non-string JSON) maps to [`MessageRole::User`].
    #[must_use]
    pub fn normalize(value: &serde_json::Value) -> Self {
        match value.as_str() {
            Some("assistant") => Self::Assistant,
            _ => Self::User,
        }
    }

    /// Convert role to string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single message in the conversation sent upstream.
///
/// `content` is always trimmed and non-empty once a message has passed
/// through the validator or the history windower.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered prior turns plus the current user turn.
pub type ConversationWindow = Vec<ChatMessage>;

/// Inbound chat request as posted by the chat client.
///
/// Both fields are kept as raw JSON: their shape is untrusted until the
/// validator and windower have looked at them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InboundChat {
    #[serde(default)]
    pub message: Option<serde_json::Value>,
    #[serde(default)]
    pub history: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_role() {
        assert_eq!(MessageRole::normalize(&json!("assistant")), MessageRole::Assistant);
        assert_eq!(MessageRole::normalize(&json!("user")), MessageRole::User);
        assert_eq!(MessageRole::normalize(&json!("system")), MessageRole::User);
        assert_eq!(MessageRole::normalize(&json!("Assistant")), MessageRole::User);
        assert_eq!(MessageRole::normalize(&json!(42)), MessageRole::User);
    }

    #[test]
    fn test_message_serializes_lowercase_role() {
        let value = serde_json::to_value(ChatMessage::assistant("hi")).unwrap();
        assert_eq!(value, json!({ "role": "assistant", "content": "hi" }));
    }

    #[test]
    fn test_inbound_chat_tolerates_missing_fields() {
        let inbound: InboundChat = serde_json::from_value(json!({})).unwrap();
        assert!(inbound.message.is_none());
        assert!(inbound.history.is_none());

        let inbound: InboundChat =
            serde_json::from_value(json!({ "message": 5, "history": "nope" })).unwrap();
        assert_eq!(inbound.message, Some(json!(5)));
        assert_eq!(inbound.history, Some(json!("nope")));
    }
}
