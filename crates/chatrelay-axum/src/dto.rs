//! Response bodies for the HTTP API.
//!
//! Field names follow the chat client's camelCase contract.

use chatrelay_core::{ChatReply, ProbeReport, RelayConfig, RelayError};
use serde::Serialize;

/// Placeholder reported by the probe when the backend sent no content.
pub const NO_PROBE_CONTENT: &str = "No content received";

/// `POST /chat` success body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub response: String,
    pub model: String,
    /// Serialized as `null` when the backend reported no usage.
    pub usage: Option<serde_json::Value>,
    pub response_time: u64,
}

impl From<ChatReply> for ChatResponse {
    fn from(reply: ChatReply) -> Self {
        let response_time = reply.latency_ms();
        Self {
            response: reply.text,
            model: reply.model,
            usage: reply.usage,
            response_time,
        }
    }
}

/// `GET /chat/test` success body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeSuccess {
    pub status: &'static str,
    pub message: &'static str,
    pub endpoint: String,
    pub response_time: u64,
    pub test_response: String,
}

impl ProbeSuccess {
    pub fn new(endpoint: &str, report: ProbeReport) -> Self {
        Self {
            status: "success",
            message: "Completion backend is accessible",
            endpoint: endpoint.to_string(),
            response_time: report.latency_ms(),
            test_response: report
                .content
                .unwrap_or_else(|| NO_PROBE_CONTENT.to_string()),
        }
    }
}

/// `GET /chat/test` failure body.
#[derive(Debug, Serialize)]
pub struct ProbeFailure {
    pub status: &'static str,
    pub message: &'static str,
    pub endpoint: String,
    pub error: String,
    pub code: &'static str,
}

impl ProbeFailure {
    pub fn new(endpoint: &str, err: &RelayError) -> Self {
        Self {
            status: "error",
            message: "Cannot connect to the completion backend",
            endpoint: endpoint.to_string(),
            error: err.to_string(),
            code: err.category().as_str(),
        }
    }
}

/// `GET /chat/config` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub mistral_endpoint: String,
    pub timeout: u64,
    pub max_message_length: usize,
    pub history_limit: usize,
    pub status: &'static str,
}

impl From<&RelayConfig> for ConfigResponse {
    fn from(config: &RelayConfig) -> Self {
        Self {
            mistral_endpoint: config.backend_url.clone(),
            timeout: config.timeout_ms(),
            max_message_length: config.max_message_length,
            history_limit: config.history_limit,
            status: "active",
        }
    }
}

/// `GET /health` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    /// Seconds since the server started.
    pub uptime: f64,
    pub environment: &'static str,
    pub mistral_endpoint: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn test_chat_response_shape() {
        let reply = ChatReply {
            text: "Hi there!".to_string(),
            model: "mistral-7b".to_string(),
            usage: None,
            latency: Duration::from_millis(42),
        };
        let value = serde_json::to_value(ChatResponse::from(reply)).unwrap();
        assert_eq!(
            value,
            json!({
                "response": "Hi there!",
                "model": "mistral-7b",
                "usage": null,
                "responseTime": 42
            })
        );
    }

    #[test]
    fn test_config_response_shape() {
        let value = serde_json::to_value(ConfigResponse::from(&RelayConfig::new())).unwrap();
        assert_eq!(
            value,
            json!({
                "mistralEndpoint": "http://127.0.0.1:1234",
                "timeout": 30000,
                "maxMessageLength": 10000,
                "historyLimit": 10,
                "status": "active"
            })
        );
    }

    #[test]
    fn test_probe_success_falls_back_when_empty() {
        let report = ProbeReport {
            latency: Duration::from_millis(5),
            content: None,
        };
        let body = ProbeSuccess::new("http://x", report);
        assert_eq!(body.test_response, NO_PROBE_CONTENT);
        assert_eq!(body.response_time, 5);
    }
}
