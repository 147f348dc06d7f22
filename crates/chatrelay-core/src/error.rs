//! Relay failure taxonomy and client-facing classification.
//!
//! Every way a chat request can fail ends up as a [`RelayError`]. The
//! classifier turns it into a [`ClassifiedError`]: a fixed HTTP status,
//! error label, message and context that adapters render verbatim.

use serde_json::{Map, Value, json};
use thiserror::Error;

use crate::config::Environment;
use crate::ports::UnreachableReason;

/// Stable failure categories exposed to clients in the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    InvalidMessageType,
    EmptyMessage,
    MessageTooLong,
    BackendUnreachable,
    BackendTimeout,
    BackendApplicationError,
    NoChoicesReturned,
    EmptyCompletion,
    Internal,
}

impl ErrorCategory {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidMessageType => "InvalidMessageType",
            Self::EmptyMessage => "EmptyMessage",
            Self::MessageTooLong => "MessageTooLong",
            Self::BackendUnreachable => "BackendUnreachable",
            Self::BackendTimeout => "BackendTimeout",
            Self::BackendApplicationError => "BackendApplicationError",
            Self::NoChoicesReturned => "NoChoicesReturned",
            Self::EmptyCompletion => "EmptyCompletion",
            Self::Internal => "Internal",
        }
    }

    /// Returns true for failures detected before any upstream call.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidMessageType | Self::EmptyMessage | Self::MessageTooLong
        )
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures raised by the relay pipeline.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RelayError {
    #[error("Message is required and must be a string")]
    InvalidMessageType,

    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("Message is too long (max {max} characters)")]
    MessageTooLong { max: usize, actual: usize },

    #[error("Backend unreachable at {endpoint}: {detail}")]
    BackendUnreachable {
        reason: UnreachableReason,
        endpoint: String,
        detail: String,
    },

    #[error("Backend request timed out after {timeout_ms}ms")]
    BackendTimeout { timeout_ms: u64 },

    #[error("Backend returned status {status}: {message}")]
    BackendApplicationError { status: u16, message: String },

    #[error("No response choices received from the completion backend")]
    NoChoicesReturned,

    #[error("Empty response received from the completion backend")]
    EmptyCompletion,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RelayError {
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidMessageType => ErrorCategory::InvalidMessageType,
            Self::EmptyMessage => ErrorCategory::EmptyMessage,
            Self::MessageTooLong { .. } => ErrorCategory::MessageTooLong,
            Self::BackendUnreachable { .. } => ErrorCategory::BackendUnreachable,
            Self::BackendTimeout { .. } => ErrorCategory::BackendTimeout,
            Self::BackendApplicationError { .. } => ErrorCategory::BackendApplicationError,
            Self::NoChoicesReturned => ErrorCategory::NoChoicesReturned,
            Self::EmptyCompletion => ErrorCategory::EmptyCompletion,
            Self::Internal(_) => ErrorCategory::Internal,
        }
    }

    /// HTTP status reported to the client.
    ///
    /// Backend application errors keep the backend's status only when it is
    /// a client error (4xx); everything else becomes 500.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidMessageType | Self::EmptyMessage | Self::MessageTooLong { .. } => 400,
            Self::BackendUnreachable { .. } => 503,
            Self::BackendTimeout { .. } => 504,
            Self::BackendApplicationError { status, .. } => {
                if *status >= 400 && *status < 500 {
                    *status
                } else {
                    500
                }
            }
            Self::NoChoicesReturned | Self::EmptyCompletion | Self::Internal(_) => 500,
        }
    }

    /// Map this failure to its client-facing shape.
    ///
    /// Raw failure text is attached as `details` for 500-class internal
    /// failures only when `environment` exposes diagnostics.
    #[must_use]
    pub fn classify(&self, environment: Environment) -> ClassifiedError {
        let category = self.category();
        let status = self.status_code();
        let mut context = Map::new();

        let (label, message) = match self {
            Self::InvalidMessageType | Self::EmptyMessage | Self::MessageTooLong { .. } => {
                ("Invalid request", self.to_string())
            }
            Self::BackendUnreachable {
                reason, endpoint, ..
            } => {
                let (message, details) = match reason {
                    UnreachableReason::ConnectionRefused => (
                        "Cannot connect to the completion backend. Please ensure it is running and accessible.",
                        format!("Attempted to connect to: {endpoint}"),
                    ),
                    UnreachableReason::NameResolution => (
                        "Completion backend endpoint not found. Please check the configuration.",
                        format!("Endpoint: {endpoint}"),
                    ),
                    UnreachableReason::Other => (
                        "Failed to reach the completion backend. Please try again.",
                        format!("Attempted to connect to: {endpoint}"),
                    ),
                };
                context.insert("details".to_string(), Value::String(details));
                ("Service Unavailable", message.to_string())
            }
            Self::BackendTimeout { timeout_ms } => {
                context.insert("timeout".to_string(), json!(timeout_ms));
                (
                    "Gateway Timeout",
                    "Completion backend request timed out. Please try again.".to_string(),
                )
            }
            Self::BackendApplicationError {
                status: upstream,
                message,
            } => {
                context.insert("status".to_string(), json!(upstream));
                ("Backend API Error", message.clone())
            }
            Self::NoChoicesReturned | Self::EmptyCompletion => {
                ("Internal Server Error", self.to_string())
            }
            Self::Internal(_) => (
                "Internal Server Error",
                "An unexpected error occurred while processing your request.".to_string(),
            ),
        };

        if status == 500
            && matches!(
                category,
                ErrorCategory::NoChoicesReturned
                    | ErrorCategory::EmptyCompletion
                    | ErrorCategory::Internal
            )
            && environment.exposes_diagnostics()
        {
            context.insert("details".to_string(), Value::String(self.to_string()));
        }

        ClassifiedError {
            status,
            category,
            label,
            message,
            context,
        }
    }
}

/// A failure mapped to its fixed client-facing rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedError {
    /// HTTP status code.
    pub status: u16,
    pub category: ErrorCategory,
    /// Short label rendered as the `error` field.
    pub label: &'static str,
    /// Human-readable message.
    pub message: String,
    /// Category-specific extra fields (`details`, `timeout`, `status`).
    pub context: Map<String, Value>,
}

impl ClassifiedError {
    /// Render as `{ error, message, type, ...context }`.
    #[must_use]
    pub fn to_body(&self) -> Value {
        let mut body = Map::new();
        body.insert("error".to_string(), Value::String(self.label.to_string()));
        body.insert("message".to_string(), Value::String(self.message.clone()));
        body.insert(
            "type".to_string(),
            Value::String(self.category.as_str().to_string()),
        );
        for (key, value) in &self.context {
            body.insert(key.clone(), value.clone());
        }
        Value::Object(body)
    }
}
