//! Core domain types, ports and pipeline for chatrelay.
//!
//! The relay validates an inbound chat message, windows the caller's
//! history, forwards an OpenAI-compatible completion request through the
//! [`CompletionBackend`] port and turns the outcome into either a
//! [`ChatReply`] or a [`ClassifiedError`].
//!
//! This crate has no HTTP server or client dependencies; adapters live in
//! `chatrelay-backend` and `chatrelay-axum`.

#![deny(unused_crate_dependencies)]

pub mod config;
pub mod domain;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use config::{ConfigError, Environment, RelayConfig};
pub use domain::{
    ChatMessage, ChatReply, CompletionRequest, ConversationWindow, ExtractedCompletion,
    InboundChat, MessageRole, ProbeReport,
};
pub use error::{ClassifiedError, ErrorCategory, RelayError};
pub use ports::{CompletionBackend, RawResponse, UnreachableReason, UpstreamError};
pub use services::ChatRelay;

// Silence unused dev-dependency warnings; async tests use tokio directly
#[cfg(test)]
use tokio_test as _;
