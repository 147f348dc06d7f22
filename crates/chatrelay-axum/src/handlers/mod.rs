//! HTTP request handlers for the Axum web server.
//!
//! Handlers are thin wrappers that delegate to `ChatRelay`.

pub mod chat;
pub mod system;
