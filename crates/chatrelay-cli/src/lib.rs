//! Command-line entry point for the chatrelay server.
//!
//! Resolves configuration from flags, environment variables and `.env`,
//! then hands off to the Axum adapter.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use tokio_test as _;

// Used by the main.rs binary
use anyhow as _;
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

pub mod parser;

pub use parser::Cli;
