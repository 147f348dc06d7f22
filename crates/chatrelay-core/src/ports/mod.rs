//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from
//! infrastructure. They contain no implementation details and use only
//! domain types.

pub mod completion_backend;

pub use completion_backend::{CompletionBackend, RawResponse, UnreachableReason, UpstreamError};

#[cfg(test)]
pub use completion_backend::MockCompletionBackend;
