//! Shared application state type.

use crate::bootstrap::AxumContext;
use std::sync::Arc;

/// Application state shared across all handlers.
///
/// An Arc-wrapped `AxumContext`: the relay, its metrics and start time.
pub type AppState = Arc<AxumContext>;
