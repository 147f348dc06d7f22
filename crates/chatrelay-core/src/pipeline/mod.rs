//! Relay pipeline stages.
//!
//! Each stage is a plain function returning a `Result`; the relay service
//! threads them together with `?` so every exit path is visible:
//!
//! validate → window → build → call backend → extract

pub mod extract;
pub mod history;
pub mod request;
pub mod upstream;
pub mod validation;

pub use extract::{extract_completion, probe_content};
pub use history::window_history;
pub use request::{build_probe_request, build_request};
pub use upstream::{TimedResponse, call_backend, classify_upstream};
pub use validation::validate_message;
