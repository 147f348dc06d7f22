//! Axum-specific error types and mappings.
//!
//! Relay failures arrive already classified; this module only turns them
//! into HTTP responses. Panics escaping a handler are rendered as the
//! `Internal` category.

use std::any::Any;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chatrelay_core::{ClassifiedError, Environment, RelayError};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// A classified relay failure, rendered as `{ error, message, type, ... }`.
    #[error("{}", .0.message)]
    Relay(ClassifiedError),

    /// No route matched.
    #[error("Route {0} not found")]
    NotFound(String),
}

impl From<ClassifiedError> for HttpError {
    fn from(err: ClassifiedError) -> Self {
        Self::Relay(err)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        match self {
            Self::Relay(classified) => {
                let status = StatusCode::from_u16(classified.status)
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, Json(classified.to_body())).into_response()
            }
            Self::NotFound(path) => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "Not Found",
                    "message": format!("Route {path} not found"),
                })),
            )
                .into_response(),
        }
    }
}

/// Render a panic caught while serving a request as a 500 `Internal` error.
pub fn panic_response(environment: Environment, payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("handler panicked");
    error!("Request handler panicked: {detail}");

    HttpError::Relay(RelayError::Internal(detail.to_string()).classify(environment)).into_response()
}
