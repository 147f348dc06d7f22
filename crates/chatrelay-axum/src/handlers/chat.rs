//! Chat handlers: relay, connectivity probe and configuration.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chatrelay_core::InboundChat;
use tracing::{debug, error};

use crate::dto::{ChatResponse, ConfigResponse, ProbeFailure, ProbeSuccess};
use crate::error::HttpError;
use crate::metrics::ChatOutcome;
use crate::state::AppState;

/// Relay one chat message to the completion backend.
///
/// POST /chat
///
/// The body is parsed leniently: anything that is not a JSON object is
/// treated as a request without a message and rejected by validation.
pub async fn send(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ChatResponse>, HttpError> {
    let inbound = parse_inbound(&body);

    match state.relay.handle_chat(&inbound).await {
        Ok(reply) => {
            state.metrics.record_chat(ChatOutcome::Success);
            Ok(Json(ChatResponse::from(reply)))
        }
        Err(classified) => {
            state.metrics.record_chat(ChatOutcome::Error);
            Err(HttpError::Relay(classified))
        }
    }
}

/// Send a canned completion to check the backend is reachable.
///
/// GET /chat/test
pub async fn test_connection(State(state): State<AppState>) -> Response {
    let endpoint = state.relay.config().backend_url.clone();

    match state.relay.probe().await {
        Ok(report) => Json(ProbeSuccess::new(&endpoint, report)).into_response(),
        Err(e) => {
            error!("Completion backend test failed: {e}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ProbeFailure::new(&endpoint, &e)),
            )
                .into_response()
        }
    }
}

/// Report the relay's operating configuration.
///
/// GET /chat/config
pub async fn config(State(state): State<AppState>) -> Json<ConfigResponse> {
    Json(ConfigResponse::from(state.relay.config()))
}

fn parse_inbound(body: &[u8]) -> InboundChat {
    serde_json::from_slice(body).unwrap_or_else(|e| {
        debug!("Unparsable chat request body: {e}");
        InboundChat::default()
    })
}
