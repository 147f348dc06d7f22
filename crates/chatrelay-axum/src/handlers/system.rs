//! Service-level endpoints: index, health, metrics and the 404 fallback.

use axum::Json;
use axum::extract::State;
use axum::http::{Uri, header};
use axum::response::IntoResponse;
use serde_json::{Value, json};

use crate::dto::HealthResponse;
use crate::error::HttpError;
use crate::state::AppState;

/// GET /
pub async fn index() -> Json<Value> {
    Json(json!({
        "message": "Chat Relay Backend API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health",
            "chat": "/chat"
        }
    }))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let config = state.relay.config();
    Json(HealthResponse {
        status: "ok",
        timestamp: chrono::Utc::now().to_rfc3339(),
        uptime: state.started_at.elapsed().as_secs_f64(),
        environment: config.environment.as_str(),
        mistral_endpoint: config.backend_url.clone(),
    })
}

/// GET /metrics
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        state.metrics.render(),
    )
}

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> HttpError {
    HttpError::NotFound(uri.path().to_string())
}
