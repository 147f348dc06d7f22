//! Route definitions and router construction.

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::bootstrap::{AxumContext, CorsConfig};
use crate::error::panic_response;
use crate::handlers;
use crate::metrics::track_http;
use crate::state::AppState;

/// Largest accepted request body.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            use axum::http::HeaderValue;
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// Chat endpoints.
fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/chat", post(handlers::chat::send))
        .route("/chat/test", get(handlers::chat::test_connection))
        .route("/chat/config", get(handlers::chat::config))
}

/// Create the main Axum router.
///
/// - `POST /chat`, `GET /chat/test`, `GET /chat/config`
/// - `GET /`, `GET /health`, `GET /metrics`
/// - JSON 404 for everything else
/// - JSON 500 for a panicking handler
pub fn create_router(ctx: AxumContext, cors_config: &CorsConfig) -> Router {
    let environment = ctx.relay.config().environment;
    let state: AppState = Arc::new(ctx);

    Router::new()
        .route("/", get(handlers::system::index))
        .route("/health", get(handlers::system::health))
        .route("/metrics", get(handlers::system::metrics))
        .merge(chat_routes())
        .fallback(handlers::system::not_found)
        .layer(CatchPanicLayer::custom(
            move |payload: Box<dyn std::any::Any + Send + 'static>| {
                panic_response(environment, payload)
            },
        ))
        .layer(middleware::from_fn_with_state(state.clone(), track_http))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(cors_config))
        .with_state(state)
}
