//! Shared helpers for chatrelay-axum integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chatrelay_axum::{AxumContext, CorsConfig, create_router};
use chatrelay_core::{
    CompletionBackend, CompletionRequest, RawResponse, RelayConfig, UpstreamError,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

/// Backend double that replays one canned outcome and records requests.
pub struct ScriptedBackend {
    outcome: Result<RawResponse, UpstreamError>,
    calls: AtomicUsize,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl ScriptedBackend {
    pub fn replying(body: Value) -> Arc<Self> {
        Self::with_outcome(Ok(RawResponse::new(body)))
    }

    pub fn failing(err: UpstreamError) -> Arc<Self> {
        Self::with_outcome(Err(err))
    }

    fn with_outcome(outcome: Result<RawResponse, UpstreamError>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn attempt_call(
        &self,
        request: &CompletionRequest,
        _timeout: Duration,
    ) -> Result<RawResponse, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        self.outcome.clone()
    }
}

/// Backend double whose every call panics.
pub struct PanickingBackend;

#[async_trait]
impl CompletionBackend for PanickingBackend {
    async fn attempt_call(
        &self,
        _request: &CompletionRequest,
        _timeout: Duration,
    ) -> Result<RawResponse, UpstreamError> {
        panic!("backend adapter bug");
    }
}

/// Router backed by any backend with `config`.
pub fn router_for(backend: Arc<dyn CompletionBackend>, config: RelayConfig) -> Router {
    let ctx = AxumContext::with_backend(backend, config);
    create_router(ctx, &CorsConfig::AllowAll)
}

/// Router backed by `backend` with `config`.
pub fn app_with(backend: Arc<ScriptedBackend>, config: RelayConfig) -> Router {
    router_for(backend, config)
}

/// Router backed by `backend` with default configuration.
pub fn app(backend: Arc<ScriptedBackend>) -> Router {
    app_with(backend, RelayConfig::new())
}

/// POST a raw body to `/chat`.
pub fn chat_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/chat")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Send one request and decode the JSON response body.
pub async fn send_json(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
