//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where the concrete backend client is
//! wired into the relay for the web adapter.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use chatrelay_backend::{BackendClientConfig, HttpCompletionBackend};
use chatrelay_core::{ChatRelay, CompletionBackend, RelayConfig};
use tokio::net::TcpListener;
use tracing::info;

use crate::metrics::RelayMetrics;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 3001;

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

impl CorsConfig {
    /// Allow only `origin` when given, otherwise everything.
    pub fn from_origin(origin: Option<String>) -> Self {
        match origin {
            Some(origin) if !origin.trim().is_empty() => Self::AllowOrigins(vec![origin]),
            _ => Self::AllowAll,
        }
    }
}

/// Listener configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port for the HTTP server.
    pub port: u16,
    /// CORS configuration.
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Bind on all interfaces at the default port, any origin allowed.
    pub fn with_defaults() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            cors: CorsConfig::default(),
        }
    }

    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Application context for the Axum adapter.
pub struct AxumContext {
    /// The relay service handling chat requests.
    pub relay: ChatRelay,
    /// Aggregate request counters.
    pub metrics: RelayMetrics,
    /// When the server context was created, for uptime reporting.
    pub started_at: Instant,
}

impl AxumContext {
    /// Wrap an already-built relay.
    pub fn new(relay: ChatRelay) -> Self {
        Self {
            relay,
            metrics: RelayMetrics::new(),
            started_at: Instant::now(),
        }
    }

    /// Build a context around any backend implementation.
    pub fn with_backend(backend: Arc<dyn CompletionBackend>, config: RelayConfig) -> Self {
        Self::new(ChatRelay::new(backend, Arc::new(config)))
    }
}

/// Validate configuration and wire the HTTP backend into a relay.
pub fn bootstrap(config: RelayConfig) -> Result<AxumContext> {
    config.validate().context("Invalid relay configuration")?;

    info!(
        target: "chatrelay.config",
        backend_url = %config.backend_url,
        timeout_ms = config.timeout_ms(),
        model = %config.model,
        environment = config.environment.as_str(),
        "Axum bootstrap resolved configuration"
    );

    let backend = HttpCompletionBackend::new(&BackendClientConfig::new(&config.backend_url))?;

    Ok(AxumContext::with_backend(Arc::new(backend), config))
}

/// Serve the relay until `shutdown` resolves.
pub async fn start_server<F>(config: ServerConfig, ctx: AxumContext, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let backend_url = ctx.relay.config().backend_url.clone();
    let app = crate::routes::create_router(ctx, &config.cors);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("chatrelay listening on http://{}", listener.local_addr()?);
    info!("Completion backend: {backend_url}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("chatrelay shut down");
    Ok(())
}
