//! Command-line and environment options for the relay server.

use chatrelay_axum::{CorsConfig, ServerConfig, bootstrap::DEFAULT_PORT};
use chatrelay_core::{Environment, RelayConfig, config::DEFAULT_BACKEND_URL, config::DEFAULT_MODEL};
use clap::Parser;
use tracing::warn;

/// Stateless chat relay in front of an OpenAI-compatible completion backend.
///
/// Every option can also be supplied through the environment variable shown
/// in `--help`; a `.env` file in the working directory is loaded first.
#[derive(Debug, Parser)]
#[command(name = "chatrelay")]
#[command(about = "Relay chat messages to an OpenAI-compatible completion backend")]
#[command(version)]
pub struct Cli {
    /// Base URL of the completion backend
    #[arg(long = "backend-url", env = "MISTRAL_API_URL", default_value = DEFAULT_BACKEND_URL)]
    pub backend_url: String,

    /// Backend request timeout in milliseconds (0 or invalid falls back to 30000)
    #[arg(long = "timeout", env = "MISTRAL_TIMEOUT")]
    pub timeout: Option<String>,

    /// Model name sent with every completion request
    #[arg(long = "model", env = "MISTRAL_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Port for the HTTP server
    #[arg(short = 'p', long = "port", env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Interface to bind
    #[arg(long = "host", default_value = "0.0.0.0")]
    pub host: String,

    /// Only allow cross-origin requests from this origin
    #[arg(long = "frontend-url", env = "FRONTEND_URL")]
    pub frontend_url: Option<String>,

    /// Deployment environment; `development` adds failure details to 500 responses
    #[arg(long = "env", env = "RELAY_ENV", default_value = "production")]
    pub environment: String,
}

impl Cli {
    /// Timeout in milliseconds; `None` when unset, zero or unparsable.
    pub fn timeout_ms(&self) -> Option<u64> {
        let raw = self.timeout.as_deref()?.trim();
        match raw.parse::<u64>() {
            Ok(0) => None,
            Ok(ms) => Some(ms),
            Err(_) => {
                warn!("Ignoring invalid MISTRAL_TIMEOUT value {raw:?}");
                None
            }
        }
    }

    /// Relay configuration resolved from these options.
    pub fn relay_config(&self) -> RelayConfig {
        let config = RelayConfig::new()
            .with_backend_url(self.backend_url.as_str())
            .with_model(self.model.as_str())
            .with_environment(Environment::parse(&self.environment));

        match self.timeout_ms() {
            Some(ms) => config.with_timeout_ms(ms),
            None => config,
        }
    }

    /// Listener configuration resolved from these options.
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.host.clone(),
            port: self.port,
            cors: CorsConfig::from_origin(self.frontend_url.clone()),
        }
    }
}
