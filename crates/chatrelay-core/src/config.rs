//! Relay configuration.
//!
//! `RelayConfig` is built once at startup and shared read-only by every
//! request. Nothing in the pipeline reads the process environment.

use std::time::Duration;

use thiserror::Error;

/// Default backend base URL.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:1234";

/// Default backend timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default model identifier sent upstream.
pub const DEFAULT_MODEL: &str = "mistral";

/// Default maximum inbound message length, in characters.
pub const DEFAULT_MAX_MESSAGE_LENGTH: usize = 10_000;

/// Default number of prior turns forwarded upstream.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Production,
    Development,
}

impl Environment {
    /// Parse an environment name. Unknown names are treated as production.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("development") {
            Self::Development
        } else {
            Self::Production
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
        }
    }

    /// Whether raw failure detail may be included in error bodies.
    #[must_use]
    pub const fn exposes_diagnostics(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Backend URL must start with http:// or https://, got '{0}'")]
    InvalidBackendUrl(String),

    #[error("Backend timeout must be greater than zero")]
    ZeroTimeout,

    #[error("Model identifier cannot be empty")]
    EmptyModel,

    #[error("Max message length must be greater than zero")]
    ZeroMessageLength,
}

/// Process-wide relay configuration.
///
/// # Example
///
/// ```
/// use chatrelay_core::RelayConfig;
/// use std::time::Duration;
///
/// let config = RelayConfig::new()
///     .with_backend_url("http://localhost:8080/")
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.backend_url, "http://localhost:8080");
/// assert_eq!(config.timeout_ms(), 5000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// Backend base URL, without trailing slash.
    pub backend_url: String,
    /// Upper bound on a single backend call.
    pub timeout: Duration,
    /// Model identifier sent upstream and used when the backend omits one.
    pub model: String,
    /// Maximum untrimmed message length, in characters.
    pub max_message_length: usize,
    /// Maximum number of prior turns forwarded.
    pub history_limit: usize,
    pub environment: Environment,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            model: DEFAULT_MODEL.to_string(),
            max_message_length: DEFAULT_MAX_MESSAGE_LENGTH,
            history_limit: DEFAULT_HISTORY_LIMIT,
            environment: Environment::default(),
        }
    }
}

impl RelayConfig {
    /// Create a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend base URL. A trailing slash is stripped.
    #[must_use]
    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.backend_url = url.trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the timeout from milliseconds; zero falls back to the default.
    #[must_use]
    pub const fn with_timeout_ms(mut self, millis: u64) -> Self {
        let millis = if millis == 0 { DEFAULT_TIMEOUT_MS } else { millis };
        self.timeout = Duration::from_millis(millis);
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub const fn with_max_message_length(mut self, max: usize) -> Self {
        self.max_message_length = max;
        self
    }

    #[must_use]
    pub const fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    #[must_use]
    pub const fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Timeout in whole milliseconds, as echoed to clients.
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }

    /// Full URL of the backend's completion endpoint.
    #[must_use]
    pub fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.backend_url)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.backend_url.starts_with("http://") || self.backend_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBackendUrl(self.backend_url.clone()));
        }

        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }

        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }

        if self.max_message_length == 0 {
            return Err(ConfigError::ZeroMessageLength);
        }

        Ok(())
    }
}
