//! Public configuration for the backend HTTP client.

/// Configuration for [`crate::HttpCompletionBackend`].
///
/// The per-call timeout is not part of this config: it is passed on every
/// call by the relay, which owns it.
///
/// # Example
///
/// ```
/// use chatrelay_backend::BackendClientConfig;
///
/// let config = BackendClientConfig::new("http://127.0.0.1:1234/")
///     .with_user_agent("my-relay/1.0");
/// assert_eq!(config.base_url(), "http://127.0.0.1:1234");
/// ```
#[derive(Debug, Clone)]
pub struct BackendClientConfig {
    pub(crate) base_url: String,
    pub(crate) user_agent: String,
    pub(crate) pool_max_idle_per_host: usize,
    pub(crate) use_system_proxy: bool,
}

impl BackendClientConfig {
    /// Create a configuration for the backend at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent: concat!("chatrelay/", env!("CARGO_PKG_VERSION")).to_string(),
            pool_max_idle_per_host: 10,
            use_system_proxy: true,
        }
    }

    /// Backend base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Maximum idle pooled connections kept to the backend host.
    #[must_use]
    pub const fn with_pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Ignore `HTTP_PROXY`/`HTTPS_PROXY` and connect directly.
    #[must_use]
    pub const fn without_proxy(mut self) -> Self {
        self.use_system_proxy = false;
        self
    }

    pub(crate) fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BackendClientConfig::new("http://127.0.0.1:1234");
        assert!(config.user_agent.starts_with("chatrelay/"));
        assert_eq!(config.pool_max_idle_per_host, 10);
        assert!(config.use_system_proxy);
    }

    #[test]
    fn test_completions_url() {
        let config = BackendClientConfig::new("http://llm:8000///");
        assert_eq!(config.completions_url(), "http://llm:8000/v1/chat/completions");
    }

    #[test]
    fn test_builder() {
        let config = BackendClientConfig::new("http://x")
            .with_user_agent("agent")
            .with_pool_max_idle_per_host(2)
            .without_proxy();
        assert_eq!(config.user_agent, "agent");
        assert_eq!(config.pool_max_idle_per_host, 2);
        assert!(!config.use_system_proxy);
    }
}
