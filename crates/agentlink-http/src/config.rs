//! Transport settings

use std::time::Duration;

use serde::{Deserialize, Serialize};

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Settings for the underlying `reqwest` client
///
/// Timeouts are whole seconds so the block can be written directly in
/// provider settings files.
///
/// ```
/// use std::time::Duration;
/// use agentlink_http::HttpConfig;
///
/// let config = HttpConfig::new()
///     .with_timeout_secs(5)
///     .with_user_agent("agentlink-tests");
/// assert_eq!(config.timeout(), Duration::from_secs(5));
/// assert_eq!(config.connect_timeout(), Duration::from_secs(10));
/// assert_eq!(config.user_agent, "agentlink-tests");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// TCP/TLS connect timeout in seconds
    pub connect_timeout_secs: u64,
    /// HTTP/HTTPS proxy for every request
    pub proxy: Option<String>,
    /// `User-Agent` header sent on every request
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            proxy: None,
            user_agent: format!("terraform-provider-agentlink/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpConfig {
    /// Same as [`HttpConfig::default`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the whole-request timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Route requests through a proxy
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Override the `User-Agent` header
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Connect timeout as a [`Duration`]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HttpConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
        assert!(config.proxy.is_none());
        assert!(config.user_agent.starts_with("terraform-provider-agentlink/"));
    }

    #[test]
    fn test_partial_settings_keep_defaults() {
        let config: HttpConfig =
            serde_json::from_str(r#"{"timeout_secs": 5, "proxy": "http://proxy.internal:3128"}"#)
                .unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.connect_timeout_secs, 10);
        assert_eq!(config.proxy.as_deref(), Some("http://proxy.internal:3128"));
    }
}
