//! Client configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::error::ConfigError;

/// Default backend origin.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings shared by the transport and the session.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend origin without a trailing slash (e.g., "http://localhost:8080").
    pub base_url: String,
    /// Bearer token to start the session with, if any.
    pub token: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Path to POST to when revoking a credential on logout.
    pub logout_path: Option<String>,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            logout_path: None,
            user_agent: format!("larder/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `LARDER_API_URL`: backend origin (default: "http://localhost:8080")
    /// - `LARDER_API_TOKEN`: initial bearer token
    /// - `LARDER_HTTP_TIMEOUT_SECS`: request timeout (default: 30)
    /// - `LARDER_LOGOUT_PATH`: endpoint that revokes the token on logout
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(url) = env::var("LARDER_API_URL") {
            config = config.with_base_url(&url)?;
        }

        config.token = env::var("LARDER_API_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        if let Ok(raw) = env::var("LARDER_HTTP_TIMEOUT_SECS") {
            let secs: u64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                name: "LARDER_HTTP_TIMEOUT_SECS".to_string(),
                reason: format!("expected a whole number of seconds, got {:?}", raw),
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        config.logout_path = env::var("LARDER_LOGOUT_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty());

        Ok(config)
    }

    /// Set the backend origin. The value must be an absolute http(s) URL.
    pub fn with_base_url(mut self, url: &str) -> Result<Self, ConfigError> {
        let parsed = url::Url::parse(url).map_err(|e| ConfigError::InvalidValue {
            name: "base_url".to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                name: "base_url".to_string(),
                reason: format!("unsupported scheme {:?}", parsed.scheme()),
            });
        }
        self.base_url = url.trim_end_matches('/').to_string();
        Ok(self)
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_logout_path(mut self, path: Option<String>) -> Self {
        self.logout_path = path;
        self
    }
}
