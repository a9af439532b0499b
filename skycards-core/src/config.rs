//! Provider configuration, resolved once at startup

use std::time::Duration;

use thiserror::Error;

/// Environment variable holding the OpenWeather API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Default provider endpoint (without the `/weather` path).
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration problems. These are fatal: nothing is fetched until fixed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("OpenWeather API key is not set (export {API_KEY_ENV} or pass --api-key)")]
    MissingApiKey,

    #[error("invalid provider base URL '{0}'")]
    InvalidBaseUrl(String),
}

/// Everything the fetcher needs to talk to the provider.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    api_key: String,
    base_url: String,
    timeout: Duration,
}

// The key stays out of logs.
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ProviderConfig {
    /// Build a config from an explicit key.
    ///
    /// Blank keys are rejected here so a missing credential surfaces once,
    /// before any request is attempted.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Point at a different endpoint (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = base_url.into();
        let trimmed = base_url.trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(base_url));
        }
        self.base_url = trimmed.to_string();
        Ok(self)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
