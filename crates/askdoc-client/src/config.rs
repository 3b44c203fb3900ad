//! HTTP client configuration.
//!
//! One `ApiConfig` covers both gateways: the backend exposes the upload and
//! question endpoints on the same host, selected by a single base URL.

use std::time::Duration;

use derive_builder::Builder;
use url::Url;

use crate::error::{Error, Result};

/// Environment variable that selects the backend host.
pub const BASE_URL_ENV: &str = "ASKDOC_API_BASE_URL";

/// Configuration for the askdoc HTTP clients.
///
/// Contains the settings shared by the ingestion and query clients,
/// including the backend base URL and request timeouts.
#[derive(Debug, Clone, Builder)]
#[builder(
    name = "ApiConfigBuilder",
    pattern = "owned",
    setter(into, strip_option, prefix = "with"),
    build_fn(validate = "Self::validate_config")
)]
pub struct ApiConfig {
    /// Base URL for the askdoc backend
    #[builder(setter(custom))]
    pub base_url: Url,
    /// Request timeout duration
    #[builder(default = "Duration::from_secs(60)")]
    pub timeout: Duration,
    /// Connection timeout duration
    #[builder(default = "Duration::from_secs(10)")]
    pub connect_timeout: Duration,
    /// User agent string for requests
    #[builder(default = "ApiConfig::default_user_agent()")]
    pub user_agent: String,
}

impl ApiConfig {
    /// Create a new configuration builder
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::default()
    }

    /// Creates a configuration from the environment.
    ///
    /// Reads the backend host from [`BASE_URL_ENV`]; all other settings
    /// keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is unset or does not parse as a URL.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(BASE_URL_ENV)
            .map_err(|_| Error::invalid_config(format!("{BASE_URL_ENV} is not set")))?;

        Self::builder()
            .with_base_url(&base_url)?
            .build()
            .map_err(|e| Error::invalid_config(e.to_string()))
    }

    fn default_user_agent() -> String {
        format!("askdoc-client/{}", env!("CARGO_PKG_VERSION"))
    }
}

impl ApiConfigBuilder {
    /// Set the base URL for the askdoc backend
    pub fn with_base_url(mut self, url: &str) -> Result<Self> {
        self.base_url =
            Some(url.parse().map_err(|e| {
                Error::invalid_config(format!("Invalid base URL '{}': {}", url, e))
            })?);
        Ok(self)
    }

    fn validate_config(&self) -> std::result::Result<(), String> {
        if let Some(timeout) = &self.timeout {
            if timeout.as_secs() == 0 {
                return Err("Timeout must be greater than 0".to_string());
            }
        }

        if let Some(connect_timeout) = &self.connect_timeout {
            if connect_timeout.as_secs() == 0 {
                return Err("Connect timeout must be greater than 0".to_string());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ApiConfig::builder()
            .with_base_url("http://localhost:8000")
            .expect("Valid URL")
            .with_timeout(Duration::from_secs(120))
            .build()
            .expect("Valid config");

        assert_eq!(config.base_url.as_str(), "http://localhost:8000/");
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert!(config.user_agent.contains("askdoc-client"));
    }

    #[test]
    fn test_base_url_is_required() {
        let result = ApiConfig::builder().build();
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_base_url() {
        let result = ApiConfig::builder().with_base_url("not-a-valid-url");
        assert!(result.is_err());
    }

    #[test]
    #[ignore = "requires ASKDOC_API_BASE_URL in the environment or .env"]
    fn test_config_from_env() {
        dotenvy::dotenv().ok();
        let config = ApiConfig::from_env().expect("Config from environment");
        assert!(!config.base_url.as_str().is_empty());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let result = ApiConfig::builder()
            .with_base_url("http://localhost:8000")
            .expect("Valid URL")
            .with_timeout(Duration::from_secs(0))
            .build();

        assert!(result.is_err());
    }
}
