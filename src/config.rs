//! Service configuration and tracing setup.
//!
//! The extraction backend needs exactly two external settings — the
//! service endpoint URL and an API key. Absence of either is fatal at
//! construction time, not recoverable downstream.

use std::time::Duration;

use tracing_subscriber::EnvFilter;

use crate::pipeline::extraction::ExtractionError;

pub const APP_NAME: &str = "taxintake";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const ENDPOINT_ENV: &str = "TAXINTAKE_ENDPOINT";
pub const API_KEY_ENV: &str = "TAXINTAKE_API_KEY";

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub endpoint: String,
    pub api_key: String,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
}

impl ServiceConfig {
    pub fn new(endpoint: &str, api_key: &str) -> Result<Self, ExtractionError> {
        if endpoint.trim().is_empty() {
            return Err(ExtractionError::ConfigurationMissing(ENDPOINT_ENV));
        }
        if api_key.trim().is_empty() {
            return Err(ExtractionError::ConfigurationMissing(API_KEY_ENV));
        }
        Ok(Self {
            endpoint: endpoint.trim().to_string(),
            api_key: api_key.trim().to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    /// Read the two required settings from the environment.
    pub fn from_env() -> Result<Self, ExtractionError> {
        let endpoint = std::env::var(ENDPOINT_ENV)
            .map_err(|_| ExtractionError::ConfigurationMissing(ENDPOINT_ENV))?;
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| ExtractionError::ConfigurationMissing(API_KEY_ENV))?;
        Self::new(&endpoint, &api_key)
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Install the global tracing subscriber, honoring `RUST_LOG`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("taxintake=info")),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_settings_construct() {
        let config = ServiceConfig::new("https://di.example.com", "secret").unwrap();
        assert_eq!(config.endpoint, "https://di.example.com");
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.poll_interval, DEFAULT_POLL_INTERVAL);
    }

    #[test]
    fn missing_endpoint_is_fatal() {
        let err = ServiceConfig::new("", "secret").unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::ConfigurationMissing(ENDPOINT_ENV)
        ));
    }

    #[test]
    fn missing_api_key_is_fatal() {
        let err = ServiceConfig::new("https://di.example.com", "  ").unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::ConfigurationMissing(API_KEY_ENV)
        ));
    }

    #[test]
    fn builder_overrides_timing() {
        let config = ServiceConfig::new("https://di.example.com", "secret")
            .unwrap()
            .with_poll_interval(Duration::from_millis(50))
            .with_request_timeout(Duration::from_secs(5));
        assert_eq!(config.poll_interval, Duration::from_millis(50));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }
}
