//! # Client Configuration
//!
//! Base URL and timeout for the backend connection.
//!
//! Follows the env-overlay convention: explicit values win, then environment
//! variables, then the development default.

use std::time::Duration;

use url::Url;

use crate::error::{ClientError, ClientResult};

/// Environment variable holding the backend base URL.
pub const API_URL_ENV: &str = "MERCATO_API_URL";

/// Development default: the Django backend on localhost.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Per-request timeout. A stuck request must release the cashier quickly;
/// there is no retry behind it.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Configuration for the sales backend connection.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, normalized without a trailing slash.
    base_url: String,

    /// Per-request timeout.
    timeout: Duration,
}

impl ClientConfig {
    /// Creates a config from an explicit base URL.
    pub fn new(base_url: &str) -> ClientResult<Self> {
        // Parse for validation only; requests are built by simple joining
        let parsed = Url::parse(base_url)
            .map_err(|e| ClientError::validation("config", format!("invalid base URL: {}", e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::validation(
                "config",
                format!("unsupported URL scheme: {}", parsed.scheme()),
            ));
        }

        Ok(ClientConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        })
    }

    /// Creates a config from the provided URL, the `MERCATO_API_URL`
    /// environment variable, or the development default - in that order.
    pub fn from_env_or(base_url: Option<String>) -> ClientResult<Self> {
        let url = base_url
            .or_else(|| std::env::var(API_URL_ENV).ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self::new(&url)
    }

    /// The normalized base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds a full endpoint URL. `path` must start with `/`.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// The per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_normalized() {
        let config = ClientConfig::new("http://localhost:8000/").unwrap();
        assert_eq!(config.base_url(), "http://localhost:8000");
        assert_eq!(config.endpoint("/products/"), "http://localhost:8000/products/");
    }

    #[test]
    fn test_rejects_invalid_url() {
        assert!(ClientConfig::new("not a url").is_err());
        assert!(ClientConfig::new("ftp://example.com").is_err());
    }

    #[test]
    fn test_explicit_url_wins() {
        let config =
            ClientConfig::from_env_or(Some("http://pos.example.com".to_string())).unwrap();
        assert_eq!(config.base_url(), "http://pos.example.com");
    }
}
