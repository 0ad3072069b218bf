//! Configuration for the backend proxy fetcher
//!
//! Timeouts are expressed in milliseconds because the PDF routes need a much
//! longer deadline than ordinary JSON reads.

use super::env_parse;
use std::{env, time::Duration};

/// Default deadline for JSON reads and writes against the content backend.
pub const DEFAULT_PROXY_TIMEOUT_MS: u64 = 8_000;

/// Deadline for portfolio PDF generation and download.
pub const DEFAULT_PDF_TIMEOUT_MS: u64 = 65_000;

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Origin of the content backend, e.g. `http://backend:3001`
    pub backend_url: String,

    /// Origin the JSON API client prefixes with `/api`
    pub internal_api_origin: String,

    pub default_timeout_ms: u64,
    pub pdf_timeout_ms: u64,
    pub connect_timeout_ms: u64,

    /// Extra attempts for GET requests that fail before a response arrives
    pub get_retries: usize,
    pub retry_initial_delay_ms: u64,
    pub retry_max_delay_ms: u64,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:3001".to_string(),
            internal_api_origin: "http://127.0.0.1:3000".to_string(),
            default_timeout_ms: DEFAULT_PROXY_TIMEOUT_MS,
            pdf_timeout_ms: DEFAULT_PDF_TIMEOUT_MS,
            connect_timeout_ms: 3_000,
            get_retries: 1,
            retry_initial_delay_ms: 100,
            retry_max_delay_ms: 1_000,
        }
    }
}

impl ProxyConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend_url: env::var("BACKEND_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .unwrap_or(defaults.backend_url),
            internal_api_origin: env::var("INTERNAL_API_ORIGIN")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .unwrap_or(defaults.internal_api_origin),
            default_timeout_ms: env_parse("PROXY_TIMEOUT_MS", defaults.default_timeout_ms),
            pdf_timeout_ms: env_parse("PDF_TIMEOUT_MS", defaults.pdf_timeout_ms),
            connect_timeout_ms: env_parse("PROXY_CONNECT_TIMEOUT_MS", defaults.connect_timeout_ms),
            get_retries: env_parse("PROXY_GET_RETRIES", defaults.get_retries),
            retry_initial_delay_ms: env_parse(
                "PROXY_RETRY_INITIAL_DELAY_MS",
                defaults.retry_initial_delay_ms,
            ),
            retry_max_delay_ms: env_parse("PROXY_RETRY_MAX_DELAY_MS", defaults.retry_max_delay_ms),
        }
    }

    /// Builder-style override used by tests and embedders.
    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = url.into();
        self
    }

    pub fn with_internal_api_origin(mut self, origin: impl Into<String>) -> Self {
        self.internal_api_origin = origin.into();
        self
    }

    pub fn default_timeout(&self) -> Duration {
        Duration::from_millis(self.default_timeout_ms)
    }

    pub fn pdf_timeout(&self) -> Duration {
        Duration::from_millis(self.pdf_timeout_ms)
    }
}
