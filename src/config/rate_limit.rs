//! Contact form rate limiting configuration.

use super::env_parse;

/// Fixed-window limit applied per tracking key
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub max_requests: usize,
    pub window_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 5,
            window_seconds: 3600,
        }
    }
}

impl RateLimitConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_requests: env_parse("CONTACT_RATE_LIMIT", defaults.max_requests),
            window_seconds: env_parse("CONTACT_RATE_WINDOW_SECONDS", defaults.window_seconds),
        }
    }
}
