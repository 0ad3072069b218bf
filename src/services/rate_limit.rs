//! Fixed-window rate limiting for the contact form.
//!
//! Submissions are tracked by the sender's email address, falling back to
//! the client IP when the body carries none.

use crate::config::RateLimitConfig;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
    time::{Duration, Instant},
};

/// Prefix for keys derived from the request-body email.
pub const EMAIL_KEY_PREFIX: &str = "contact-email:";

/// Prefix for keys derived from the client address.
pub const IP_KEY_PREFIX: &str = "ip:";

/// Message returned with HTTP 429.
pub const RATE_LIMIT_MESSAGE: &str =
    "문의 요청이 너무 많습니다. 1시간 후에 다시 시도해주세요.";

/// Tracking key for a contact submission: the trimmed, lower-cased `email`
/// field when it is a non-empty string, otherwise the client IP.
pub fn contact_tracking_key(body: Option<&Value>, client_ip: &str) -> String {
    body.and_then(|b| b.get("email"))
        .and_then(Value::as_str)
        .map(|email| email.trim().to_lowercase())
        .filter(|email| !email.is_empty())
        .map(|email| format!("{EMAIL_KEY_PREFIX}{email}"))
        .unwrap_or_else(|| format!("{IP_KEY_PREFIX}{client_ip}"))
}

/// Result of a rate limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed { remaining: usize },
    Limited { retry_after: Duration },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed { .. })
    }
}

/// In-memory fixed-window limiter. Keys are stored as SHA-256 digests.
#[derive(Clone)]
pub struct ContactRateLimiter {
    config: RateLimitConfig,
    storage: Arc<Mutex<HashMap<String, (usize, Instant)>>>,
}

impl ContactRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            storage: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    fn window(&self) -> Duration {
        Duration::from_secs(self.config.window_seconds)
    }

    /// Count one attempt against `key` and decide whether it may proceed.
    pub fn check(&self, key: &str) -> RateLimitDecision {
        let hashed = hex::encode(Sha256::digest(key.as_bytes()));
        let window = self.window();
        let now = Instant::now();
        let mut storage = self.storage.lock().unwrap_or_else(PoisonError::into_inner);

        storage.retain(|_, (_, started)| now.duration_since(*started) < window);

        let (count, started) = storage.entry(hashed).or_insert((0, now));
        if *count >= self.config.max_requests {
            return RateLimitDecision::Limited {
                retry_after: window.saturating_sub(now.duration_since(*started)),
            };
        }

        *count += 1;
        RateLimitDecision::Allowed {
            remaining: self.config.max_requests - *count,
        }
    }
}
