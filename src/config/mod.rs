//! Configuration structures and loading utilities.
//!
//! Every structure here follows the same pattern: a `Default` impl carrying
//! production defaults and a `from_env()` constructor that overrides them from
//! environment variables, ignoring values that fail to parse.

pub mod directus;
pub mod logging;
pub mod metrics;
pub mod monitoring;
pub mod proxy;
pub mod rate_limit;
pub mod server;

pub use directus::*;
pub use logging::*;
pub use metrics::*;
pub use monitoring::*;
pub use proxy::*;
pub use rate_limit::*;
pub use server::*;

use std::{env, str::FromStr};

/// Read `key` from the environment and parse it, falling back to `default`
/// when the variable is unset or malformed.
pub(crate) fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Read a boolean flag; only `true`/`1`/`yes` (any case) count as set.
pub(crate) fn env_flag(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(default)
}

/// Aggregate configuration for the gateway server.
#[derive(Debug, Clone, Default)]
pub struct GatewayConfig {
    pub server: ServerConfig,
    pub proxy: ProxyConfig,
    pub contact_rate_limit: RateLimitConfig,
    pub metrics: MetricsConfig,
    pub logging: LoggingConfig,
}

impl GatewayConfig {
    /// Load every section from the environment
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            proxy: ProxyConfig::from_env(),
            contact_rate_limit: RateLimitConfig::from_env(),
            metrics: MetricsConfig::from_env(),
            logging: LoggingConfig::from_env(),
        }
    }
}
