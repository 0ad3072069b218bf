//! Logging configuration.

use super::server::RuntimeEnvironment;
use std::env;

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Directive used when `RUST_LOG` is unset
    pub default_directive: String,
    pub format: LogFormat,
    pub service_name: String,
    pub environment: RuntimeEnvironment,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_directive: "info".to_string(),
            format: LogFormat::Pretty,
            service_name: env!("CARGO_PKG_NAME").to_string(),
            environment: RuntimeEnvironment::Development,
        }
    }
}

impl LoggingConfig {
    /// JSON lines in production or when `LOG_FORMAT=json`, pretty text otherwise.
    pub fn from_env() -> Self {
        let environment = env::var("NODE_ENV")
            .map(|v| RuntimeEnvironment::parse(&v))
            .unwrap_or(RuntimeEnvironment::Development);

        let format = match env::var("LOG_FORMAT").map(|v| v.to_lowercase()) {
            Ok(v) if v == "json" => LogFormat::Json,
            Ok(v) if v == "pretty" || v == "text" => LogFormat::Pretty,
            _ if environment.is_production() => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Self {
            default_directive: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format,
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| env!("CARGO_PKG_NAME").to_string()),
            environment,
        }
    }
}
