//! HTTP server and runtime environment configuration.

use super::env_parse;
use std::env;

/// Deployment environment, read from `NODE_ENV` for parity with the frontend
/// deployment tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnvironment {
    Development,
    Production,
    Test,
}

impl RuntimeEnvironment {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "test" => Self::Test,
            _ => Self::Development,
        }
    }

    pub fn is_production(self) -> bool {
        self == Self::Production
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        }
    }
}

/// Configuration for the listening socket
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    pub environment: RuntimeEnvironment,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 3000,
            environment: RuntimeEnvironment::Development,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            port: env_parse("PORT", defaults.port),
            environment: env::var("NODE_ENV")
                .map(|v| RuntimeEnvironment::parse(&v))
                .unwrap_or(defaults.environment),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing() {
        assert_eq!(RuntimeEnvironment::parse("production"), RuntimeEnvironment::Production);
        assert_eq!(RuntimeEnvironment::parse(" Production "), RuntimeEnvironment::Production);
        assert_eq!(RuntimeEnvironment::parse("test"), RuntimeEnvironment::Test);
        assert_eq!(RuntimeEnvironment::parse("staging"), RuntimeEnvironment::Development);
        assert!(!RuntimeEnvironment::parse("").is_production());
    }
}
