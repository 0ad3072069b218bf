//! CMS admin API configuration for the slug enforcement job.

use std::env;

/// How the job authenticates against the CMS
#[derive(Clone, PartialEq, Eq)]
pub enum DirectusAuth {
    /// Pre-issued static token (`DIRECTUS_TOKEN`)
    Token(String),
    /// Email/password exchanged for a bearer token via `POST /auth/login`
    Credentials { email: String, password: String },
}

impl std::fmt::Debug for DirectusAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Token(_) => f.write_str("Token(<redacted>)"),
            Self::Credentials { email, .. } => f
                .debug_struct("Credentials")
                .field("email", email)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DirectusConfig {
    pub base_url: String,
    pub auth: DirectusAuth,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("either DIRECTUS_TOKEN or both DIRECTUS_EMAIL and DIRECTUS_PASSWORD must be set")]
    MissingCredentials,
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl DirectusConfig {
    /// Load configuration from the environment. Unlike the server
    /// configuration there is no sensible default, so missing values are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = non_empty_var("DIRECTUS_URL")
            .ok_or(ConfigError::Missing("DIRECTUS_URL"))?
            .trim_end_matches('/')
            .to_string();

        let auth = match non_empty_var("DIRECTUS_TOKEN") {
            Some(token) => DirectusAuth::Token(token),
            None => match (non_empty_var("DIRECTUS_EMAIL"), non_empty_var("DIRECTUS_PASSWORD")) {
                (Some(email), Some(password)) => DirectusAuth::Credentials { email, password },
                _ => return Err(ConfigError::MissingCredentials),
            },
        };

        let request_timeout_seconds = non_empty_var("DIRECTUS_TIMEOUT_SECONDS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            base_url,
            auth,
            request_timeout_seconds,
        })
    }
}
