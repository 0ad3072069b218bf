//! Tracing subscriber setup and log hygiene helpers.

use crate::config::{LogFormat, LoggingConfig};
use regex::Regex;
use std::sync::LazyLock;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber. `RUST_LOG` wins over the configured
/// default directive. Returns an error if a subscriber is already set.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.default_directive))?;

    match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?,
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()?,
    }

    info!(
        service_name = %config.service_name,
        environment = config.environment.as_str(),
        format = ?config.format,
        "Tracing initialized"
    );

    Ok(())
}

static SECRET_FIELDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)"(password|token|access_token|api[_-]?key|secret|authorization)"\s*:\s*"[^"]*""#)
        .expect("secret field pattern is a valid regex")
});

static BEARER_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)bearer\s+[A-Za-z0-9._~+/=-]+").expect("bearer pattern is a valid regex")
});

static EMAIL_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
        .expect("email pattern is a valid regex")
});

static PHONE_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b01[016789][\s-]?\d{3,4}[\s-]?\d{4}\b").expect("phone pattern is a valid regex")
});

/// Strip secrets and personal data from text before it is logged.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = SECRET_FIELDS.replace_all(input, r#""$1": "[REDACTED]""#);
    let redacted = BEARER_TOKEN.replace_all(&redacted, "Bearer [REDACTED]");
    let redacted = EMAIL_ADDRESS.replace_all(&redacted, "[REDACTED_EMAIL]");
    PHONE_NUMBER
        .replace_all(&redacted, "[REDACTED_PHONE]")
        .into_owned()
}

/// Keep the first character of the local part and the domain:
/// `hong@example.com` becomes `h***@example.com`.
pub fn mask_email(email: &str) -> String {
    match email.trim().split_once('@') {
        Some((local, domain)) if !domain.is_empty() => {
            let first: String = local.chars().take(1).collect();
            format!("{first}***@{domain}")
        }
        _ => "***".to_string(),
    }
}
