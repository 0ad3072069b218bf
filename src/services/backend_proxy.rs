//! Backend proxy fetcher.
//!
//! Every route that talks to the content backend goes through
//! [`BackendProxy::fetch`], which provides:
//! - an explicit per-call deadline (8 s by default, 65 s for PDF generation)
//! - bounded retries with exponential backoff and jitter for idempotent GETs
//!   that fail before any response arrives
//! - safe JSON parsing that tolerates empty and invalid bodies
//! - one structured log line per call outcome, tagged with context/action
//! - Prometheus counters when metrics are attached

use crate::{
    config::ProxyConfig,
    services::metrics::AppMetrics,
    telemetry::redact_sensitive_data,
    utils::json::message_field,
};
use reqwest::{
    Client, Method,
    header::{ACCEPT, CONTENT_DISPOSITION, CONTENT_TYPE, HeaderMap, HeaderName},
};
use serde_json::Value;
use std::time::{Duration, Instant};
use tokio_retry::{
    RetryIf,
    strategy::{ExponentialBackoff, jitter},
};
use tracing::{debug, error, info, warn};
use url::Url;

/// Shown to users when the backend misses its deadline.
pub const TIMEOUT_MESSAGE: &str = "요청 시간이 초과되었습니다. 잠시 후 다시 시도해주세요.";

/// Shown to users for failures that are not the backend's own answer.
pub const INTERNAL_ERROR_MESSAGE: &str = "서버 오류가 발생했습니다. 잠시 후 다시 시도해주세요.";

/// One call to the content backend
#[derive(Debug, Clone)]
pub struct ProxyRequest {
    /// Path relative to the backend origin, starting with `/`
    pub path: String,
    pub method: Method,
    /// Raw query string forwarded as-is
    pub query: Option<String>,
    pub body: Option<Value>,
    /// Overrides the configured default deadline
    pub timeout: Option<Duration>,
    /// Feature area for logs and metrics, e.g. `members`
    pub context: &'static str,
    /// Operation within the context, e.g. `list`
    pub action: &'static str,
}

impl ProxyRequest {
    pub fn new(method: Method, path: impl Into<String>, context: &'static str, action: &'static str) -> Self {
        Self {
            path: path.into(),
            method,
            query: None,
            body: None,
            timeout: None,
            context,
            action,
        }
    }

    pub fn get(path: impl Into<String>, context: &'static str, action: &'static str) -> Self {
        Self::new(Method::GET, path, context, action)
    }

    pub fn post(path: impl Into<String>, context: &'static str, action: &'static str) -> Self {
        Self::new(Method::POST, path, context, action)
    }

    /// Forward a query string; empty strings are ignored.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.query = (!query.is_empty()).then_some(query);
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Raw backend answer, left for the caller to interpret
#[derive(Debug, Clone)]
pub struct ProxyResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub content_disposition: Option<String>,
    pub body: Vec<u8>,
}

impl ProxyResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON, returning `None` for empty or invalid bodies.
    pub fn json(&self) -> Option<Value> {
        parse_json_body(&self.body)
    }

    pub fn is_pdf(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.to_ascii_lowercase().starts_with("application/pdf"))
    }

    /// Upstream-supplied error message, or a fallback naming the status.
    pub fn upstream_message(&self) -> String {
        self.json()
            .as_ref()
            .and_then(message_field)
            .unwrap_or_else(|| format!("백엔드 요청이 실패했습니다. (status {})", self.status))
    }

    pub fn into_upstream_error(self) -> ProxyError {
        ProxyError::Upstream {
            status: self.status,
            message: self.upstream_message(),
        }
    }
}

/// Lenient JSON parse used for every backend body
pub fn parse_json_body(body: &[u8]) -> Option<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    serde_json::from_slice(body).ok()
}

/// Errors that can occur while proxying to the backend
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("backend request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid backend url: {0}")]
    InvalidUrl(String),

    #[error("backend returned status {status}: {message}")]
    Upstream { status: u16, message: String },
}

impl ProxyError {
    /// HTTP status the gateway answers with for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ProxyError::Timeout { .. } => 504,
            ProxyError::Upstream { status, .. } => *status,
            ProxyError::Network(_) | ProxyError::InvalidUrl(_) => 500,
        }
    }

    /// Localized message safe to show to users
    pub fn user_message(&self) -> String {
        match self {
            ProxyError::Timeout { .. } => TIMEOUT_MESSAGE.to_string(),
            ProxyError::Upstream { message, .. } => message.clone(),
            ProxyError::Network(_) | ProxyError::InvalidUrl(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }

    fn outcome(&self) -> &'static str {
        match self {
            ProxyError::Timeout { .. } => "timeout",
            ProxyError::Network(_) => "network_error",
            ProxyError::InvalidUrl(_) => "invalid_url",
            ProxyError::Upstream { .. } => "upstream_error",
        }
    }
}

/// HTTP client bound to the content backend origin
#[derive(Clone)]
pub struct BackendProxy {
    client: Client,
    config: ProxyConfig,
    metrics: Option<AppMetrics>,
}

impl BackendProxy {
    pub fn new(config: ProxyConfig, metrics: Option<AppMetrics>) -> Result<Self, ProxyError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            config,
            metrics,
        })
    }

    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    fn build_url(&self, request: &ProxyRequest) -> Result<Url, ProxyError> {
        let raw = format!(
            "{}/{}",
            self.config.backend_url.trim_end_matches('/'),
            request.path.trim_start_matches('/')
        );
        let mut url = Url::parse(&raw).map_err(|e| ProxyError::InvalidUrl(format!("{raw}: {e}")))?;
        if let Some(query) = &request.query {
            url.set_query(Some(query.trim_start_matches('?')));
        }
        Ok(url)
    }

    /// Issue the request and return the raw response, whatever its status.
    pub async fn fetch(&self, request: ProxyRequest) -> Result<ProxyResponse, ProxyError> {
        let url = self.build_url(&request)?;
        let timeout = request.timeout.unwrap_or_else(|| self.config.default_timeout());
        let retries = if request.method == Method::GET {
            self.config.get_retries
        } else {
            0
        };
        let strategy = ExponentialBackoff::from_millis(self.config.retry_initial_delay_ms.max(1))
            .max_delay(Duration::from_millis(self.config.retry_max_delay_ms))
            .map(jitter)
            .take(retries);

        debug!(
            context = request.context,
            action = request.action,
            method = %request.method,
            path = %request.path,
            timeout_ms = timeout.as_millis() as u64,
            "Backend request started"
        );

        // One deadline for the whole call, retries and backoff included.
        let started = Instant::now();
        let attempts = RetryIf::spawn(
            strategy,
            || self.attempt(&url, &request),
            |e: &ProxyError| {
                let retry = matches!(e, ProxyError::Network(_));
                if retry {
                    warn!(
                        context = request.context,
                        action = request.action,
                        path = %request.path,
                        error = %e,
                        "Retrying backend request"
                    );
                }
                retry
            },
        );
        let result = match tokio::time::timeout(timeout, attempts).await {
            Ok(result) => result,
            Err(_) => Err(ProxyError::Timeout {
                timeout_ms: timeout.as_millis() as u64,
            }),
        };
        let elapsed = started.elapsed();

        let outcome = match &result {
            Ok(response) if response.is_success() => {
                info!(
                    context = request.context,
                    action = request.action,
                    method = %request.method,
                    path = %request.path,
                    status = response.status,
                    duration_ms = elapsed.as_millis() as u64,
                    "Backend request completed"
                );
                "success"
            }
            Ok(response) => {
                let snippet: String = String::from_utf8_lossy(&response.body).chars().take(500).collect();
                warn!(
                    context = request.context,
                    action = request.action,
                    method = %request.method,
                    path = %request.path,
                    status = response.status,
                    duration_ms = elapsed.as_millis() as u64,
                    body = %redact_sensitive_data(&snippet),
                    "Backend request returned an error status"
                );
                "upstream_error"
            }
            Err(e @ ProxyError::Timeout { .. }) => {
                warn!(
                    context = request.context,
                    action = request.action,
                    method = %request.method,
                    path = %request.path,
                    timeout_ms = timeout.as_millis() as u64,
                    error = %e,
                    "Backend request timed out"
                );
                e.outcome()
            }
            Err(e) => {
                error!(
                    context = request.context,
                    action = request.action,
                    method = %request.method,
                    path = %request.path,
                    duration_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "Backend request failed"
                );
                e.outcome()
            }
        };

        if let Some(metrics) = &self.metrics {
            metrics.record_backend_call(request.context, request.action, outcome, elapsed);
        }

        result
    }

    /// Like [`fetch`](Self::fetch) but maps non-2xx answers to
    /// [`ProxyError::Upstream`] and parses the body. Empty or invalid success
    /// bodies become `Value::Null`.
    pub async fn fetch_json(&self, request: ProxyRequest) -> Result<Value, ProxyError> {
        let response = self.fetch(request).await?;
        if !response.is_success() {
            return Err(response.into_upstream_error());
        }
        Ok(response.json().unwrap_or(Value::Null))
    }

    async fn attempt(&self, url: &Url, request: &ProxyRequest) -> Result<ProxyResponse, ProxyError> {
        let mut builder = self
            .client
            .request(request.method.clone(), url.clone())
            .header(ACCEPT, "application/json, application/pdf;q=0.9, */*;q=0.8");
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        // The caller's deadline covers reading the body too, so a stalled PDF
        // stream cannot hold the route open past it.
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let content_type = header_string(response.headers(), CONTENT_TYPE);
        let content_disposition = header_string(response.headers(), CONTENT_DISPOSITION);
        let body = response.bytes().await?;

        Ok(ProxyResponse {
            status,
            content_type,
            content_disposition,
            body: body.to_vec(),
        })
    }
}

fn header_string(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn proxy(backend_url: &str) -> BackendProxy {
        BackendProxy::new(ProxyConfig::default().with_backend_url(backend_url), None).unwrap()
    }

    #[test]
    fn test_safe_json_parsing() {
        assert_eq!(parse_json_body(b""), None);
        assert_eq!(parse_json_body(b"  \n"), None);
        assert_eq!(parse_json_body(b"<html>oops</html>"), None);
        assert_eq!(parse_json_body(br#"{"data":[]}"#), Some(json!({ "data": [] })));
    }

    #[test]
    fn test_build_url_keeps_base_path_and_query() {
        let proxy = proxy("http://backend:3001/internal/");
        let request = ProxyRequest::get("/api/v1/blog/posts", "blog", "list").with_query("limit=3&page=2");
        let url = proxy.build_url(&request).unwrap();
        assert_eq!(url.as_str(), "http://backend:3001/internal/api/v1/blog/posts?limit=3&page=2");

        let bad = self::proxy("not a url");
        assert!(matches!(
            bad.build_url(&ProxyRequest::get("/x", "t", "t")),
            Err(ProxyError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(ProxyError::Timeout { timeout_ms: 8000 }.status_code(), 504);
        assert_eq!(ProxyError::Timeout { timeout_ms: 8000 }.user_message(), TIMEOUT_MESSAGE);

        let upstream = ProxyError::Upstream {
            status: 404,
            message: "member not found".to_string(),
        };
        assert_eq!(upstream.status_code(), 404);
        assert_eq!(upstream.user_message(), "member not found");

        assert_eq!(ProxyError::InvalidUrl("x".into()).status_code(), 500);
        assert_eq!(ProxyError::InvalidUrl("x".into()).user_message(), INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn test_upstream_message_fallback() {
        let with_message = ProxyResponse {
            status: 422,
            content_type: Some("application/json".to_string()),
            content_disposition: None,
            body: br#"{"message":"invalid email"}"#.to_vec(),
        };
        assert_eq!(with_message.upstream_message(), "invalid email");

        let empty = ProxyResponse {
            status: 502,
            content_type: None,
            content_disposition: None,
            body: Vec::new(),
        };
        assert!(empty.upstream_message().contains("502"));
        assert!(!empty.is_pdf());
    }

    #[tokio::test]
    async fn test_retries_share_one_deadline() {
        let config = ProxyConfig {
            default_timeout_ms: 300,
            get_retries: 50,
            retry_initial_delay_ms: 200,
            retry_max_delay_ms: 1_000,
            ..ProxyConfig::default().with_backend_url("http://127.0.0.1:9")
        };
        let proxy = BackendProxy::new(config, None).unwrap();

        let started = Instant::now();
        let result = proxy.fetch(ProxyRequest::get("/api/v1/members", "members", "list")).await;

        assert!(matches!(result, Err(ProxyError::Timeout { timeout_ms: 300 })));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn test_pdf_detection() {
        let pdf = ProxyResponse {
            status: 200,
            content_type: Some("Application/PDF".to_string()),
            content_disposition: None,
            body: b"%PDF-1.7".to_vec(),
        };
        assert!(pdf.is_pdf());
        assert!(pdf.json().is_none());
    }
}
