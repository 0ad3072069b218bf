//! Infra Site Gateway - server-side gateway for the infra study site
//!
//! Sits between the site's pages and its content backend and provides:
//! - proxy routes for announcements, blog posts, members and monitoring,
//!   validated row by row before they reach the page
//! - a rate-limited contact form endpoint
//! - member portfolio PDF generation and download passthrough
//! - page-level use-cases that fall back to built-in content
//! - a monitoring status poller
//! - a one-shot job that enforces unique member slugs in the CMS
//! - Prometheus metrics, request IDs and structured logging
//!
//! ## Architecture
//!
//! - `config/` - Configuration structures and environment loading
//! - `models/` - Wire shapes and their validating constructors
//! - `services/` - Outbound clients, rate limiter, poller, slug job
//! - `usecases/` - Page-level reads with fallback, contact submission
//! - `handlers/` - HTTP route handlers and the app factory
//! - `middleware/` - Request ID and metrics middleware
//! - `content/` - Built-in fallback content
//! - `telemetry` - Tracing setup and log redaction
//!
//! ## Quick Start
//!
//! ```no_run
//! use infra_site_gateway::{AppState, GatewayConfig, create_app};
//! use actix_web::HttpServer;
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let state = AppState::from_config(GatewayConfig::from_env())
//!         .map_err(std::io::Error::other)?;
//!     HttpServer::new(move || create_app(state.clone()))
//!         .bind(("127.0.0.1", 3000))?
//!         .run()
//!         .await
//! }
//! ```

pub mod config;
pub mod content;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod usecases;
pub mod utils;

pub use config::{GatewayConfig, LoggingConfig, MetricsConfig, ProxyConfig, RateLimitConfig};
pub use handlers::{create_app, create_openapi_spec, health, version};
pub use middleware::{MetricsMiddleware, RequestIdMiddleware};
pub use models::{ApiEnvelope, ContactFormData, ContactResponse, HealthResponse, VersionResponse};
pub use services::{
    ApiClient, ApiError, AppMetrics, BackendProxy, ContactRateLimiter, MonitoringPoller,
    ProxyError, ProxyRequest, ProxyResponse,
};
pub use state::{AppState, StartupError};
pub use utils::{extract_client_ip, extract_route_pattern, extract_user_agent};

/// Build metadata embedded by the build script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub commit: &'static str,
    pub build_time: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            commit: option_env!("VERGEN_GIT_SHA").unwrap_or("unknown"),
            build_time: option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown"),
        }
    }
}
