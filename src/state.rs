//! Shared application state handed to every worker.

use crate::{
    config::GatewayConfig,
    services::{
        AnnouncementsApi, AppMetrics, BackendProxy, BlogApi, ContactRateLimiter, MembersApi,
        ProxyError,
    },
};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to build backend client: {0}")]
    Proxy(#[from] ProxyError),

    #[error("failed to create metrics registry: {0}")]
    Metrics(#[from] prometheus::Error),
}

/// Built once before the server starts and cloned into each worker, so the
/// rate limiter and metrics registry are shared process-wide.
#[derive(Clone)]
pub struct AppState {
    pub config: GatewayConfig,
    pub proxy: BackendProxy,
    pub contact_limiter: ContactRateLimiter,
    pub metrics: Option<AppMetrics>,
}

impl AppState {
    pub fn from_config(config: GatewayConfig) -> Result<Self, StartupError> {
        let metrics = if config.metrics.enabled {
            Some(AppMetrics::new()?)
        } else {
            None
        };

        Ok(Self {
            proxy: BackendProxy::new(config.proxy.clone(), metrics.clone())?,
            contact_limiter: ContactRateLimiter::new(config.contact_rate_limit.clone()),
            metrics,
            config,
        })
    }

    pub fn announcements_api(&self) -> AnnouncementsApi {
        AnnouncementsApi::new(self.proxy.clone())
    }

    pub fn blog_api(&self) -> BlogApi {
        BlogApi::new(self.proxy.clone())
    }

    pub fn members_api(&self) -> MembersApi {
        MembersApi::new(self.proxy.clone())
    }
}
