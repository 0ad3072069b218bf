//! Outbound clients and stateful services.
//!
//! The backend proxy and the per-resource clients built on it, the JSON
//! client for the site's own API, the contact rate limiter, the monitoring
//! poller, metrics, and the member slug job with its CMS client.

pub mod api_client;
pub mod backend_proxy;
pub mod content_api;
pub mod directus;
pub mod metrics;
pub mod monitoring_poller;
pub mod rate_limit;
pub mod slug;
pub mod slug_enforcement;

pub use api_client::*;
pub use backend_proxy::*;
pub use content_api::*;
pub use directus::*;
pub use metrics::*;
pub use monitoring_poller::*;
pub use rate_limit::*;
pub use slug::*;
pub use slug_enforcement::*;
