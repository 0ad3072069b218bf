//! Per-resource clients for the content backend.
//!
//! Each client knows one fixed backend path and hands back the untyped
//! payload; shape validation happens in the use-cases.

use crate::services::backend_proxy::{BackendProxy, ProxyError, ProxyRequest};
use serde_json::Value;

pub const NOTICES_PATH: &str = "/api/v1/notices";
pub const BLOG_POSTS_PATH: &str = "/api/v1/blog/posts";
pub const MEMBERS_PATH: &str = "/api/v1/members";
pub const MONITORING_STATUS_PATH: &str = "/api/v1/monitoring/status";
pub const CONTACT_PATH: &str = "/api/v1/contact";

#[derive(Clone)]
pub struct AnnouncementsApi {
    proxy: BackendProxy,
}

impl AnnouncementsApi {
    pub fn new(proxy: BackendProxy) -> Self {
        Self { proxy }
    }

    pub async fn list(&self) -> Result<Value, ProxyError> {
        self.list_with_query("").await
    }

    /// Same as [`list`](Self::list) with a raw query string forwarded.
    pub async fn list_with_query(&self, query: &str) -> Result<Value, ProxyError> {
        self.proxy
            .fetch_json(ProxyRequest::get(NOTICES_PATH, "announcements", "list").with_query(query))
            .await
    }
}

#[derive(Clone)]
pub struct BlogApi {
    proxy: BackendProxy,
}

impl BlogApi {
    pub fn new(proxy: BackendProxy) -> Self {
        Self { proxy }
    }

    pub async fn list_posts(&self) -> Result<Value, ProxyError> {
        self.list_posts_with_query("").await
    }

    /// Same as [`list_posts`](Self::list_posts) with a raw query string forwarded.
    pub async fn list_posts_with_query(&self, query: &str) -> Result<Value, ProxyError> {
        self.proxy
            .fetch_json(ProxyRequest::get(BLOG_POSTS_PATH, "blog", "list").with_query(query))
            .await
    }
}

#[derive(Clone)]
pub struct MembersApi {
    proxy: BackendProxy,
}

impl MembersApi {
    pub fn new(proxy: BackendProxy) -> Self {
        Self { proxy }
    }

    pub async fn list(&self) -> Result<Value, ProxyError> {
        self.list_with_query("").await
    }

    /// Same as [`list`](Self::list) with a raw query string forwarded.
    pub async fn list_with_query(&self, query: &str) -> Result<Value, ProxyError> {
        self.proxy
            .fetch_json(ProxyRequest::get(MEMBERS_PATH, "members", "list").with_query(query))
            .await
    }
}
