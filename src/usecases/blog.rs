use super::{resolve_rows, rows_from_payload};
use crate::{models::BlogPost, services::content_api::BlogApi};
use serde_json::Value;
use tracing::warn;

pub fn blog_posts_from_payload(payload: &Value) -> Vec<BlogPost> {
    rows_from_payload(payload, BlogPost::from_json)
}

/// Up to `limit` posts in backend order, or `fallback` when none validate.
pub async fn get_latest_blog_posts(
    api: &BlogApi,
    limit: Option<usize>,
    fallback: Vec<BlogPost>,
) -> Vec<BlogPost> {
    match api.list_posts().await {
        Ok(payload) => resolve_rows(blog_posts_from_payload(&payload), fallback, limit),
        Err(e) => {
            warn!(context = "blog", error = %e, "Falling back to static blog posts");
            fallback
        }
    }
}
