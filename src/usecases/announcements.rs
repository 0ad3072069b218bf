use super::{resolve_rows, rows_from_payload};
use crate::{models::Announcement, services::content_api::AnnouncementsApi};
use serde_json::Value;
use tracing::warn;

pub fn announcements_from_payload(payload: &Value) -> Vec<Announcement> {
    rows_from_payload(payload, Announcement::from_json)
}

/// Up to `limit` announcements in backend order, or `fallback`.
pub async fn get_latest_announcements(
    api: &AnnouncementsApi,
    limit: Option<usize>,
    fallback: Vec<Announcement>,
) -> Vec<Announcement> {
    match api.list().await {
        Ok(payload) => resolve_rows(announcements_from_payload(&payload), fallback, limit),
        Err(e) => {
            warn!(context = "announcements", error = %e, "Falling back to static announcements");
            fallback
        }
    }
}
