//! JSON list routes backed by the content backend.

use super::response::{app_state, data_response, failure_response, proxy_error_response};
use crate::{
    services::{MONITORING_STATUS_PATH, ProxyRequest},
    usecases::{
        announcements_from_payload, blog_posts_from_payload, members_from_payload,
        snapshot_from_payload,
    },
    utils::json::message_field,
};
use actix_web::{Error, HttpRequest, HttpResponse, http::StatusCode};
use paperclip::actix::api_v2_operation;
use serde_json::Value;
use tracing::{info, warn};

const INVALID_MONITORING_MESSAGE: &str = "모니터링 데이터를 불러오지 못했습니다.";

#[api_v2_operation(
    summary = "Announcements",
    description = "Notices and updates from the content backend. Query parameters are forwarded unchanged.",
    tags("Content"),
    responses(
        (status = 200, description = "{ success, data } with validated announcements"),
        (status = 504, description = "Backend timed out")
    )
)]
pub async fn announcements(req: HttpRequest) -> Result<HttpResponse, Error> {
    let state = app_state(&req)?;

    Ok(match state.announcements_api().list_with_query(req.query_string()).await {
        Ok(payload) => {
            let announcements = announcements_from_payload(&payload);
            info!(context = "announcements", count = announcements.len(), "Announcements served");
            data_response(announcements)
        }
        Err(e) => proxy_error_response(&e),
    })
}

#[api_v2_operation(
    summary = "Blog posts",
    description = "Members' blog posts. Query parameters are forwarded unchanged.",
    tags("Content"),
    responses(
        (status = 200, description = "{ success, data } with validated posts"),
        (status = 504, description = "Backend timed out")
    )
)]
pub async fn blog_posts(req: HttpRequest) -> Result<HttpResponse, Error> {
    let state = app_state(&req)?;

    Ok(match state.blog_api().list_posts_with_query(req.query_string()).await {
        Ok(payload) => {
            let posts = blog_posts_from_payload(&payload);
            info!(context = "blog", count = posts.len(), "Blog posts served");
            data_response(posts)
        }
        Err(e) => proxy_error_response(&e),
    })
}

#[api_v2_operation(
    summary = "Members",
    description = "Study members. Query parameters are forwarded unchanged.",
    tags("Content"),
    responses(
        (status = 200, description = "{ success, data } with validated members"),
        (status = 504, description = "Backend timed out")
    )
)]
pub async fn members(req: HttpRequest) -> Result<HttpResponse, Error> {
    let state = app_state(&req)?;

    Ok(match state.members_api().list_with_query(req.query_string()).await {
        Ok(payload) => {
            let members = members_from_payload(&payload);
            info!(context = "members", totalMembers = members.len(), "Members served");
            data_response(members)
        }
        Err(e) => proxy_error_response(&e),
    })
}

#[api_v2_operation(
    summary = "Monitoring status",
    description = "Current state of the monitored services with a summary.",
    tags("Monitoring"),
    responses(
        (status = 200, description = "{ success, data } with the monitoring snapshot"),
        (status = 502, description = "Backend answered without a usable snapshot"),
        (status = 504, description = "Backend timed out")
    )
)]
pub async fn monitoring_status(req: HttpRequest) -> Result<HttpResponse, Error> {
    let state = app_state(&req)?;
    let request = ProxyRequest::get(MONITORING_STATUS_PATH, "monitoring", "status")
        .with_query(req.query_string());

    let payload = match state.proxy.fetch_json(request).await {
        Ok(payload) => payload,
        Err(e) => return Ok(proxy_error_response(&e)),
    };

    if payload.get("success").and_then(Value::as_bool) == Some(false) {
        let message = message_field(&payload).unwrap_or_else(|| INVALID_MONITORING_MESSAGE.to_string());
        warn!(context = "monitoring", message = %message, "Backend reported monitoring failure");
        return Ok(failure_response(StatusCode::BAD_GATEWAY, message));
    }

    Ok(match snapshot_from_payload(&payload) {
        Some(snapshot) => {
            info!(
                context = "monitoring",
                total = snapshot.summary.total,
                online = snapshot.summary.online,
                "Monitoring status served"
            );
            data_response(snapshot)
        }
        None => {
            warn!(context = "monitoring", "Monitoring payload has no monitor list");
            failure_response(StatusCode::BAD_GATEWAY, INVALID_MONITORING_MESSAGE)
        }
    })
}
