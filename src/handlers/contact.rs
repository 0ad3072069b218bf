//! Contact form route: rate limit, validate, forward.

use super::response::{app_state, failure_response, proxy_error_response};
use crate::{
    models::{ContactFormData, ContactResponse},
    services::{
        CONTACT_PATH, ProxyRequest, RATE_LIMIT_MESSAGE, RateLimitDecision, contact_tracking_key,
        parse_json_body,
    },
    telemetry::mask_email,
    usecases::CONTACT_SUCCESS_MESSAGE,
    utils::{extract_client_ip, json::message_field},
};
use actix_web::{
    Error, HttpRequest, HttpResponse,
    http::{
        StatusCode,
        header::{HeaderValue, RETRY_AFTER},
    },
    web,
};
use tracing::{info, warn};

const MALFORMED_BODY_MESSAGE: &str = "잘못된 요청 형식입니다.";

/// `POST /api/contact`. The rate limit is counted before the body is
/// validated, so malformed submissions also use up the sender's quota.
pub async fn contact(req: HttpRequest, body: web::Bytes) -> Result<HttpResponse, Error> {
    let state = app_state(&req)?;
    let payload = parse_json_body(&body);
    let client_ip = extract_client_ip(&req);
    let key = contact_tracking_key(payload.as_ref(), &client_ip);

    if let RateLimitDecision::Limited { retry_after } = state.contact_limiter.check(&key) {
        warn!(context = "contact", client_ip = %client_ip, "Contact rate limit exceeded");
        let mut response = failure_response(StatusCode::TOO_MANY_REQUESTS, RATE_LIMIT_MESSAGE);
        if let Ok(value) = HeaderValue::from_str(&retry_after.as_secs().max(1).to_string()) {
            response.headers_mut().insert(RETRY_AFTER, value);
        }
        return Ok(response);
    }

    let form = match payload.map(serde_json::from_value::<ContactFormData>) {
        Some(Ok(form)) => form,
        _ => return Ok(failure_response(StatusCode::BAD_REQUEST, MALFORMED_BODY_MESSAGE)),
    };
    let form = match form.validated() {
        Ok(form) => form,
        Err(e) => return Ok(failure_response(StatusCode::BAD_REQUEST, e.to_string())),
    };

    let body = serde_json::to_value(&form).map_err(actix_web::error::ErrorInternalServerError)?;
    let request = ProxyRequest::post(CONTACT_PATH, "contact", "send").with_body(body);

    Ok(match state.proxy.fetch_json(request).await {
        Ok(reply) => {
            info!(context = "contact", email = %mask_email(&form.email), "Contact message forwarded");
            let message = message_field(&reply).unwrap_or_else(|| CONTACT_SUCCESS_MESSAGE.to_string());
            HttpResponse::Ok().json(ContactResponse::ok(message))
        }
        Err(e) => proxy_error_response(&e),
    })
}
