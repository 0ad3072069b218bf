//! Response helpers shared by the proxy routes.

use crate::{models::ApiEnvelope, services::ProxyError, state::AppState};
use actix_web::{Error, HttpRequest, HttpResponse, http::StatusCode, web};
use serde::Serialize;

pub(crate) fn app_state(req: &HttpRequest) -> Result<&AppState, Error> {
    req.app_data::<web::Data<AppState>>()
        .map(|data| data.get_ref())
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("application state not configured"))
}

pub(crate) fn status_code(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY)
}

/// `{ success: true, data }`
pub(crate) fn data_response<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(ApiEnvelope::ok(data))
}

/// `{ success: false, message }` with the given status
pub(crate) fn failure_response(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ApiEnvelope::<()>::failure(message))
}

/// 504 for timeouts, the upstream status for backend answers, 500 otherwise.
pub(crate) fn proxy_error_response(err: &ProxyError) -> HttpResponse {
    failure_response(status_code(err.status_code()), err.user_message())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use serde_json::Value;

    #[actix_web::test]
    async fn test_proxy_error_statuses() {
        let timeout = proxy_error_response(&ProxyError::Timeout { timeout_ms: 8000 });
        assert_eq!(timeout.status(), StatusCode::GATEWAY_TIMEOUT);

        let upstream = proxy_error_response(&ProxyError::Upstream {
            status: 404,
            message: "not found".to_string(),
        });
        assert_eq!(upstream.status(), StatusCode::NOT_FOUND);
        let body: Value = serde_json::from_slice(&to_bytes(upstream.into_body()).await.unwrap()).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "not found");
        assert!(body.get("data").is_none());

        let invalid = proxy_error_response(&ProxyError::InvalidUrl("x".to_string()));
        assert_eq!(invalid.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
