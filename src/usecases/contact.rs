use crate::{
    models::{ContactFormData, ContactResponse},
    services::api_client::{ApiClient, ApiError},
    telemetry::mask_email,
    utils::json::message_field,
};
use serde_json::Value;
use tracing::{info, warn};

pub const CONTACT_SUCCESS_MESSAGE: &str = "문의가 성공적으로 전송되었습니다.";
pub const CONTACT_FAILURE_MESSAGE: &str = "메시지 전송에 실패했습니다. 잠시 후 다시 시도해주세요.";

/// Submit the contact form. Unlike the read use-cases this reports failure
/// to the caller instead of hiding it.
pub async fn send_contact_message(client: &ApiClient, form: &ContactFormData) -> ContactResponse {
    let form = match form.validated() {
        Ok(form) => form,
        Err(e) => return ContactResponse::failed(e.to_string()),
    };

    match client.post_json::<_, Value>("/contact", &form).await {
        Ok(body) => {
            info!(context = "contact", email = %mask_email(&form.email), "Contact message sent");
            ContactResponse::ok(message_field(&body).unwrap_or_else(|| CONTACT_SUCCESS_MESSAGE.to_string()))
        }
        Err(ApiError::Http { status, message }) => {
            warn!(context = "contact", status, message = %message, "Contact message rejected");
            ContactResponse::failed(message)
        }
        Err(e) => {
            warn!(context = "contact", error = %e, "Contact message failed");
            ContactResponse::failed(CONTACT_FAILURE_MESSAGE)
        }
    }
}
