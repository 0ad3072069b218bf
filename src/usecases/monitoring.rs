use crate::{
    models::MonitoringSnapshot,
    services::api_client::{ApiClient, ApiError},
    utils::json::message_field,
};
use serde_json::Value;

/// Snapshot carried in the `data` field of a status payload.
pub fn snapshot_from_payload(payload: &Value) -> Option<MonitoringSnapshot> {
    payload
        .as_object()?
        .get("data")
        .and_then(MonitoringSnapshot::from_data)
}

/// Fetch the current monitoring snapshot. Errors are returned rather than
/// replaced, so the poller can keep the previous snapshot and flag the failure.
pub async fn get_monitoring_status(client: &ApiClient) -> Result<MonitoringSnapshot, ApiError> {
    let envelope: Value = client.get_json("/monitoring/status").await?;

    if envelope.get("success").and_then(Value::as_bool) == Some(false) {
        return Err(ApiError::Http {
            status: 502,
            message: message_field(&envelope)
                .unwrap_or_else(|| "모니터링 상태를 불러오지 못했습니다.".to_string()),
        });
    }

    snapshot_from_payload(&envelope)
        .ok_or_else(|| ApiError::Decode("monitoring payload has no monitor list".to_string()))
}
