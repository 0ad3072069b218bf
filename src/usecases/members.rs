use super::{resolve_rows, rows_from_payload};
use crate::{models::Member, services::content_api::MembersApi};
use serde_json::Value;
use tracing::{info, warn};

/// Validated members of a `{ data: [...] }` payload.
pub fn members_from_payload(payload: &Value) -> Vec<Member> {
    rows_from_payload(payload, Member::from_json)
}

/// Live members, or `fallback` when the backend has nothing usable.
pub async fn get_members(api: &MembersApi, fallback: Vec<Member>) -> Vec<Member> {
    let members = match api.list().await {
        Ok(payload) => members_from_payload(&payload),
        Err(e) => {
            warn!(context = "members", error = %e, "Falling back to static members");
            return fallback;
        }
    };

    if members.is_empty() {
        info!(context = "members", "No valid members in payload, using fallback");
    }
    resolve_rows(members, fallback, None)
}
