//! Service monitoring snapshot shown on the Monitoring page.

use crate::utils::json::{first_string, non_empty_string, number, scalar_string};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitorState {
    Online,
    Offline,
    Pending,
}

impl MonitorState {
    /// Accepts the uptime backend's vocabulary as well as our own.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "online" | "up" => Some(Self::Online),
            "offline" | "down" => Some(Self::Offline),
            "pending" | "maintenance" => Some(Self::Pending),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorStatus {
    pub id: String,
    pub name: String,
    pub status: MonitorState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_check: Option<String>,
}

impl MonitorStatus {
    pub fn from_json(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let name = non_empty_string(obj, "name")?;
        let status = obj
            .get("status")
            .and_then(Value::as_str)
            .and_then(MonitorState::parse)?;

        Some(Self {
            id: obj
                .get("id")
                .and_then(scalar_string)
                .unwrap_or_else(|| name.clone()),
            name,
            status,
            url: non_empty_string(obj, "url"),
            uptime: number(obj, "uptime"),
            response_time: number(obj, "responseTime"),
            last_check: first_string(obj, &["lastCheck", "lastChecked"]),
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoringSummary {
    pub total: usize,
    pub online: usize,
    pub offline: usize,
    pub pending: usize,
}

impl MonitoringSummary {
    pub fn from_monitors(monitors: &[MonitorStatus]) -> Self {
        monitors.iter().fold(
            Self {
                total: monitors.len(),
                ..Self::default()
            },
            |mut acc, m| {
                match m.status {
                    MonitorState::Online => acc.online += 1,
                    MonitorState::Offline => acc.offline += 1,
                    MonitorState::Pending => acc.pending += 1,
                }
                acc
            },
        )
    }

    fn from_object(obj: &Map<String, Value>) -> Option<Self> {
        let count = |key: &str| obj.get(key).and_then(Value::as_u64).map(|n| n as usize);
        Some(Self {
            total: count("total")?,
            online: count("online")?,
            offline: count("offline")?,
            pending: count("pending")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringSnapshot {
    pub monitors: Vec<MonitorStatus>,
    pub summary: MonitoringSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insights: Option<Value>,
}

impl MonitoringSnapshot {
    /// Build a snapshot from the `data` block of a status payload. The block
    /// may be either `{ monitors, summary, insights }` or a bare monitor list.
    /// A summary supplied by the backend wins over the recomputed one.
    pub fn from_data(data: &Value) -> Option<Self> {
        let (raw_monitors, obj) = match data {
            Value::Array(items) => (items.as_slice(), None),
            Value::Object(obj) => (obj.get("monitors")?.as_array()?.as_slice(), Some(obj)),
            _ => return None,
        };

        let monitors: Vec<MonitorStatus> =
            raw_monitors.iter().filter_map(MonitorStatus::from_json).collect();

        let summary = obj
            .and_then(|o| o.get("summary"))
            .and_then(Value::as_object)
            .and_then(MonitoringSummary::from_object)
            .unwrap_or_else(|| MonitoringSummary::from_monitors(&monitors));

        let insights = obj
            .and_then(|o| o.get("insights"))
            .filter(|v| v.is_object())
            .cloned();

        Some(Self {
            monitors,
            summary,
            insights,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_recomputed_when_absent() {
        let snapshot = MonitoringSnapshot::from_data(&json!({
            "monitors": [
                { "id": 1, "name": "homepage", "status": "up", "responseTime": 120 },
                { "id": 2, "name": "api", "status": "down" },
                { "name": "grafana", "status": "pending" },
                { "name": "broken", "status": "exploded" }
            ]
        }))
        .unwrap();

        assert_eq!(snapshot.monitors.len(), 3);
        assert_eq!(snapshot.monitors[2].id, "grafana");
        assert_eq!(
            snapshot.summary,
            MonitoringSummary { total: 3, online: 1, offline: 1, pending: 1 }
        );
        assert!(snapshot.insights.is_none());
    }

    #[test]
    fn test_backend_summary_and_insights_kept() {
        let snapshot = MonitoringSnapshot::from_data(&json!({
            "monitors": [],
            "summary": { "total": 4, "online": 4, "offline": 0, "pending": 0 },
            "insights": { "averageResponseTime": 87.5 }
        }))
        .unwrap();

        assert_eq!(snapshot.summary.total, 4);
        assert_eq!(snapshot.insights, Some(json!({ "averageResponseTime": 87.5 })));
    }

    #[test]
    fn test_bare_list_and_invalid_shapes() {
        let snapshot =
            MonitoringSnapshot::from_data(&json!([{ "name": "a", "status": "online" }])).unwrap();
        assert_eq!(snapshot.summary.online, 1);

        assert!(MonitoringSnapshot::from_data(&json!({ "monitors": "nope" })).is_none());
        assert!(MonitoringSnapshot::from_data(&json!(42)).is_none());
    }
}
