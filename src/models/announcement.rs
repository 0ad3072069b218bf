//! Notices and update announcements.

use crate::utils::json::{first_string, non_empty_string, scalar_string};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnouncementType {
    Notice,
    Update,
}

impl AnnouncementType {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "notice" => Some(Self::Notice),
            "update" => Some(Self::Update),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub content: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: AnnouncementType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
}

impl Announcement {
    /// Validate one backend row. A missing `type` means a plain notice.
    pub fn from_json(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let id = obj.get("id").and_then(scalar_string)?;
        let title = non_empty_string(obj, "title")?;
        let content = non_empty_string(obj, "content")?;
        let published_at = first_string(obj, &["publishedAt", "published_at"]);
        let date = non_empty_string(obj, "date").or_else(|| published_at.clone())?;

        let kind = match obj.get("type") {
            None | Some(Value::Null) => AnnouncementType::Notice,
            Some(Value::String(s)) => AnnouncementType::parse(s)?,
            Some(_) => return None,
        };

        Some(Self {
            id,
            title,
            content,
            date,
            kind,
            published_at,
        })
    }
}
