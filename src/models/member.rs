//! Club member profiles as served to the About and Members pages.

use crate::utils::json::{first_string, non_empty_string, object_list, scalar_string, string_list};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Membership track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberCategory {
    Senior,
    Mentee,
}

impl MemberCategory {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "senior" => Some(Self::Senior),
            "mentee" => Some(Self::Mentee),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub school: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
}

impl Education {
    fn from_object(obj: &Map<String, Value>) -> Option<Self> {
        Some(Self {
            school: first_string(obj, &["school", "institution"])?,
            degree: first_string(obj, &["degree", "major"]),
            period: non_empty_string(obj, "period"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    pub company: String,
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl WorkExperience {
    fn from_object(obj: &Map<String, Value>) -> Option<Self> {
        Some(Self {
            company: non_empty_string(obj, "company")?,
            position: first_string(obj, &["position", "role", "title"])?,
            period: non_empty_string(obj, "period"),
            description: non_empty_string(obj, "description"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub name: String,
    pub role: String,
    pub category: MemberCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub work_experience: Vec<WorkExperience>,
}

impl Member {
    /// Validate one backend row. `name`, `role` and a known `category` are
    /// required; every other field is optional and malformed entries inside
    /// list fields are dropped without rejecting the row.
    pub fn from_json(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let name = non_empty_string(obj, "name")?;
        let role = non_empty_string(obj, "role")?;
        let category = obj
            .get("category")
            .and_then(Value::as_str)
            .and_then(MemberCategory::parse)?;

        Some(Self {
            id: obj.get("id").and_then(scalar_string),
            slug: non_empty_string(obj, "slug"),
            name,
            role,
            category,
            bio: non_empty_string(obj, "bio"),
            image_url: first_string(obj, &["imageUrl", "image", "avatar"]),
            generation: obj.get("generation").and_then(scalar_string),
            email: non_empty_string(obj, "email"),
            github: non_empty_string(obj, "github"),
            linkedin: non_empty_string(obj, "linkedin"),
            specialties: string_list(obj, "specialties"),
            achievements: string_list(obj, "achievements"),
            education: object_list(obj, "education", Education::from_object),
            work_experience: object_list(obj, "workExperience", WorkExperience::from_object),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invalid_list_entries_are_dropped() {
        let row = json!({
            "id": 7,
            "name": "김인프라",
            "role": "DevOps Engineer",
            "category": "senior",
            "specialties": ["AWS", 123, "", null],
            "achievements": "not-a-list",
            "education": [{ "school": "Seoul Univ", "degree": "CS" }, { "degree": "no school" }, 5],
            "workExperience": [{ "company": "Acme", "position": "SRE" }, { "company": "NoRole" }]
        });

        let member = Member::from_json(&row).expect("row should be retained");
        assert_eq!(member.id.as_deref(), Some("7"));
        assert_eq!(member.specialties, vec!["AWS"]);
        assert!(member.achievements.is_empty());
        assert_eq!(member.education.len(), 1);
        assert_eq!(member.work_experience.len(), 1);
        assert_eq!(member.work_experience[0].position, "SRE");
    }

    #[test]
    fn test_required_fields() {
        assert!(Member::from_json(&json!({ "name": "A", "role": "B", "category": "alumni" })).is_none());
        assert!(Member::from_json(&json!({ "name": "  ", "role": "B", "category": "mentee" })).is_none());
        assert!(Member::from_json(&json!({ "name": "A", "category": "mentee" })).is_none());
        assert!(Member::from_json(&json!("A")).is_none());

        let member = Member::from_json(&json!({ "name": "A", "role": "B", "category": "Mentee" })).unwrap();
        assert_eq!(member.category, MemberCategory::Mentee);
    }

    #[test]
    fn test_serializes_camel_case() {
        let member = Member::from_json(&json!({
            "name": "A",
            "role": "B",
            "category": "senior",
            "workExperience": [{ "company": "Acme", "position": "SRE" }]
        }))
        .unwrap();

        let value = serde_json::to_value(&member).unwrap();
        assert!(value.get("workExperience").is_some());
        assert_eq!(value["category"], "senior");
        assert!(value.get("bio").is_none());
    }
}
