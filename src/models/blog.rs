//! Blog post metadata aggregated from members' external blogs.

use crate::utils::json::{non_empty_string, string_list};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlogPlatform {
    Tistory,
    Velog,
    Medium,
    Other,
}

impl BlogPlatform {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "tistory" => Some(Self::Tistory),
            "velog" => Some(Self::Velog),
            "medium" => Some(Self::Medium),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Guess the platform from the post's host when the backend omits it.
    pub fn from_link(link: &str) -> Self {
        let host = url::Url::parse(link)
            .ok()
            .and_then(|u| u.host_str().map(str::to_lowercase))
            .unwrap_or_default();

        if host.ends_with("tistory.com") {
            Self::Tistory
        } else if host.ends_with("velog.io") {
            Self::Velog
        } else if host == "medium.com" || host.ends_with(".medium.com") {
            Self::Medium
        } else {
            Self::Other
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub title: String,
    pub description: String,
    pub link: String,
    pub date: String,
    pub author: String,
    pub platform: BlogPlatform,
    pub tags: Vec<String>,

    // Legacy aliases still read by older page components.
    pub id: String,
    pub slug: String,
    pub url: String,
}

impl BlogPost {
    /// Validate one backend row. `title`, `link` and `date` are required.
    /// A missing platform is inferred from the link; an unknown one rejects
    /// the row.
    pub fn from_json(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let title = non_empty_string(obj, "title")?;
        let link = non_empty_string(obj, "link")?;
        let date = non_empty_string(obj, "date")?;

        let platform = match obj.get("platform") {
            None | Some(Value::Null) => BlogPlatform::from_link(&link),
            Some(Value::String(s)) => BlogPlatform::parse(s)?,
            Some(_) => return None,
        };

        Some(Self {
            description: non_empty_string(obj, "description").unwrap_or_default(),
            author: non_empty_string(obj, "author").unwrap_or_default(),
            tags: string_list(obj, "tags"),
            id: link.clone(),
            slug: slug_from_link(&link),
            url: link.clone(),
            title,
            link,
            date,
            platform,
        })
    }
}

/// Last non-empty path segment of the link, or the link itself.
fn slug_from_link(link: &str) -> String {
    url::Url::parse(link)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .and_then(|segments| segments.filter(|s| !s.is_empty()).last().map(str::to_string))
        })
        .unwrap_or_else(|| link.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_legacy_fields_derived_from_link() {
        let post = BlogPost::from_json(&json!({
            "title": "Terraform 입문",
            "description": "state 관리",
            "link": "https://infra.tistory.com/entry/terraform-101/",
            "date": "2024-05-01",
            "author": "kim",
            "tags": ["terraform", 1, ""]
        }))
        .unwrap();

        assert_eq!(post.platform, BlogPlatform::Tistory);
        assert_eq!(post.slug, "terraform-101");
        assert_eq!(post.id, post.link);
        assert_eq!(post.url, post.link);
        assert_eq!(post.tags, vec!["terraform"]);
    }

    #[test]
    fn test_platform_validation() {
        let base = json!({ "title": "t", "link": "https://velog.io/@a/b", "date": "2024-01-01" });
        assert_eq!(BlogPost::from_json(&base).unwrap().platform, BlogPlatform::Velog);

        let mut unknown = base.clone();
        unknown["platform"] = json!("substack");
        assert!(BlogPost::from_json(&unknown).is_none());

        let mut explicit = base;
        explicit["platform"] = json!("Medium");
        assert_eq!(BlogPost::from_json(&explicit).unwrap().platform, BlogPlatform::Medium);
    }

    #[test]
    fn test_missing_required_fields() {
        assert!(BlogPost::from_json(&json!({ "title": "t", "date": "2024-01-01" })).is_none());
        assert!(BlogPost::from_json(&json!({ "title": "", "link": "x", "date": "d" })).is_none());
    }
}
