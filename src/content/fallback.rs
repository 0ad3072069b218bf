//! Static content shown while the backend has nothing usable.
//!
//! Rows are declared as backend-shaped JSON and run through the same
//! sanitizers as live payloads.

use crate::{
    models::{Announcement, BlogPost, Member},
    usecases::{announcements_from_payload, blog_posts_from_payload, members_from_payload},
};
use serde_json::json;

pub fn fallback_members() -> Vec<Member> {
    members_from_payload(&json!({
        "data": [
            {
                "id": "fallback-senior-1",
                "slug": "infra-mentor",
                "name": "인프라 멘토",
                "role": "Cloud Infrastructure Engineer",
                "category": "senior",
                "bio": "클라우드 인프라와 자동화를 함께 공부합니다.",
                "specialties": ["AWS", "Kubernetes", "Terraform"]
            },
            {
                "id": "fallback-mentee-1",
                "slug": "infra-mentee",
                "name": "인프라 멘티",
                "role": "DevOps Engineer",
                "category": "mentee",
                "specialties": ["Linux", "CI/CD"]
            }
        ]
    }))
}

pub fn fallback_announcements() -> Vec<Announcement> {
    announcements_from_payload(&json!({
        "data": [
            {
                "id": "fallback-notice-1",
                "title": "공지사항을 불러오지 못했습니다",
                "content": "잠시 후 다시 확인해주세요.",
                "date": "2025-01-01",
                "type": "notice"
            }
        ]
    }))
}

pub fn fallback_blog_posts() -> Vec<BlogPost> {
    blog_posts_from_payload(&json!({
        "data": [
            {
                "title": "인프라 스터디 블로그",
                "description": "멤버들의 기술 블로그 글이 곧 업데이트됩니다.",
                "link": "https://velog.io/@infra/welcome",
                "date": "2025-01-01",
                "author": "infra",
                "platform": "velog",
                "tags": ["infra"]
            }
        ]
    }))
}
