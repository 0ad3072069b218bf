//! Member slug normalization and de-duplication.

use regex::Regex;
use serde::Serialize;
use std::{collections::HashSet, sync::LazyLock};

/// Anything that is not lowercase ASCII alphanumeric or a precomposed Hangul
/// syllable.
static NON_SLUG_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^a-z0-9\x{AC00}-\x{D7A3}]+").expect("slug character class is a valid regex")
});

/// Used when neither slug, name nor id normalizes to anything.
pub const FALLBACK_SLUG: &str = "member";

/// Lowercase, collapse every run of disallowed characters into a single
/// hyphen, and trim hyphens from both ends. Idempotent.
pub fn normalize_slug(input: &str) -> String {
    let lowered = input.to_lowercase();
    NON_SLUG_CHARS
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// A member row as read from the CMS
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSlugRow {
    pub id: String,
    pub slug: Option<String>,
    pub name: Option<String>,
}

/// Base slug for a row: the first of existing slug, name and id that
/// normalizes to a non-empty string.
pub fn candidate_slug(row: &MemberSlugRow) -> String {
    [row.slug.as_deref(), row.name.as_deref(), Some(row.id.as_str())]
        .into_iter()
        .flatten()
        .map(normalize_slug)
        .find(|slug| !slug.is_empty())
        .unwrap_or_else(|| FALLBACK_SLUG.to_string())
}

/// Final slug computed for one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugAssignment {
    pub id: String,
    pub current: Option<String>,
    pub slug: String,
}

impl SlugAssignment {
    pub fn needs_patch(&self) -> bool {
        self.current.as_deref() != Some(self.slug.as_str())
    }
}

/// Give every row a unique slug. Rows are processed in input order; a row
/// whose base slug is already claimed gets `-2`, `-3`, ... appended.
pub fn assign_unique_slugs(rows: &[MemberSlugRow]) -> Vec<SlugAssignment> {
    let mut taken = HashSet::with_capacity(rows.len());

    rows.iter()
        .map(|row| {
            let base = candidate_slug(row);
            let mut slug = base.clone();
            let mut suffix = 2;
            while !taken.insert(slug.clone()) {
                slug = format!("{base}-{suffix}");
                suffix += 1;
            }

            SlugAssignment {
                id: row.id.clone(),
                current: row.slug.clone(),
                slug,
            }
        })
        .collect()
}

/// Counts logged before and after enforcement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SlugAudit {
    pub total: usize,
    pub empty: usize,
    /// Rows whose slug was already used by an earlier row
    pub duplicates: usize,
}

pub fn audit_slugs(rows: &[MemberSlugRow]) -> SlugAudit {
    let mut seen = HashSet::new();
    let mut audit = SlugAudit {
        total: rows.len(),
        ..SlugAudit::default()
    };

    for row in rows {
        match row.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            None => audit.empty += 1,
            Some(slug) => {
                if !seen.insert(slug) {
                    audit.duplicates += 1;
                }
            }
        }
    }

    audit
}
