//! Application-layer use-cases between the raw API clients and the pages.
//!
//! Read use-cases validate the untyped payload row by row and fall back to
//! caller-supplied content when nothing usable survives, including when the
//! backend is unreachable. The site must render something even while the
//! CMS is down, so these functions never return an error. Write use-cases
//! report failure explicitly.

pub mod announcements;
pub mod blog;
pub mod contact;
pub mod members;
pub mod monitoring;

pub use announcements::*;
pub use blog::*;
pub use contact::*;
pub use members::*;
pub use monitoring::*;

use crate::utils::json::data_array;
use serde_json::Value;

/// Validate every entry of the payload's `data` array with `convert`.
/// A payload without a `data` array yields no rows.
pub fn rows_from_payload<T>(payload: &Value, convert: impl Fn(&Value) -> Option<T>) -> Vec<T> {
    data_array(payload)
        .map(|rows| rows.iter().filter_map(convert).collect())
        .unwrap_or_default()
}

/// Survivors truncated to `limit`, or `fallback` untouched when there are none.
pub fn resolve_rows<T>(rows: Vec<T>, fallback: Vec<T>, limit: Option<usize>) -> Vec<T> {
    if rows.is_empty() {
        return fallback;
    }
    match limit {
        Some(limit) => rows.into_iter().take(limit).collect(),
        None => rows,
    }
}
