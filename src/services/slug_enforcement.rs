//! One-shot job that gives every member a unique, normalized slug and then
//! locks the field down in the CMS schema.

use crate::services::{
    directus::DirectusError,
    slug::{MemberSlugRow, SlugAudit, assign_unique_slugs, audit_slugs},
};
use serde::Serialize;
use std::future::Future;
use tracing::info;

/// Member storage the job reads from and writes to
pub trait SlugStore {
    fn list_members(&self) -> impl Future<Output = Result<Vec<MemberSlugRow>, DirectusError>> + Send;

    fn update_slug(&self, id: &str, slug: &str) -> impl Future<Output = Result<(), DirectusError>> + Send;

    /// Make the slug field required, unique and non-nullable.
    fn enforce_unique_slugs(&self) -> impl Future<Output = Result<(), DirectusError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlugEnforcementReport {
    pub before: SlugAudit,
    pub after: SlugAudit,
    pub updated: usize,
}

/// Audit, patch every row whose slug changes, apply the schema constraint,
/// then audit again. Patches run one at a time; the first failure aborts.
pub async fn run_slug_enforcement<S: SlugStore>(store: &S) -> Result<SlugEnforcementReport, DirectusError> {
    let rows = store.list_members().await?;
    let before = audit_slugs(&rows);
    info!(
        total = before.total,
        empty = before.empty,
        duplicates = before.duplicates,
        "Member slug audit before enforcement"
    );

    let mut updated = 0;
    for assignment in assign_unique_slugs(&rows).iter().filter(|a| a.needs_patch()) {
        info!(
            id = %assignment.id,
            from = ?assignment.current,
            to = %assignment.slug,
            "Updating member slug"
        );
        store.update_slug(&assignment.id, &assignment.slug).await?;
        updated += 1;
    }

    store.enforce_unique_slugs().await?;
    info!("Slug field marked required and unique");

    let after = audit_slugs(&store.list_members().await?);
    info!(
        total = after.total,
        empty = after.empty,
        duplicates = after.duplicates,
        updated,
        "Member slug audit after enforcement"
    );

    Ok(SlugEnforcementReport { before, after, updated })
}
