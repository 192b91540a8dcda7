//! Schema migrations for the key-value store.
//!
//! Seeding is keyed by a monotonic schema version stored alongside the
//! data blobs, decoupled from application startup: `run` is invoked once
//! when a store is opened and does nothing when the recorded version is
//! current. Seed templates carry fixed ids, so re-running a migration
//! replaces them instead of duplicating.

use crate::domain::errors::DomainResult;
use crate::domain::models::builtin;
use crate::domain::ports::{KeyValueStore, TemplateRepository};

/// Current schema version. Bump when the seed set or blob layout changes.
pub const SCHEMA_VERSION: u32 = 1;

/// Blob key holding the recorded schema version.
pub const SCHEMA_VERSION_KEY: &str = "schema_version";

/// Bring a store up to `SCHEMA_VERSION`, seeding built-in templates on
/// first initialization. Returns whether any migration ran.
pub async fn run(
    store: &dyn KeyValueStore,
    templates: &dyn TemplateRepository,
) -> DomainResult<bool> {
    let recorded = read_version(store).await?;
    if recorded >= SCHEMA_VERSION {
        tracing::debug!(version = recorded, "Store schema is current");
        return Ok(false);
    }

    if recorded < 1 {
        seed_builtin_templates(templates).await?;
    }

    store
        .set(SCHEMA_VERSION_KEY, &SCHEMA_VERSION.to_string())
        .await?;
    tracing::info!(
        from = recorded,
        to = SCHEMA_VERSION,
        "Migrated workflow store schema"
    );
    Ok(true)
}

async fn read_version(store: &dyn KeyValueStore) -> DomainResult<u32> {
    Ok(store
        .get(SCHEMA_VERSION_KEY)
        .await?
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(0))
}

async fn seed_builtin_templates(templates: &dyn TemplateRepository) -> DomainResult<()> {
    for template in builtin::builtin_templates() {
        tracing::debug!(template_id = %template.id, title = %template.title, "Seeding template");
        templates.save(&template).await?;
    }
    Ok(())
}
