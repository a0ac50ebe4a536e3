//! # Catalog Commands
//!
//! Admin panel CRUD on the service catalog.
//!
//! ## Every Mutation, Same Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. lock catalog ──► mutate (validation error? return, nothing changed) │
//! │  2.   lock quote ──► reconcile orphaned line items                      │
//! │  3. snapshot catalog + stamp revision, release locks                    │
//! │  4. await save (stale revision skipped, failure logged)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};

use quote_core::{
    import_catalog, Catalog, CoreError, CoreResult, DeleteOutcome, ServiceDefinition,
    ServiceDraft, ServicePatch,
};

use crate::error::ApiError;
use crate::state::{CatalogEditor, CatalogState, DbState, QuoteState};

/// Moves line items whose service vanished to the catalog's first entry.
fn reconcile(catalog: &Catalog, quote: &QuoteState) {
    let moved = quote.with_quote_mut(|q| catalog.reconcile(&mut q.items));
    if moved > 0 {
        info!(moved, fallback = %catalog.first().code, "Reassigned orphaned line items");
    }
}

/// Applies `f` to the catalog, reconciles the quote and persists the
/// result. Nothing is saved when `f` fails.
async fn mutate<F, R>(
    catalog: &CatalogState,
    quote: &QuoteState,
    db: &DbState,
    f: F,
) -> CoreResult<R>
where
    F: FnOnce(&mut CatalogEditor) -> CoreResult<R>,
{
    let (result, snapshot, revision) = catalog.with_editor_mut(|editor| {
        let result = f(editor)?;
        reconcile(&editor.catalog, quote);
        Ok::<_, CoreError>((result, editor.catalog.clone(), db.stamp()))
    })?;

    db.save_catalog(revision, &snapshot).await;
    Ok(result)
}

/// Lists all services in display order.
pub fn get_catalog(catalog: &CatalogState) -> Vec<ServiceDefinition> {
    debug!("get_catalog command");
    catalog.with_catalog(|c| c.services().to_vec())
}

/// Gets the "new service" form input.
pub fn get_service_draft(catalog: &CatalogState) -> ServiceDraft {
    catalog.draft()
}

/// Replaces the "new service" form input.
pub fn update_service_draft(catalog: &CatalogState, draft: ServiceDraft) {
    catalog.with_editor_mut(|editor| editor.draft = draft);
}

/// Adds a service from the current draft.
///
/// ## Errors
/// `VALIDATION_ERROR` for a blank label, an empty derived code or a code
/// already in use. The catalog and the draft are left untouched.
pub async fn add_service(
    catalog: &CatalogState,
    quote: &QuoteState,
    db: &DbState,
) -> Result<ServiceDefinition, ApiError> {
    debug!("add_service command");

    let added = mutate(catalog, quote, db, |editor| {
        editor.catalog.add(&mut editor.draft)
    })
    .await?;

    info!(code = %added.code, "Service added");
    Ok(added)
}

/// Edits label, suggestion or default cost of a service.
///
/// Returns `None` (and saves nothing) when the id is unknown.
pub async fn update_service(
    catalog: &CatalogState,
    quote: &QuoteState,
    db: &DbState,
    id: &str,
    patch: &ServicePatch,
) -> Result<Option<ServiceDefinition>, ApiError> {
    debug!(id = %id, "update_service command");

    let updated = catalog.with_editor_mut(|editor| {
        editor
            .catalog
            .update(id, patch)
            .cloned()
            .map(|service| (service, editor.catalog.clone(), db.stamp()))
    });

    let Some((service, snapshot, revision)) = updated else {
        debug!(id = %id, "update_service: unknown id, nothing changed");
        return Ok(None);
    };

    reconcile(&snapshot, quote);
    db.save_catalog(revision, &snapshot).await;
    Ok(Some(service))
}

/// Deletes a service once `confirm` approves it.
///
/// ## Errors
/// - `NOT_FOUND` when the id is unknown
/// - `BUSINESS_LOGIC` when it is the last service
///
/// A declined confirmation returns [`DeleteOutcome::Cancelled`] and
/// changes nothing.
pub async fn delete_service<F>(
    catalog: &CatalogState,
    quote: &QuoteState,
    db: &DbState,
    id: &str,
    confirm: F,
) -> Result<DeleteOutcome, ApiError>
where
    F: FnOnce(&ServiceDefinition) -> bool,
{
    debug!(id = %id, "delete_service command");

    let outcome = catalog.with_editor_mut(|editor| {
        let outcome = editor.catalog.remove(id, confirm)?;
        let snapshot = match outcome {
            DeleteOutcome::Deleted(_) => {
                reconcile(&editor.catalog, quote);
                Some((editor.catalog.clone(), db.stamp()))
            }
            DeleteOutcome::Cancelled => None,
        };
        Ok::<_, CoreError>((outcome, snapshot))
    });
    let (outcome, snapshot) = outcome?;

    if let Some((snapshot, revision)) = snapshot {
        db.save_catalog(revision, &snapshot).await;
        info!(id = %id, "Service deleted");
    }
    Ok(outcome)
}

/// Replaces the whole catalog with an imported JSON snapshot.
///
/// Entries are cleaned with the load rules; a document with no usable
/// entry is rejected.
pub async fn replace_catalog(
    catalog: &CatalogState,
    quote: &QuoteState,
    db: &DbState,
    snapshot_json: &str,
) -> Result<Vec<ServiceDefinition>, ApiError> {
    debug!(bytes = snapshot_json.len(), "replace_catalog command");

    let imported = import_catalog(snapshot_json)?;
    let services = mutate(catalog, quote, db, move |editor| {
        editor.catalog = imported;
        Ok(editor.catalog.services().to_vec())
    })
    .await?;

    info!(count = services.len(), "Catalog replaced");
    Ok(services)
}

/// Serializes the catalog for backup.
pub fn export_catalog(catalog: &CatalogState) -> Result<String, ApiError> {
    debug!("export_catalog command");
    Ok(catalog.with_catalog(|c| c.to_snapshot())?)
}

/// Restores the built-in catalog.
pub async fn reset_catalog(
    catalog: &CatalogState,
    quote: &QuoteState,
    db: &DbState,
) -> Vec<ServiceDefinition> {
    debug!("reset_catalog command");

    let (snapshot, revision) = catalog.with_editor_mut(|editor| {
        editor.catalog = Catalog::default();
        reconcile(&editor.catalog, quote);
        (editor.catalog.clone(), db.stamp())
    });

    db.save_catalog(revision, &snapshot).await;
    info!("Catalog reset to defaults");
    snapshot.services().to_vec()
}
