//! # Quote Commands
//!
//! Line item and header edits. None of these touch storage: the quote
//! itself is session state.
//!
//! ## Quote Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────┐     ┌──────────────┐     ┌──────────────┐                 │
//! │  │  Empty   │────►│   Editing    │────►│   Exported   │                 │
//! │  │  quote   │     │              │     │   document   │                 │
//! │  └──────────┘     └──────────────┘     └──────────────┘                 │
//! │                        │                     │                          │
//! │                   add_line_item         export_quote                    │
//! │                   update_line_item      (export.rs)                     │
//! │                   select_service                                        │
//! │                   update_meta                                           │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_line_items ──► back to empty                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use quote_core::{Currency, LineItemPatch, QuoteMetaPatch};

use crate::error::ApiError;
use crate::state::{CatalogState, QuoteState, QuoteView, SettingsState};

fn view(quote: &QuoteState, settings: &SettingsState) -> QuoteView {
    let settings = settings.snapshot();
    quote.with_quote(|q| QuoteView::new(q, &settings))
}

/// Gets the current quote with freshly computed totals.
pub fn get_quote(quote: &QuoteState, settings: &SettingsState) -> QuoteView {
    debug!("get_quote command");
    view(quote, settings)
}

/// Appends a row seeded from the first catalog entry (its code,
/// suggestion and default cost, 1 hour).
pub fn add_line_item(
    catalog: &CatalogState,
    quote: &QuoteState,
    settings: &SettingsState,
) -> QuoteView {
    let service = catalog.with_catalog(|c| c.first().clone());
    debug!(service_code = %service.code, "add_line_item command");

    quote.with_quote_mut(|q| {
        q.add_item(&service);
    });
    view(quote, settings)
}

/// Edits detail, hours or hourly cost of a row. Malformed numbers in the
/// patch have already been coerced to 0.
pub fn update_line_item(
    quote: &QuoteState,
    settings: &SettingsState,
    id: &str,
    patch: &LineItemPatch,
) -> Result<QuoteView, ApiError> {
    debug!(id = %id, "update_line_item command");

    quote.with_quote_mut(|q| q.update_item(id, patch))?;
    Ok(view(quote, settings))
}

/// Points a row at another service.
///
/// Only that row changes: its cost becomes the service default and an
/// untouched detail is replaced by the new suggestion.
pub fn select_service(
    catalog: &CatalogState,
    quote: &QuoteState,
    settings: &SettingsState,
    id: &str,
    code: &str,
) -> Result<QuoteView, ApiError> {
    debug!(id = %id, code = %code, "select_service command");

    catalog.with_catalog(|c| {
        quote.with_quote_mut(|q| {
            let item = q.item_mut(id)?;
            c.select_service(item, code)
        })
    })?;
    Ok(view(quote, settings))
}

/// Removes a row.
pub fn remove_line_item(
    quote: &QuoteState,
    settings: &SettingsState,
    id: &str,
) -> Result<QuoteView, ApiError> {
    debug!(id = %id, "remove_line_item command");

    quote.with_quote_mut(|q| q.remove_item(id))?;
    Ok(view(quote, settings))
}

/// Removes every row, keeping the header.
pub fn clear_line_items(quote: &QuoteState, settings: &SettingsState) -> QuoteView {
    debug!("clear_line_items command");

    quote.with_quote_mut(|q| q.clear());
    view(quote, settings)
}

/// Edits the quote header. An out-of-range validity period is rejected
/// and nothing changes.
pub fn update_meta(
    quote: &QuoteState,
    settings: &SettingsState,
    patch: &QuoteMetaPatch,
) -> Result<QuoteView, ApiError> {
    debug!("update_meta command");

    quote
        .with_quote_mut(|q| patch.apply(&mut q.meta))
        .map_err(|e| ApiError::validation(e.to_string()))?;
    Ok(view(quote, settings))
}

/// Switches the primary currency.
///
/// Stored amounts are relabeled, not converted: conversion is
/// informational only.
pub fn set_currency(quote: &QuoteState, settings: &SettingsState, currency: Currency) -> QuoteView {
    debug!(currency = %currency, "set_currency command");

    quote.with_quote_mut(|q| q.meta.currency = currency);
    view(quote, settings)
}
