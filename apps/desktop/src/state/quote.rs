//! # Quote State
//!
//! The quote being edited: header metadata plus ordered line items.
//!
//! ## Thread Safety
//! The quote is wrapped in `Arc<Mutex<T>>` so the command surface is
//! `Send + Sync` for any embedding shell. Edits are short and synchronous;
//! the lock is never held across an `.await`.
//!
//! ## Quote Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operator action           Command                Quote change          │
//! │  ───────────────           ───────                ────────────          │
//! │                                                                         │
//! │  "Add row" ──────────────► add_line_item() ─────► items.push(item)      │
//! │  Edit hours/cost ────────► update_line_item() ──► items[i] patched      │
//! │  Pick service ───────────► select_service() ────► code + cost reseeded  │
//! │  Remove row ─────────────► remove_line_item() ──► items.remove(i)       │
//! │  Edit client/number ─────► update_meta() ───────► meta patched          │
//! │                                                                         │
//! │  Every response carries totals freshly computed by compute_quote().    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use quote_core::{
    compute_quote, CoreError, CoreResult, LineItem, LineItemPatch, QuoteMeta, QuoteTotals,
    ServiceDefinition, Settings,
};

/// The quote under construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Rows in document order.
    pub items: Vec<LineItem>,

    pub meta: QuoteMeta,
}

impl Quote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a one-hour row seeded from `service`.
    pub fn add_item(&mut self, service: &ServiceDefinition) -> &LineItem {
        self.items.push(LineItem::from_service(service));
        &self.items[self.items.len() - 1]
    }

    /// Looks up a row by id for in-place edits.
    pub fn item_mut(&mut self, id: &str) -> CoreResult<&mut LineItem> {
        self.items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| CoreError::LineItemNotFound(id.to_string()))
    }

    /// Merges `patch` into the row with `id`.
    pub fn update_item(&mut self, id: &str, patch: &LineItemPatch) -> CoreResult<()> {
        patch.apply(self.item_mut(id)?);
        Ok(())
    }

    /// Removes the row with `id`.
    pub fn remove_item(&mut self, id: &str) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|i| i.id != id);

        if self.items.len() == initial_len {
            Err(CoreError::LineItemNotFound(id.to_string()))
        } else {
            Ok(())
        }
    }

    /// Removes every row. Metadata is kept.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Runs the pricing engine over the current rows.
    pub fn totals(&self, settings: &Settings) -> QuoteTotals {
        compute_quote(
            &self.items,
            settings.tax_rate,
            settings.exchange_rate,
            self.meta.currency,
        )
    }
}

/// Quote plus its computed totals, as returned by every quote command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteView {
    pub items: Vec<LineItem>,
    pub meta: QuoteMeta,
    pub totals: QuoteTotals,
}

impl QuoteView {
    pub fn new(quote: &Quote, settings: &Settings) -> Self {
        QuoteView {
            items: quote.items.clone(),
            meta: quote.meta.clone(),
            totals: quote.totals(settings),
        }
    }
}

/// Shared quote state.
#[derive(Debug, Clone, Default)]
pub struct QuoteState {
    quote: Arc<Mutex<Quote>>,
}

impl QuoteState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the quote.
    pub fn with_quote<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Quote) -> R,
    {
        let quote = self.quote.lock().unwrap_or_else(PoisonError::into_inner);
        f(&quote)
    }

    /// Executes a function with write access to the quote.
    pub fn with_quote_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Quote) -> R,
    {
        let mut quote = self.quote.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut quote)
    }
}
