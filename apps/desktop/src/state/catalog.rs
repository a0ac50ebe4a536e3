//! # Catalog State
//!
//! The service catalog plus the admin panel's "new service" draft.
//!
//! ## Lock Order
//! Commands that touch both the catalog and the quote take the catalog
//! lock first. Never the other way around.

use std::sync::{Arc, Mutex, PoisonError};

use quote_core::{Catalog, ServiceDraft};

/// Catalog and its scratch input, guarded together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogEditor {
    pub catalog: Catalog,

    /// Input of the "new service" form, cleared after a successful add.
    pub draft: ServiceDraft,
}

/// Shared catalog state.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    editor: Arc<Mutex<CatalogEditor>>,
}

impl CatalogState {
    pub fn new(catalog: Catalog) -> Self {
        CatalogState {
            editor: Arc::new(Mutex::new(CatalogEditor {
                catalog,
                draft: ServiceDraft::default(),
            })),
        }
    }

    /// Executes a function with read access to the catalog.
    pub fn with_catalog<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Catalog) -> R,
    {
        let editor = self.editor.lock().unwrap_or_else(PoisonError::into_inner);
        f(&editor.catalog)
    }

    /// Executes a function with write access to catalog and draft.
    pub fn with_editor_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CatalogEditor) -> R,
    {
        let mut editor = self.editor.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut editor)
    }

    /// Snapshot of the current draft.
    pub fn draft(&self) -> ServiceDraft {
        let editor = self.editor.lock().unwrap_or_else(PoisonError::into_inner);
        editor.draft.clone()
    }
}
