//! # Export Commands
//!
//! Turns the current quote into a document through a [`DocumentExporter`].
//!
//! ## Export Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  export_quote()                                                         │
//! │       │                                                                 │
//! │       ├── 1. snapshot settings, catalog, quote (locks released)         │
//! │       ├── 2. compute_quote() + build_document()                         │
//! │       │        rows = (label, detail, subtotal) ONLY                    │
//! │       ├── 3. fetch_logo().await                                         │
//! │       │        missing / unreadable → warn!, logo = None                │
//! │       └── 4. exporter.render(&document, "quote-<n>-<client>.pdf")       │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │              ExportArtifact { file_name, bytes, logo_embedded }         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use quote_core::export::{build_document, suggested_file_name};
use quote_core::QuoteDocument;

use crate::error::{ApiError, ExportError};
use crate::state::{AppConfig, CatalogState, QuoteState, SettingsState};

/// Output of an exporter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportArtifact {
    pub file_name: String,

    #[serde(skip)]
    pub bytes: Vec<u8>,

    /// False when the logo asset could not be read. A presentation layer
    /// may use it to tell the operator.
    pub logo_embedded: bool,
}

/// Renders a [`QuoteDocument`] into bytes.
///
/// Implementations receive only the projection: hours and hourly costs
/// are not reachable from it.
pub trait DocumentExporter: Send + Sync {
    /// Renders `document`. `file_name` is a suggestion the exporter may
    /// adjust (e.g. its extension).
    fn render(
        &self,
        document: &QuoteDocument,
        file_name: &str,
    ) -> Result<(String, Vec<u8>), ExportError>;
}

/// Writes the projection as pretty-printed JSON, for previews and for
/// handing off to an external renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl DocumentExporter for JsonExporter {
    fn render(
        &self,
        document: &QuoteDocument,
        file_name: &str,
    ) -> Result<(String, Vec<u8>), ExportError> {
        let bytes = serde_json::to_vec_pretty(document)
            .map_err(|e| ExportError::Render(e.to_string()))?;

        let stem = Path::new(file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("quote");
        Ok((format!("{}.json", stem), bytes))
    }
}

/// Reads the logo asset. Any failure yields `None`; export goes on.
pub async fn fetch_logo(path: &Path) -> Option<Vec<u8>> {
    match tokio::fs::read(path).await {
        Ok(bytes) if !bytes.is_empty() => {
            debug!(path = %path.display(), bytes = bytes.len(), "Logo loaded");
            Some(bytes)
        }
        Ok(_) => {
            warn!(path = %path.display(), "Logo file is empty, exporting without logo");
            None
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Logo unavailable, exporting without logo");
            None
        }
    }
}

/// Builds the document projection for the current quote (no logo).
pub fn preview_document(
    catalog: &CatalogState,
    quote: &QuoteState,
    settings: &SettingsState,
) -> QuoteDocument {
    let settings = settings.snapshot();
    catalog.with_catalog(|c| {
        quote.with_quote(|q| {
            let totals = q.totals(&settings);
            build_document(&q.items, &totals, c, &settings, &q.meta)
        })
    })
}

/// Exports the current quote.
///
/// ## Errors
/// `EXPORT_ERROR` when the exporter fails. A missing logo is not an error.
pub async fn export_quote(
    catalog: &CatalogState,
    quote: &QuoteState,
    settings: &SettingsState,
    config: &AppConfig,
    exporter: &dyn DocumentExporter,
) -> Result<ExportArtifact, ApiError> {
    debug!("export_quote command");

    let mut document = preview_document(catalog, quote, settings);
    let file_name = quote.with_quote(|q| suggested_file_name(&q.meta));

    document.logo = fetch_logo(&config.logo_path).await;
    let logo_embedded = document.logo.is_some();

    let (file_name, bytes) = exporter.render(&document, &file_name)?;

    info!(
        file_name = %file_name,
        rows = document.rows.len(),
        logo_embedded,
        "Quote exported"
    );

    Ok(ExportArtifact {
        file_name,
        bytes,
        logo_embedded,
    })
}
