//! # quote-core: Pure Quoting Logic for Quote Desk
//!
//! Pricing, catalog rules and document projection for service quotes,
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Quote Desk Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Presentation layer (external)                  │   │
//! │  │     Line items ──► Totals panel ──► Admin panel ──► Export      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                quote-desk commands (apps/desktop)               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ quote-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌────────┐ │   │
//! │  │   │  money  │ │ pricing │ │ catalog │ │ settings │ │ export │ │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └──────────┘ └────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO LOGGING • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              quote-store (SQLite key-value snapshots)           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, ServiceDefinition, Settings, QuoteMeta)
//! - [`money`] - Currencies, formatting, conversion, numeric coercion
//! - [`pricing`] - The quote pricing engine
//! - [`catalog`] - Service catalog CRUD and line item reconciliation
//! - [`settings`] - Settings snapshot parsing
//! - [`export`] - Document projection for exporters
//! - [`validation`] - Input rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use quote_core::catalog::Catalog;
//! use quote_core::money::{format_money, Currency};
//! use quote_core::pricing::compute_quote;
//! use quote_core::types::LineItem;
//!
//! let catalog = Catalog::default();
//! let mut item = LineItem::from_service(catalog.first());
//! item.hours = 10.0;
//! item.hourly_cost = 40.0;
//!
//! let totals = compute_quote(&[item], 0.18, 3.75, Currency::Usd);
//! assert_eq!(format_money(totals.total, Currency::Usd), "$472.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod export;
pub mod money;
pub mod pricing;
pub mod settings;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{import_catalog, parse_catalog, Catalog, DeleteOutcome};
pub use error::{CoreError, CoreResult, ValidationError};
pub use export::{build_document, QuoteDocument};
pub use money::Currency;
pub use pricing::{compute_quote, QuoteTotals};
pub use settings::parse_settings;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Tax rate applied when none has been stored (18%).
pub const DEFAULT_TAX_RATE: f64 = 0.18;

/// PEN per 1 USD when none has been stored.
pub const DEFAULT_EXCHANGE_RATE: f64 = 3.75;

/// Days a new quote stays valid.
pub const DEFAULT_VALIDITY_DAYS: u32 = 15;

/// Upper bound for a quote's validity period.
pub const MAX_VALIDITY_DAYS: i64 = 365;

/// Maximum length of a service code.
///
/// Codes end up in storage keys and file names, so they stay short.
pub const MAX_CODE_LENGTH: usize = 32;

/// Maximum length of a service label.
pub const MAX_LABEL_LENGTH: usize = 120;
