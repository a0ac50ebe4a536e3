//! # Commands Module
//!
//! Every operation a presentation layer can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── quote.rs    ◄─── Line items, header, currency
//! ├── catalog.rs  ◄─── Service catalog CRUD, import/export/reset
//! ├── settings.rs ◄─── Tax, exchange rate, company profile
//! └── export.rs   ◄─── Document export with logo fetch
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the quote
//! quote::remove_line_item(&quote, &settings, &id)
//!
//! // Catalog change: needs the quote too (reconciliation) and storage
//! catalog::delete_service(&catalog, &quote, &db, &id, |s| confirm(s)).await
//! ```
//!
//! Commands that write storage are `async`; everything else is sync.

pub mod catalog;
pub mod export;
pub mod quote;
pub mod settings;
