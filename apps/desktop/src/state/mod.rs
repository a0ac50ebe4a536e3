//! # State Module
//!
//! Application state, split into focused types.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌────────────┐ ┌──────────────┐ ┌──────────────┐ ┌────────────────┐   │
//! │  │  DbState   │ │  QuoteState  │ │ CatalogState │ │ SettingsState  │   │
//! │  │            │ │              │ │              │ │                │   │
//! │  │  Option<   │ │  Arc<Mutex<  │ │  Arc<Mutex<  │ │  Arc<Mutex<    │   │
//! │  │  Database> │ │    Quote>>   │ │   Catalog +  │ │    Settings>>  │   │
//! │  │            │ │              │ │   Draft>>    │ │                │   │
//! │  └────────────┘ └──────────────┘ └──────────────┘ └────────────────┘   │
//! │                                                                         │
//! │  ┌────────────┐                                                        │
//! │  │ AppConfig  │  read-only paths (database, logo)                      │
//! │  └────────────┘                                                        │
//! │                                                                         │
//! │  Each command takes only the states it needs.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod catalog;
mod config;
mod db;
mod quote;
mod settings;

pub use catalog::{CatalogEditor, CatalogState};
pub use config::{AppConfig, DB_PATH_VAR, LOGO_PATH_VAR};
pub use db::DbState;
pub use quote::{Quote, QuoteState, QuoteView};
pub use settings::SettingsState;
