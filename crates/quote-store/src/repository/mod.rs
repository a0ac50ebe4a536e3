//! # Repository Module
//!
//! Database repository implementations for Quote Desk.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  quote-desk command                                                     │
//! │       │                                                                 │
//! │       │  db.settings().set(CATALOG_KEY, &snapshot)                      │
//! │       ▼                                                                 │
//! │  SettingsRepository                                                     │
//! │  ├── get(&self, key)                                                    │
//! │  └── set(&self, key, value)                                             │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  kv_store table                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`settings::SettingsRepository`] - Key-value snapshot storage

pub mod settings;
