//! # Configuration State
//!
//! Where things live on disk, resolved once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`QUOTE_DESK_*`)
//! 2. Platform data directory (`directories::ProjectDirs`)
//! 3. Current working directory
//!
//! Business settings (tax, exchange rate, company) are NOT configuration:
//! they are edited at runtime and persisted through [`super::SettingsState`].
//!
//! ## Thread Safety
//! Read-only after initialization, so no mutex needed.

use directories::ProjectDirs;
use serde::Serialize;
use std::path::PathBuf;

/// Overrides the database file location.
pub const DB_PATH_VAR: &str = "QUOTE_DESK_DB_PATH";

/// Overrides the logo asset embedded in exported documents.
pub const LOGO_PATH_VAR: &str = "QUOTE_DESK_LOGO_PATH";

const DB_FILE_NAME: &str = "quote-desk.db";
const LOGO_FILE_NAME: &str = "logo.png";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// SQLite file holding the settings and catalog snapshots.
    pub database_path: PathBuf,

    /// Image embedded in exported documents. A missing file is not an error.
    pub logo_path: PathBuf,
}

impl AppConfig {
    /// Resolves configuration from the process environment.
    ///
    /// ## Platform-Specific Defaults
    /// - **macOS**: `~/Library/Application Support/com.quotedesk.Quote-Desk/`
    /// - **Windows**: `%APPDATA%\quotedesk\Quote Desk\data\`
    /// - **Linux**: `~/.local/share/quote-desk/`
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = ProjectDirs::from("com", "quotedesk", "Quote Desk")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        let from_var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        };

        AppConfig {
            database_path: from_var(DB_PATH_VAR).unwrap_or_else(|| data_dir.join(DB_FILE_NAME)),
            logo_path: from_var(LOGO_PATH_VAR).unwrap_or_else(|| data_dir.join(LOGO_FILE_NAME)),
        }
    }
}
