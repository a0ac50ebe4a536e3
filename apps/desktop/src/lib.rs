//! # Quote Desk Application Library
//!
//! State, commands and startup for the Quote Desk quotation builder. A
//! presentation shell (desktop webview, CLI, tests) embeds this crate and
//! calls into [`commands`].
//!
//! ## Module Organization
//! ```text
//! quote_desk/
//! ├── lib.rs          ◄─── You are here (tracing, bootstrap)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── db.rs       ◄─── Storage handle + load/save contract
//! │   ├── quote.rs    ◄─── Quote under construction
//! │   ├── catalog.rs  ◄─── Service catalog + new-service draft
//! │   ├── settings.rs ◄─── Tax / exchange / company settings
//! │   └── config.rs   ◄─── Paths from env / platform dirs
//! ├── commands/
//! │   ├── quote.rs    ◄─── Line item and header commands
//! │   ├── catalog.rs  ◄─── Catalog CRUD commands
//! │   ├── settings.rs ◄─── Settings commands
//! │   └── export.rs   ◄─── Document export
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod state;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use quote_core::{parse_catalog, parse_settings};
use quote_store::{Database, DbConfig, CATALOG_KEY, SETTINGS_KEY};

use state::{AppConfig, CatalogState, DbState, QuoteState, SettingsState};

/// Default log filter when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info,quote_desk=debug,sqlx=warn";

/// Every state a command may ask for, built once at startup.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: DbState,
    pub settings: SettingsState,
    pub catalog: CatalogState,
    pub quote: QuoteState,
}

/// Opens storage and loads settings and catalog.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Connect to Database ───────────────────────────────────────────────►│
/// │     • SQLite with WAL mode, pending migrations applied                  │
/// │     • Failure: warn!, continue with no storage                          │
/// │                                                                         │
/// │  2. Load Snapshots ────────────────────────────────────────────────────►│
/// │     • quote-desk.settings → parse_settings (defaults per field)         │
/// │     • quote-desk.catalog  → parse_catalog (default catalog if unusable) │
/// │                                                                         │
/// │  3. Initialize State Objects ──────────────────────────────────────────►│
/// │     • Empty quote, header defaults (COT-0001, today, 15 days, USD)      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// Never fails: every problem degrades to defaults.
pub async fn bootstrap(config: AppConfig) -> AppState {
    info!(path = %config.database_path.display(), "Starting Quote Desk");

    let db = match Database::new(DbConfig::new(&config.database_path)).await {
        Ok(db) => DbState::new(db),
        Err(e) => {
            warn!(error = %e, "Storage unavailable, running on defaults without persistence");
            DbState::detached()
        }
    };

    bootstrap_with(config, db).await
}

/// Like [`bootstrap`], with an already opened storage handle.
pub async fn bootstrap_with(config: AppConfig, db: DbState) -> AppState {
    let settings = parse_settings(db.load(SETTINGS_KEY).await.as_deref());
    let catalog = parse_catalog(db.load(CATALOG_KEY).await.as_deref());

    info!(
        services = catalog.len(),
        tax_rate = settings.tax_rate,
        exchange_rate = settings.exchange_rate,
        "State initialized"
    );

    AppState {
        config,
        db,
        settings: SettingsState::new(settings),
        catalog: CatalogState::new(catalog),
        quote: QuoteState::new(),
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=quote_store=trace` - Trace storage only
/// - Default: [`DEFAULT_LOG_FILTER`]
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
