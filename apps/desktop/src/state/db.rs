//! # Database State
//!
//! Wraps the optional `Database` and owns the load/save contract for
//! snapshots.
//!
//! ## Persistence Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  load(key)                                                              │
//! │    storage missing / read error  ──► None  (caller uses defaults)       │
//! │                                                                         │
//! │  save_at(revision, key, value)                                          │
//! │    revision older than stored    ──► skipped, newer snapshot kept       │
//! │    write error                   ──► warn!, in-memory state stays       │
//! │                                                                         │
//! │  Neither path returns an error: storage is never allowed to block an    │
//! │  edit.                                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Write Order
//! Saves run after the state lock is released, so two overlapping edits may
//! reach storage out of order. Commands take a revision with [`DbState::stamp`]
//! while still holding the state lock; a write carrying an older revision
//! than the last one written for that key is dropped.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use quote_core::{Catalog, Settings};
use quote_store::{Database, CATALOG_KEY, SETTINGS_KEY};

/// Storage handle for commands.
///
/// `db` is `None` when the database could not be opened at startup; the
/// app then runs on defaults and every save is a logged no-op.
#[derive(Debug, Clone, Default)]
pub struct DbState {
    db: Option<Database>,
    next_revision: Arc<AtomicU64>,
    written: Arc<Mutex<HashMap<String, u64>>>,
}

impl DbState {
    pub fn new(db: Database) -> Self {
        DbState {
            db: Some(db),
            ..Default::default()
        }
    }

    /// State with no backing storage.
    pub fn detached() -> Self {
        DbState::default()
    }

    /// Takes the next write revision. Call it under the lock that guards
    /// the snapshot being saved.
    pub fn stamp(&self) -> u64 {
        self.next_revision.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Returns the inner Database, if storage is available.
    pub fn inner(&self) -> Option<&Database> {
        self.db.as_ref()
    }

    /// Reads the raw snapshot under `key`.
    pub async fn load(&self, key: &str) -> Option<String> {
        let db = self.db.as_ref()?;

        match db.settings().get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read snapshot, using defaults");
                None
            }
        }
    }

    /// Writes a raw snapshot under `key` with a fresh revision.
    pub async fn save(&self, key: &str, value: &str) {
        let revision = self.stamp();
        self.save_at(revision, key, value).await;
    }

    /// Writes a raw snapshot under `key`, logging instead of failing.
    ///
    /// Does nothing when a later revision of `key` was already written.
    pub async fn save_at(&self, revision: u64, key: &str, value: &str) {
        let Some(db) = self.db.as_ref() else {
            debug!(key = %key, "No storage attached, snapshot not persisted");
            return;
        };

        let mut written = self.written.lock().await;
        if written.get(key).is_some_and(|&last| last >= revision) {
            debug!(key = %key, revision, "Stale snapshot, newer one already written");
            return;
        }

        match db.settings().set(key, value).await {
            Ok(()) => {
                written.insert(key.to_string(), revision);
            }
            Err(e) => warn!(key = %key, error = %e, "Failed to persist snapshot"),
        }
    }

    /// Persists the full settings document.
    pub async fn save_settings(&self, revision: u64, settings: &Settings) {
        match quote_core::settings::to_snapshot(settings) {
            Ok(json) => self.save_at(revision, SETTINGS_KEY, &json).await,
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    /// Persists the full catalog document.
    pub async fn save_catalog(&self, revision: u64, catalog: &Catalog) {
        match catalog.to_snapshot() {
            Ok(json) => self.save_at(revision, CATALOG_KEY, &json).await,
            Err(e) => warn!(error = %e, "Failed to serialize catalog"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote_store::DbConfig;

    #[tokio::test]
    async fn test_detached_state_loads_nothing_and_saves_silently() {
        let state = DbState::detached();

        state.save(SETTINGS_KEY, "{}").await;
        assert_eq!(state.load(SETTINGS_KEY).await, None);
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let state = DbState::new(db);

        state.save_settings(state.stamp(), &Settings::default()).await;
        let raw = state.load(SETTINGS_KEY).await.unwrap();

        assert_eq!(quote_core::parse_settings(Some(&raw)), Settings::default());
    }

    #[tokio::test]
    async fn test_write_failure_is_swallowed() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;
        let state = DbState::new(db);

        // Closed pool: both paths degrade instead of erroring
        state.save_catalog(state.stamp(), &Catalog::default()).await;
        assert_eq!(state.load(CATALOG_KEY).await, None);
    }

    #[tokio::test]
    async fn test_stale_revision_does_not_overwrite_newer_snapshot() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let state = DbState::new(db);

        let older = state.stamp();
        let newer = state.stamp();
        assert!(newer > older);

        // The later edit reaches storage first
        state.save_at(newer, SETTINGS_KEY, "newer").await;
        state.save_at(older, SETTINGS_KEY, "older").await;

        assert_eq!(state.load(SETTINGS_KEY).await.as_deref(), Some("newer"));
    }

    #[tokio::test]
    async fn test_revisions_are_tracked_per_key() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let state = DbState::new(db);

        let settings_rev = state.stamp();
        let catalog_rev = state.stamp();
        state.save_at(catalog_rev, CATALOG_KEY, "[]").await;
        state.save_at(settings_rev, SETTINGS_KEY, "{}").await;

        assert_eq!(state.load(SETTINGS_KEY).await.as_deref(), Some("{}"));
        assert_eq!(state.load(CATALOG_KEY).await.as_deref(), Some("[]"));
    }
}
