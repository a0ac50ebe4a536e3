//! # Settings Repository
//!
//! Opaque string values under fixed keys. Snapshot shape is not this
//! layer's concern: a stored value comes back exactly as written.
//!
//! ## Keys
//! ```text
//! ┌──────────────────────────┬──────────────────────────────────────────┐
//! │ quote-desk.settings      │ Settings JSON object                     │
//! │ quote-desk.catalog       │ ServiceDefinition JSON array             │
//! └──────────────────────────┴──────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Key of the settings snapshot.
pub const SETTINGS_KEY: &str = "quote-desk.settings";

/// Key of the service catalog snapshot.
pub const CATALOG_KEY: &str = "quote-desk.catalog";

/// Repository for key-value snapshots.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.settings();
/// repo.set(SETTINGS_KEY, &json).await?;
/// let raw: Option<String> = repo.get(SETTINGS_KEY).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SettingsRepository { pool }
    }

    /// Reads the value stored under `key`, `None` when never written.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        debug!(key = %key, found = value.is_some(), "Read snapshot");
        Ok(value)
    }

    /// Writes `value` under `key`, replacing any previous value.
    pub async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        debug!(key = %key, bytes = value.len(), "Wrote snapshot");
        Ok(())
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    async fn repo() -> SettingsRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().settings()
    }

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let repo = repo().await;
        assert_eq!(repo.get(SETTINGS_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let repo = repo().await;
        let json = serde_json::json!({ "taxRate": 0.2 }).to_string();

        repo.set(SETTINGS_KEY, &json).await.unwrap();

        assert_eq!(repo.get(SETTINGS_KEY).await.unwrap().as_deref(), Some(json.as_str()));
        assert_eq!(repo.get(CATALOG_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let repo = repo().await;

        repo.set(CATALOG_KEY, "[]").await.unwrap();
        repo.set(CATALOG_KEY, "[{\"code\":\"web\"}]").await.unwrap();

        assert_eq!(
            repo.get(CATALOG_KEY).await.unwrap().as_deref(),
            Some("[{\"code\":\"web\"}]")
        );
    }

    #[tokio::test]
    async fn test_values_are_stored_verbatim() {
        let repo = repo().await;

        repo.set(SETTINGS_KEY, "not json at all").await.unwrap();
        assert_eq!(
            repo.get(SETTINGS_KEY).await.unwrap().as_deref(),
            Some("not json at all")
        );
    }
}
