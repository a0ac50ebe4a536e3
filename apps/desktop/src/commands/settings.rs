//! # Settings Commands
//!
//! Tax rate, exchange rate and company profile edits from the admin panel.
//! Every change writes the full settings document.

use tracing::{debug, info};

use quote_core::{Settings, SettingsPatch};

use crate::state::{DbState, SettingsState};

/// Gets the current settings.
pub fn get_settings(settings: &SettingsState) -> Settings {
    debug!("get_settings command");
    settings.snapshot()
}

/// Merges `patch` into the settings and persists them.
///
/// Rates are coerced (non-numeric → 0) but not range-checked: a tax rate
/// outside [0, 1] is stored and priced as given.
pub async fn update_settings(
    settings: &SettingsState,
    db: &DbState,
    patch: &SettingsPatch,
) -> Settings {
    debug!(?patch, "update_settings command");

    let (updated, revision) = settings.with_settings_mut(|s| {
        patch.apply(s);
        (s.clone(), db.stamp())
    });

    db.save_settings(revision, &updated).await;
    updated
}

/// Restores default settings and persists them.
pub async fn reset_settings(settings: &SettingsState, db: &DbState) -> Settings {
    debug!("reset_settings command");

    let (defaults, revision) = settings.with_settings_mut(|s| {
        *s = Settings::default();
        (s.clone(), db.stamp())
    });

    db.save_settings(revision, &defaults).await;
    info!("Settings reset to defaults");
    defaults
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote_core::parse_settings;
    use quote_store::{Database, DbConfig, SETTINGS_KEY};

    async fn setup() -> (SettingsState, DbState) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        (SettingsState::new(Settings::default()), DbState::new(db))
    }

    #[tokio::test]
    async fn test_update_persists_full_document() {
        let (settings, db) = setup().await;
        let patch: SettingsPatch =
            serde_json::from_str(r#"{"taxRate":"0.1","companyName":"Acme"}"#).unwrap();

        let updated = update_settings(&settings, &db, &patch).await;

        assert_eq!(updated.tax_rate, 0.1);
        let stored = parse_settings(db.load(SETTINGS_KEY).await.as_deref());
        assert_eq!(stored, updated);
        assert_eq!(stored.company_profile.name, "Acme");
    }

    #[tokio::test]
    async fn test_malformed_rate_becomes_zero() {
        let (settings, db) = setup().await;
        let patch: SettingsPatch = serde_json::from_str(r#"{"exchangeRate":"abc"}"#).unwrap();

        let updated = update_settings(&settings, &db, &patch).await;

        assert_eq!(updated.exchange_rate, 0.0);
    }

    #[tokio::test]
    async fn test_storage_failure_keeps_in_memory_change() {
        let (settings, _) = setup().await;
        let db = DbState::detached();
        let patch = SettingsPatch {
            tax_rate: Some(0.25),
            ..Default::default()
        };

        update_settings(&settings, &db, &patch).await;

        assert_eq!(get_settings(&settings).tax_rate, 0.25);
    }

    #[tokio::test]
    async fn test_reset() {
        let (settings, db) = setup().await;
        let patch = SettingsPatch {
            tax_rate: Some(0.5),
            ..Default::default()
        };
        update_settings(&settings, &db, &patch).await;

        let reset = reset_settings(&settings, &db).await;

        assert_eq!(reset, Settings::default());
        assert_eq!(parse_settings(db.load(SETTINGS_KEY).await.as_deref()), Settings::default());
    }
}
