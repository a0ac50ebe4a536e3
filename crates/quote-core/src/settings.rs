//! # Settings Snapshots
//!
//! Loading and saving [`Settings`] as a JSON document.
//!
//! ## Merge Rules
//! ```text
//! stored:   {"taxRate": 0.2}
//! defaults: {taxRate: 0.18, exchangeRate: 3.75, companyProfile: {...}}
//!                │
//!                ▼
//! result:   {taxRate: 0.2,  exchangeRate: 3.75, companyProfile: {...}}
//! ```
//!
//! Every field is merged on its own. A field that is missing or has the
//! wrong type keeps its default; a corrupt document yields the defaults.

use serde_json::{Map, Value};

use crate::money::numeric_or_none;
use crate::types::{CompanyProfile, Settings};

/// Rebuilds settings from a stored snapshot, never failing.
pub fn parse_settings(raw: Option<&str>) -> Settings {
    let mut settings = Settings::default();

    let Some(Value::Object(obj)) = raw.and_then(|r| serde_json::from_str::<Value>(r).ok()) else {
        return settings;
    };

    if let Some(rate) = obj.get("taxRate").and_then(numeric_or_none) {
        settings.tax_rate = rate;
    }
    if let Some(rate) = obj.get("exchangeRate").and_then(numeric_or_none) {
        settings.exchange_rate = rate;
    }
    if let Some(Value::Object(profile)) = obj.get("companyProfile") {
        merge_profile(&mut settings.company_profile, profile);
    }

    settings
}

/// Serializes settings for durable storage.
pub fn to_snapshot(settings: &Settings) -> serde_json::Result<String> {
    serde_json::to_string(settings)
}

fn merge_profile(profile: &mut CompanyProfile, stored: &Map<String, Value>) {
    let fields: [(&str, &mut String); 4] = [
        ("name", &mut profile.name),
        ("taxId", &mut profile.tax_id),
        ("email", &mut profile.email),
        ("phone", &mut profile.phone),
    ];

    for (key, slot) in fields {
        if let Some(value) = stored.get(key).and_then(Value::as_str) {
            *slot = value.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DEFAULT_EXCHANGE_RATE, DEFAULT_TAX_RATE};

    #[test]
    fn test_missing_or_corrupt_yields_defaults() {
        for raw in [None, Some(""), Some("nope"), Some("[1,2]"), Some("null")] {
            assert_eq!(parse_settings(raw), Settings::default(), "input {raw:?}");
        }
    }

    #[test]
    fn test_partial_document_merges_over_defaults() {
        let settings = parse_settings(Some(r#"{"taxRate":0.2}"#));

        assert_eq!(settings.tax_rate, 0.2);
        assert_eq!(settings.exchange_rate, DEFAULT_EXCHANGE_RATE);
        assert_eq!(settings.company_profile, CompanyProfile::default());
    }

    #[test]
    fn test_wrong_types_keep_defaults() {
        let settings = parse_settings(Some(
            r#"{"taxRate":"high","exchangeRate":"3.9","companyProfile":{"name":7,"email":"a@b.pe"}}"#,
        ));

        assert_eq!(settings.tax_rate, DEFAULT_TAX_RATE);
        assert_eq!(settings.exchange_rate, 3.9);
        assert_eq!(settings.company_profile.name, CompanyProfile::default().name);
        assert_eq!(settings.company_profile.email, "a@b.pe");
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut settings = Settings::default();
        settings.tax_rate = 0.0;
        settings.company_profile.phone = "555".to_string();

        let raw = to_snapshot(&settings).unwrap();
        assert_eq!(parse_settings(Some(&raw)), settings);
    }
}
