//! # Domain Types
//!
//! Core domain types used throughout Quote Desk.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────┐   ┌───────────────────┐   ┌──────────────────┐   │
//! │  │    LineItem      │   │ ServiceDefinition │   │    Settings      │   │
//! │  │  ──────────────  │   │ ───────────────── │   │  ──────────────  │   │
//! │  │  id (UUID)       │   │  id (UUID)        │   │  tax_rate        │   │
//! │  │  service_code ───┼──►│  code (business)  │   │  exchange_rate   │   │
//! │  │  detail          │   │  label            │   │  company_profile │   │
//! │  │  hours           │   │  suggestion       │   └──────────────────┘   │
//! │  │  hourly_cost 🔒  │   │  default_hourly_  │                          │
//! │  └──────────────────┘   │    cost           │   ┌──────────────────┐   │
//! │                         └───────────────────┘   │    QuoteMeta     │   │
//! │                                                 │  client, number, │   │
//! │  🔒 = never leaves the app (see export.rs)      │  date, validity  │   │
//! │                                                 └──────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Services have:
//! - `id`: UUID v4, used to address the entry for update/delete
//! - `code`: human-readable, immutable, the foreign key line items hold

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::{finite_or_zero, lenient_f64, lenient_opt_f64, Currency};
use crate::validation::{validate_validity_days, ValidationResult};
use crate::{DEFAULT_EXCHANGE_RATE, DEFAULT_TAX_RATE, DEFAULT_VALIDITY_DAYS};

/// Generates a fresh opaque identifier.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Line Item
// =============================================================================

/// One billable row in a quote.
///
/// `hourly_cost` is internal labor cost: it feeds the subtotal but is never
/// part of the exported document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Unique identifier (UUID v4), never reused.
    pub id: String,

    /// Code of the catalog service this row bills for.
    pub service_code: String,

    /// Free-text description shown on the document.
    #[serde(default)]
    pub detail: String,

    /// Billed hours (fractional allowed).
    #[serde(deserialize_with = "lenient_f64")]
    pub hours: f64,

    /// Cost per hour in the quote's primary currency.
    #[serde(deserialize_with = "lenient_f64")]
    pub hourly_cost: f64,
}

impl LineItem {
    /// Creates a one-hour line item seeded from a catalog service.
    pub fn from_service(service: &ServiceDefinition) -> Self {
        LineItem {
            id: new_id(),
            service_code: service.code.clone(),
            detail: service.suggestion.clone(),
            hours: 1.0,
            hourly_cost: service.default_hourly_cost,
        }
    }

    /// `hours × hourly_cost`, or 0 when either operand (or the product)
    /// is not a finite number.
    pub fn subtotal(&self) -> f64 {
        finite_or_zero(finite_or_zero(self.hours) * finite_or_zero(self.hourly_cost))
    }
}

/// Partial update for a line item. Absent fields are left untouched.
///
/// The service is changed through [`crate::catalog::Catalog::select_service`]
/// because it also reseeds cost and detail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItemPatch {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub hours: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub hourly_cost: Option<f64>,
}

impl LineItemPatch {
    /// Merges the patch into `item`. Negative hours or costs become 0.
    pub fn apply(&self, item: &mut LineItem) {
        if let Some(detail) = &self.detail {
            item.detail = detail.clone();
        }
        if let Some(hours) = self.hours {
            item.hours = finite_or_zero(hours).max(0.0);
        }
        if let Some(cost) = self.hourly_cost {
            item.hourly_cost = finite_or_zero(cost).max(0.0);
        }
    }
}

// =============================================================================
// Service Definition
// =============================================================================

/// A selectable service type in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDefinition {
    /// Unique identifier (UUID v4), distinct from `code`.
    pub id: String,

    /// Short key-safe business identifier. Immutable after creation.
    pub code: String,

    /// Display name.
    pub label: String,

    /// Detail text offered when a line item selects this service.
    pub suggestion: String,

    /// Hourly cost seeded into line items that select this service.
    pub default_hourly_cost: f64,
}

/// Scratch input for the "new service" form.
///
/// Reset to empty after a successful [`crate::catalog::Catalog::add`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDraft {
    #[serde(default)]
    pub label: String,
    /// Derived from `label` when absent or blank.
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub suggestion: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub default_hourly_cost: f64,
}

/// Partial update for a catalog entry. `id` and `code` are not patchable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ServicePatch {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub suggestion: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub default_hourly_cost: Option<f64>,
}

// =============================================================================
// Settings
// =============================================================================

/// Company details printed in the document header. Display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub name: String,
    pub tax_id: String,
    pub email: String,
    pub phone: String,
}

impl Default for CompanyProfile {
    fn default() -> Self {
        CompanyProfile {
            name: "Creative Studio".to_string(),
            tax_id: "00000000000".to_string(),
            email: "hello@studio.example".to_string(),
            phone: "+51 900 000 000".to_string(),
        }
    }
}

/// Process-wide settings edited from the admin panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Fraction applied to the aggregate subtotal (0.18 = 18%).
    ///
    /// Not clamped: values outside [0, 1] flow through to the tax amount.
    pub tax_rate: f64,

    /// Units of PEN per 1 USD.
    pub exchange_rate: f64,

    pub company_profile: CompanyProfile,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            tax_rate: DEFAULT_TAX_RATE,
            exchange_rate: DEFAULT_EXCHANGE_RATE,
            company_profile: CompanyProfile::default(),
        }
    }
}

/// Partial update for [`Settings`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub tax_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub exchange_rate: Option<f64>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub company_tax_id: Option<String>,
    #[serde(default)]
    pub company_email: Option<String>,
    #[serde(default)]
    pub company_phone: Option<String>,
}

impl SettingsPatch {
    /// Merges the patch into `settings`. Rates are coerced, not validated.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(rate) = self.tax_rate {
            settings.tax_rate = finite_or_zero(rate);
        }
        if let Some(rate) = self.exchange_rate {
            settings.exchange_rate = finite_or_zero(rate);
        }

        let profile = &mut settings.company_profile;
        if let Some(name) = &self.company_name {
            profile.name = name.clone();
        }
        if let Some(tax_id) = &self.company_tax_id {
            profile.tax_id = tax_id.clone();
        }
        if let Some(email) = &self.company_email {
            profile.email = email.clone();
        }
        if let Some(phone) = &self.company_phone {
            profile.phone = phone.clone();
        }
    }
}

// =============================================================================
// Quote Meta
// =============================================================================

/// Descriptive quote header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteMeta {
    pub client_name: String,
    pub quote_number: String,
    #[ts(as = "String")]
    pub issue_date: NaiveDate,
    /// Days the quote stays valid, at least 1.
    pub validity_days: u32,
    /// Primary currency: all stored amounts are denominated in it.
    pub currency: Currency,
    #[serde(default)]
    pub notes: String,
}

impl Default for QuoteMeta {
    fn default() -> Self {
        QuoteMeta {
            client_name: String::new(),
            quote_number: "COT-0001".to_string(),
            issue_date: Local::now().date_naive(),
            validity_days: DEFAULT_VALIDITY_DAYS,
            currency: Currency::default(),
            notes: String::new(),
        }
    }
}

/// Partial update for [`QuoteMeta`].
///
/// `validity_days` is signed so out-of-range input can be reported instead
/// of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteMetaPatch {
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub quote_number: Option<String>,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub issue_date: Option<NaiveDate>,
    #[serde(default)]
    pub validity_days: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl QuoteMetaPatch {
    /// Merges the patch into `meta`.
    ///
    /// Validity days are checked first; on error `meta` is left untouched.
    pub fn apply(&self, meta: &mut QuoteMeta) -> ValidationResult<()> {
        let validity_days = self.validity_days.map(validate_validity_days).transpose()?;

        if let Some(client) = &self.client_name {
            meta.client_name = client.clone();
        }
        if let Some(number) = &self.quote_number {
            meta.quote_number = number.clone();
        }
        if let Some(date) = self.issue_date {
            meta.issue_date = date;
        }
        if let Some(days) = validity_days {
            meta.validity_days = days;
        }
        if let Some(notes) = &self.notes {
            meta.notes = notes.clone();
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn service(cost: f64) -> ServiceDefinition {
        ServiceDefinition {
            id: new_id(),
            code: "design".to_string(),
            label: "Graphic design".to_string(),
            suggestion: "Logo and brand identity".to_string(),
            default_hourly_cost: cost,
        }
    }

    #[test]
    fn test_line_item_from_service() {
        let item = LineItem::from_service(&service(40.0));
        assert_eq!(item.service_code, "design");
        assert_eq!(item.detail, "Logo and brand identity");
        assert_eq!(item.hours, 1.0);
        assert_eq!(item.hourly_cost, 40.0);
    }

    #[test]
    fn test_line_item_ids_are_unique() {
        let a = LineItem::from_service(&service(1.0));
        let b = LineItem::from_service(&service(1.0));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_subtotal() {
        let mut item = LineItem::from_service(&service(40.0));
        item.hours = 2.5;
        assert_eq!(item.subtotal(), 100.0);
    }

    #[test]
    fn test_subtotal_non_finite_is_zero() {
        let mut item = LineItem::from_service(&service(40.0));
        item.hours = f64::NAN;
        assert_eq!(item.subtotal(), 0.0);

        item.hours = 2.0;
        item.hourly_cost = f64::INFINITY;
        assert_eq!(item.subtotal(), 0.0);

        item.hours = 1e200;
        item.hourly_cost = 1e200;
        assert_eq!(item.subtotal(), 0.0);
    }

    #[test]
    fn test_line_item_deserializes_malformed_numbers_as_zero() {
        let json = r#"{"id":"1","serviceCode":"design","detail":"x","hours":"abc","hourlyCost":null}"#;
        let item: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.hours, 0.0);
        assert_eq!(item.hourly_cost, 0.0);
    }

    #[test]
    fn test_line_item_patch() {
        let mut item = LineItem::from_service(&service(40.0));
        let patch: LineItemPatch = serde_json::from_str(r#"{"hours":"3"}"#).unwrap();
        patch.apply(&mut item);

        assert_eq!(item.hours, 3.0);
        assert_eq!(item.hourly_cost, 40.0);
        assert_eq!(item.detail, "Logo and brand identity");
    }

    #[test]
    fn test_line_item_patch_clamps_negatives() {
        let mut item = LineItem::from_service(&service(25.0));
        let patch = LineItemPatch {
            hours: Some(-4.0),
            hourly_cost: Some(-10.0),
            ..Default::default()
        };
        patch.apply(&mut item);

        assert_eq!(item.hours, 0.0);
        assert_eq!(item.hourly_cost, 0.0);
        assert_eq!(item.subtotal(), 0.0);

        let mut item = LineItem::from_service(&service(25.0));
        let hours_only = LineItemPatch {
            hours: Some(-4.0),
            ..Default::default()
        };
        hours_only.apply(&mut item);
        assert_eq!(item.subtotal(), 0.0);
    }

    #[test]
    fn test_settings_patch_keeps_rates_unclamped() {
        let mut settings = Settings::default();
        let patch = SettingsPatch {
            tax_rate: Some(1.5),
            company_name: Some("Acme".to_string()),
            ..Default::default()
        };
        patch.apply(&mut settings);

        assert_eq!(settings.tax_rate, 1.5);
        assert_eq!(settings.exchange_rate, DEFAULT_EXCHANGE_RATE);
        assert_eq!(settings.company_profile.name, "Acme");
    }

    #[test]
    fn test_settings_serialize_camel_case() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert!(json.get("taxRate").is_some());
        assert!(json["companyProfile"].get("taxId").is_some());
    }

    #[test]
    fn test_quote_meta_patch_rejects_bad_validity_atomically() {
        let mut meta = QuoteMeta::default();
        let patch = QuoteMetaPatch {
            client_name: Some("Acme".to_string()),
            validity_days: Some(0),
            ..Default::default()
        };

        assert!(patch.apply(&mut meta).is_err());
        assert_eq!(meta.client_name, "");

        let patch = QuoteMetaPatch {
            client_name: Some("Acme".to_string()),
            validity_days: Some(30),
            ..Default::default()
        };
        patch.apply(&mut meta).unwrap();
        assert_eq!(meta.client_name, "Acme");
        assert_eq!(meta.validity_days, 30);
    }

    #[test]
    fn test_quote_meta_default() {
        let meta = QuoteMeta::default();
        assert_eq!(meta.validity_days, DEFAULT_VALIDITY_DAYS);
        assert_eq!(meta.currency, Currency::Usd);
    }
}
