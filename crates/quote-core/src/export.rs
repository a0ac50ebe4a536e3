//! # Export Projection
//!
//! Builds the read-only [`QuoteDocument`] handed to a document exporter.
//!
//! ## What Leaves the App
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  LineItem { id, service_code, detail, hours, hourly_cost }              │
//! │                      │                                                  │
//! │                      ▼  build_document()                                │
//! │  ExportRow { label, detail, subtotal: "$1,200.00" }                     │
//! │                                                                         │
//! │  hours and hourly_cost are internal labor figures. They are dropped     │
//! │  here and no exporter can recover them.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Figures come from the same [`QuoteTotals`] the screen shows, so the
//! document can never disagree with the on-screen totals.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::money::{format_money, format_percent};
use crate::pricing::QuoteTotals;
use crate::types::{CompanyProfile, LineItem, QuoteMeta, Settings};

/// One printed row: what was done and what it costs, nothing else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    pub label: String,
    pub detail: String,
    pub subtotal: String,
}

/// Formatted totals block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FormattedTotals {
    pub subtotal: String,
    pub tax: String,
    pub total: String,
    /// Total expressed in the other currency, e.g. "S/ 10,000.50".
    pub total_other: String,
}

/// Everything a document exporter receives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDocument {
    pub company: CompanyProfile,
    pub quote_number: String,
    pub client_name: String,
    #[ts(as = "String")]
    pub issue_date: NaiveDate,
    pub validity_days: u32,
    pub currency_code: String,
    pub exchange_rate: f64,
    pub tax_rate: f64,
    /// Tax rate as printed, e.g. "18%".
    pub tax_label: String,
    pub rows: Vec<ExportRow>,
    pub totals: FormattedTotals,
    #[serde(default)]
    pub notes: String,

    /// Raw logo image, when the asset could be fetched.
    #[serde(skip)]
    #[ts(skip)]
    pub logo: Option<Vec<u8>>,
}

/// Projects the current quote into a [`QuoteDocument`].
///
/// `totals` must be the result of `compute_quote` over the same `items`;
/// rows are matched to their subtotal by item id. The logo is attached
/// separately by the caller.
pub fn build_document(
    items: &[LineItem],
    totals: &QuoteTotals,
    catalog: &Catalog,
    settings: &Settings,
    meta: &QuoteMeta,
) -> QuoteDocument {
    let currency = totals.currency;

    let rows = items
        .iter()
        .map(|item| {
            let subtotal = totals
                .line_subtotal(&item.id)
                .unwrap_or_else(|| item.subtotal());
            ExportRow {
                label: catalog.label_for(&item.service_code).to_string(),
                detail: item.detail.clone(),
                subtotal: format_money(subtotal, currency),
            }
        })
        .collect();

    QuoteDocument {
        company: settings.company_profile.clone(),
        quote_number: meta.quote_number.clone(),
        client_name: meta.client_name.clone(),
        issue_date: meta.issue_date,
        validity_days: meta.validity_days,
        currency_code: currency.code().to_string(),
        exchange_rate: settings.exchange_rate,
        tax_rate: settings.tax_rate,
        tax_label: format_percent(settings.tax_rate),
        rows,
        totals: FormattedTotals {
            subtotal: format_money(totals.subtotal, currency),
            tax: format_money(totals.tax, currency),
            total: format_money(totals.total, currency),
            total_other: format_money(totals.total_other, totals.other_currency),
        },
        notes: meta.notes.clone(),
        logo: None,
    }
}

/// Suggested artifact name: `quote-<number>-<client>.pdf`, slugified.
///
/// ## Example
/// ```rust
/// use quote_core::export::suggested_file_name;
/// use quote_core::types::QuoteMeta;
///
/// let meta = QuoteMeta {
///     client_name: "Café Lima".to_string(),
///     ..QuoteMeta::default()
/// };
/// assert_eq!(suggested_file_name(&meta), "quote-cot-0001-cafe-lima.pdf");
/// ```
pub fn suggested_file_name(meta: &QuoteMeta) -> String {
    let parts: Vec<String> = [meta.quote_number.as_str(), meta.client_name.as_str()]
        .iter()
        .map(|part| slug::slugify(part))
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() {
        "quote.pdf".to_string()
    } else {
        format!("quote-{}.pdf", parts.join("-"))
    }
}
