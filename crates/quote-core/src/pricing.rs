//! # Pricing Engine
//!
//! The one computation every screen and the exported document share.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       compute_quote()                                   │
//! │                                                                         │
//! │  line items ──► per item: hours × hourly_cost (non-finite → 0)          │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                 subtotal = Σ item subtotals                             │
//! │                 tax      = subtotal × tax_rate                          │
//! │                 total    = subtotal + tax                               │
//! │                        │                                                │
//! │                        ▼                                                │
//! │        informational conversion into the other currency                 │
//! │        (USD → × R, PEN → ÷ R), applied to each figure                   │
//! │                                                                         │
//! │  Pure: same input = same output, no rounding, never fails.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{convert, finite_or_zero, Currency};
use crate::types::LineItem;

/// Subtotal of one line item, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineTotal {
    pub id: String,
    pub subtotal: f64,
}

/// Everything derived from a quote's line items.
///
/// Values are raw (unrounded); format with [`crate::money::format_money`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteTotals {
    /// Per-item subtotals, same order as the input.
    pub lines: Vec<LineTotal>,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    /// Primary currency of the figures above.
    pub currency: Currency,
    /// Currency of the `*_other` figures.
    pub other_currency: Currency,
    pub subtotal_other: f64,
    pub tax_other: f64,
    pub total_other: f64,
}

impl QuoteTotals {
    /// Looks up the subtotal of a line item by id.
    pub fn line_subtotal(&self, id: &str) -> Option<f64> {
        self.lines.iter().find(|l| l.id == id).map(|l| l.subtotal)
    }
}

/// Computes subtotals, tax, total and their conversion into the other
/// currency.
///
/// ## Arguments
/// * `items` - Line items in document order
/// * `tax_rate` - Fraction applied to the subtotal; not clamped
/// * `exchange_rate` - PEN per 1 USD
/// * `primary` - Currency the amounts are denominated in
///
/// ## Example
/// ```rust
/// use quote_core::money::Currency;
/// use quote_core::pricing::compute_quote;
///
/// let totals = compute_quote(&[], 0.18, 3.75, Currency::Usd);
/// assert_eq!(totals.total, 0.0);
/// assert_eq!(totals.other_currency, Currency::Pen);
/// ```
pub fn compute_quote(
    items: &[LineItem],
    tax_rate: f64,
    exchange_rate: f64,
    primary: Currency,
) -> QuoteTotals {
    let lines: Vec<LineTotal> = items
        .iter()
        .map(|item| LineTotal {
            id: item.id.clone(),
            subtotal: item.subtotal(),
        })
        .collect();

    let subtotal = finite_or_zero(lines.iter().map(|l| l.subtotal).sum());
    let tax = finite_or_zero(subtotal * finite_or_zero(tax_rate));
    let total = finite_or_zero(subtotal + tax);

    QuoteTotals {
        lines,
        subtotal,
        tax,
        total,
        currency: primary,
        other_currency: primary.other(),
        subtotal_other: convert(subtotal, primary, exchange_rate),
        tax_other: convert(tax, primary, exchange_rate),
        total_other: convert(total, primary, exchange_rate),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, hours: f64, cost: f64) -> LineItem {
        LineItem {
            id: id.to_string(),
            service_code: "design".to_string(),
            detail: String::new(),
            hours,
            hourly_cost: cost,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_reference_quote() {
        // Subtotals 1200, 400, 660 at 18%
        let items = vec![
            item("a", 30.0, 40.0),
            item("b", 10.0, 40.0),
            item("c", 16.5, 40.0),
        ];
        let totals = compute_quote(&items, 0.18, 3.75, Currency::Usd);

        assert!(close(totals.subtotal, 2260.0));
        assert!(close(totals.tax, 406.8));
        assert!(close(totals.total, 2666.8));
    }

    #[test]
    fn test_line_order_preserved() {
        let items = vec![item("z", 1.0, 1.0), item("a", 2.0, 1.0), item("m", 3.0, 1.0)];
        let totals = compute_quote(&items, 0.0, 1.0, Currency::Usd);

        let ids: Vec<&str> = totals.lines.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "a", "m"]);
        assert_eq!(totals.line_subtotal("m"), Some(3.0));
        assert_eq!(totals.line_subtotal("missing"), None);
    }

    #[test]
    fn test_non_finite_items_count_as_zero() {
        let items = vec![item("a", f64::NAN, 50.0), item("b", 2.0, 50.0)];
        let totals = compute_quote(&items, 0.1, 3.75, Currency::Usd);

        assert_eq!(totals.lines[0].subtotal, 0.0);
        assert!(close(totals.subtotal, 100.0));
        assert!(close(totals.total, 110.0));
    }

    #[test]
    fn test_tax_rate_is_not_clamped() {
        let items = vec![item("a", 1.0, 100.0)];

        let over = compute_quote(&items, 1.5, 1.0, Currency::Usd);
        assert!(close(over.tax, 150.0));
        assert!(close(over.total, 250.0));

        let negative = compute_quote(&items, -0.1, 1.0, Currency::Usd);
        assert!(close(negative.tax, -10.0));
        assert!(close(negative.total, 90.0));
    }

    #[test]
    fn test_non_finite_tax_rate_is_zero() {
        let items = vec![item("a", 1.0, 100.0)];
        let totals = compute_quote(&items, f64::NAN, 1.0, Currency::Usd);
        assert_eq!(totals.tax, 0.0);
        assert_eq!(totals.total, 100.0);
    }

    #[test]
    fn test_conversion_from_usd() {
        let items = vec![item("a", 10.0, 10.0)];
        let totals = compute_quote(&items, 0.18, 3.75, Currency::Usd);

        assert_eq!(totals.other_currency, Currency::Pen);
        assert!(close(totals.subtotal_other, 375.0));
        assert!(close(totals.tax_other, 67.5));
        assert!(close(totals.total_other, 442.5));
    }

    #[test]
    fn test_conversion_from_pen() {
        let items = vec![item("a", 10.0, 37.5)];
        let totals = compute_quote(&items, 0.0, 3.75, Currency::Pen);

        assert_eq!(totals.currency, Currency::Pen);
        assert_eq!(totals.other_currency, Currency::Usd);
        assert!(close(totals.total_other, 100.0));
        // Primary figures are untouched by conversion
        assert!(close(totals.total, 375.0));
    }

    #[test]
    fn test_idempotent() {
        let items = vec![item("a", 1.5, 33.3), item("b", 0.5, 80.0)];
        let first = compute_quote(&items, 0.18, 3.71, Currency::Usd);
        let second = compute_quote(&items, 0.18, 3.71, Currency::Usd);
        assert_eq!(first, second);
    }

    #[test]
    fn test_overflowing_sum_is_zero() {
        let items = vec![item("a", 1e154, 1e154), item("b", 1e154, 1e154)];
        assert!(items[0].subtotal().is_finite());

        let totals = compute_quote(&items, 0.18, 3.75, Currency::Usd);

        assert_eq!(totals.subtotal, 0.0);
        assert_eq!(totals.tax, 0.0);
        assert_eq!(totals.total, 0.0);
        assert_eq!(totals.total_other, 0.0);
    }
}
