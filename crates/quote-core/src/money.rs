//! # Money Module
//!
//! Currencies, display formatting, conversion, and the numeric coercion
//! helpers every amount passes through.
//!
//! ## Why Floats Here?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  QUOTES, NOT LEDGERS                                                    │
//! │                                                                         │
//! │  A quote is recomputed from scratch on every edit:                      │
//! │    hours (0.5 steps) × hourly cost → subtotal → tax → total             │
//! │                                                                         │
//! │  Nothing is accumulated across recomputations, so values stay raw      │
//! │  f64 and are rounded ONLY when formatted for display/export.            │
//! │                                                                         │
//! │    compute_quote() ──► 406.8 (raw) ──► format_money() ──► "$406.80"     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use quote_core::money::{format_money, parse_numeric, Currency};
//!
//! assert_eq!(format_money(2666.8, Currency::Usd), "$2,666.80");
//! assert_eq!(format_money(1500.0, Currency::Pen), "S/ 1,500.00");
//!
//! // Malformed input never fails, it becomes zero
//! assert_eq!(parse_numeric("abc"), 0.0);
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Currency
// =============================================================================

/// The two currencies a quote can be issued in.
///
/// One fixed exchange rate `R` relates them: `R` units of [`Currency::Pen`]
/// per 1 unit of [`Currency::Usd`] (the reference currency).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US dollar, the reference currency.
    #[default]
    Usd,
    /// Peruvian sol.
    Pen,
}

impl Currency {
    /// ISO 4217 code.
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Pen => "PEN",
        }
    }

    /// Symbol as printed before the amount, including any spacing.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Pen => "S/ ",
        }
    }

    /// Number of minor-unit digits.
    pub const fn decimals(&self) -> u32 {
        2
    }

    /// The currency not currently selected.
    pub const fn other(&self) -> Currency {
        match self {
            Currency::Usd => Currency::Pen,
            Currency::Pen => Currency::Usd,
        }
    }

    /// Parses an ISO code, case-insensitively.
    pub fn from_code(code: &str) -> Option<Currency> {
        match code.trim().to_ascii_uppercase().as_str() {
            "USD" => Some(Currency::Usd),
            "PEN" => Some(Currency::Pen),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// =============================================================================
// Conversion
// =============================================================================

/// Converts `amount` from `from` into the other currency.
///
/// ## Rule
/// ```text
/// from = USD  →  amount × R
/// from = PEN  →  amount ÷ R
/// ```
///
/// A non-finite or non-positive rate yields 0 rather than ±∞/NaN.
///
/// ## Example
/// ```rust
/// use quote_core::money::{convert, Currency};
///
/// assert_eq!(convert(100.0, Currency::Usd, 3.75), 375.0);
/// assert_eq!(convert(375.0, Currency::Pen, 3.75), 100.0);
/// ```
pub fn convert(amount: f64, from: Currency, rate: f64) -> f64 {
    if !rate.is_finite() || rate <= 0.0 {
        return 0.0;
    }

    let converted = match from {
        Currency::Usd => amount * rate,
        Currency::Pen => amount / rate,
    };
    finite_or_zero(converted)
}

// =============================================================================
// Formatting
// =============================================================================

/// Formats an amount with the currency's symbol, thousands grouping and
/// minor-unit digits.
///
/// Rounding (half away from zero) happens here and nowhere else.
/// Non-finite amounts are shown as zero.
pub fn format_money(amount: f64, currency: Currency) -> String {
    let amount = finite_or_zero(amount);
    let decimals = currency.decimals();
    let factor = 10_u64.pow(decimals);

    let minor = (amount.abs() * factor as f64).round() as u64;
    let whole = minor / factor;
    let frac = minor % factor;
    let sign = if amount < 0.0 && minor != 0 { "-" } else { "" };

    format!(
        "{}{}{}.{:0width$}",
        sign,
        currency.symbol(),
        group_thousands(whole),
        frac,
        width = decimals as usize
    )
}

/// Formats a fractional rate as a percentage ("0.18" → "18%").
pub fn format_percent(rate: f64) -> String {
    let pct = finite_or_zero(rate) * 100.0;
    let rounded = (pct * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}%", rounded as i64)
    } else {
        format!("{}%", rounded)
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

// =============================================================================
// Numeric Coercion
// =============================================================================
// Every number that reaches the pricing engine has been through one of these.
// They return a value, never an error.

/// Returns `value` if finite, otherwise 0.
#[inline]
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Parses operator text into a number, treating anything unparsable or
/// non-finite as 0.
///
/// ## Example
/// ```rust
/// use quote_core::money::parse_numeric;
///
/// assert_eq!(parse_numeric(" 7.5 "), 7.5);
/// assert_eq!(parse_numeric(""), 0.0);
/// assert_eq!(parse_numeric("NaN"), 0.0);
/// ```
pub fn parse_numeric(input: &str) -> f64 {
    input
        .trim()
        .parse::<f64>()
        .map(finite_or_zero)
        .unwrap_or(0.0)
}

/// Coerces an arbitrary JSON value into a number (numbers and numeric
/// strings pass, everything else is 0).
pub fn coerce_numeric(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().map(finite_or_zero).unwrap_or(0.0),
        Value::String(s) => parse_numeric(s),
        _ => 0.0,
    }
}

/// Like [`coerce_numeric`], but `None` when the value is not numeric at all.
///
/// Used where a bad value should keep a default instead of becoming 0.
pub fn numeric_or_none(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Serde adapter: deserializes any JSON value into an `f64` via
/// [`coerce_numeric`].
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_numeric(&value))
}

/// Serde adapter for optional patch fields: `null` stays `None`, anything
/// else is coerced.
pub fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(None),
        other => Ok(Some(coerce_numeric(&other))),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
