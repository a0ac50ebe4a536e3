//! # Validation Module
//!
//! Input validation for the admin panel and quote header.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation layer                                           │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: quote-core (THIS MODULE)                                     │
//! │  └── Catalog rules: required label, key-safe unique code               │
//! │                                                                         │
//! │  Numbers are NOT validated here: hours, costs and rates are coerced    │
//! │  (see money.rs) so the pricing engine never refuses input.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::{MAX_CODE_LENGTH, MAX_LABEL_LENGTH, MAX_VALIDITY_DAYS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a service label.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 120 characters
///
/// ## Example
/// ```rust
/// use quote_core::validation::validate_label;
///
/// assert!(validate_label("Graphic design").is_ok());
/// assert!(validate_label("   ").is_err());
/// ```
pub fn validate_label(label: &str) -> ValidationResult<()> {
    let label = label.trim();

    if label.is_empty() {
        return Err(ValidationError::required("label"));
    }

    if label.chars().count() > MAX_LABEL_LENGTH {
        return Err(ValidationError::TooLong {
            field: "label".to_string(),
            max: MAX_LABEL_LENGTH,
        });
    }

    Ok(())
}

/// Validates a resolved service code.
///
/// ## Rules
/// - Must not be empty
/// - At most 32 characters
/// - Lowercase ASCII letters, digits, hyphens and underscores only
///
/// ## Example
/// ```rust
/// use quote_core::validation::validate_service_code;
///
/// assert!(validate_service_code("web-dev").is_ok());
/// assert!(validate_service_code("").is_err());
/// assert!(validate_service_code("Web Dev").is_err());
/// ```
pub fn validate_service_code(code: &str) -> ValidationResult<()> {
    if code.is_empty() {
        return Err(ValidationError::required("code"));
    }

    if code.len() > MAX_CODE_LENGTH {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: MAX_CODE_LENGTH,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only lowercase letters, numbers, hyphens, and underscores"
                .to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates the number of days a quote stays valid.
///
/// ## Rules
/// - At least 1
/// - At most 365
pub fn validate_validity_days(days: i64) -> ValidationResult<u32> {
    if !(1..=MAX_VALIDITY_DAYS).contains(&days) {
        return Err(ValidationError::OutOfRange {
            field: "validity days".to_string(),
            min: 1,
            max: MAX_VALIDITY_DAYS,
        });
    }

    Ok(days as u32)
}

// =============================================================================
// Unit Tests
// =============================================================================
