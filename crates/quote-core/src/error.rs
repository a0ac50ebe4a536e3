//! # Error Types
//!
//! Domain-specific error types for quote-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  quote-core errors (this file)                                         │
//! │  ├── CoreError        - Catalog / line item rule violations            │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  quote-store errors (separate crate)                                   │
//! │  └── DbError          - Storage operation failures                     │
//! │                                                                         │
//! │  quote-desk errors (in app)                                            │
//! │  └── ApiError         - What the presentation layer sees               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Presentation layer     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only user-facing rule violations live here. Malformed numbers and broken
//! storage snapshots never become errors: they degrade to zero or to the
//! built-in defaults (see [`crate::money`] and [`crate::settings`]).

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// Every variant leaves the state it was raised against unchanged.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No catalog entry has the given id.
    #[error("Service not found: {0}")]
    ServiceNotFound(String),

    /// No catalog entry has the given code.
    #[error("Service code not found: {0}")]
    ServiceCodeNotFound(String),

    /// No line item has the given id.
    #[error("Line item not found: {0}")]
    LineItemNotFound(String),

    /// Deleting would leave the catalog empty.
    ///
    /// ## User Workflow
    /// ```text
    /// Catalog: [design]
    ///      │
    ///      ▼
    /// delete_service(design)
    ///      │
    ///      ▼
    /// LastService  →  UI shows: "At least one service must remain"
    /// ```
    #[error("At least one service must remain in the catalog")]
    LastService,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when operator input doesn't meet requirements.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., a service code with spaces).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate service code).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::Required`].
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
