//! # API Error Type
//!
//! Unified error type for commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Quote Desk                             │
//! │                                                                         │
//! │  Presentation layer            Rust Backend                             │
//! │  ──────────────────            ────────────                             │
//! │                                                                         │
//! │  add_service(draft)                                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function  →  Result<T, ApiError>                        │  │
//! │  │         │                                                        │  │
//! │  │  Validation Error? ─── CoreError::Validation ──┐                 │  │
//! │  │  Exporter failed?  ─── ExportError ────────────┼──► ApiError ───►│  │
//! │  │  Success ──────────────────────────────────────────────────────► │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Storage writes never reach this type: they are logged and dropped.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;

use quote_core::CoreError;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "Duplicate code: 'design' already exists"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Line item or service not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Business rule refused the operation (e.g. deleting the last service)
    BusinessLogic,

    /// Document exporter failed
    ExportError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ServiceNotFound(id) => ApiError::not_found("Service", &id),
            CoreError::ServiceCodeNotFound(code) => ApiError::not_found("Service code", &code),
            CoreError::LineItemNotFound(id) => ApiError::not_found("Line item", &id),
            CoreError::LastService => {
                ApiError::new(ErrorCode::BusinessLogic, CoreError::LastService.to_string())
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

/// Failure reported by a [`crate::commands::export::DocumentExporter`].
#[derive(Debug, Error)]
pub enum ExportError {
    /// The exporter could not lay out or encode the document.
    #[error("Failed to render document: {0}")]
    Render(String),
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        ApiError::new(ErrorCode::ExportError, err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::internal(format!("Serialization failed: {}", err))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use quote_core::ValidationError;

    #[test]
    fn test_core_errors_map_to_codes() {
        let err: ApiError = CoreError::LastService.into();
        assert_eq!(err.code, ErrorCode::BusinessLogic);

        let err: ApiError = CoreError::ServiceNotFound("abc".into()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(err.message.contains("abc"));

        let err: ApiError = CoreError::from(ValidationError::required("label")).into();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_serializes_screaming_snake_code() {
        let err = ApiError::new(ErrorCode::ExportError, "boom");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "EXPORT_ERROR");
        assert_eq!(json["message"], "boom");
    }
}
