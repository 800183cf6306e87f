//! # Error Types
//!
//! Structured error types for carbeam_core. Every error carries enough context
//! to tell the caller which input to fix without re-running the calculation.
//!
//! Infeasibility is *not* an error: a scenario where no section passes both
//! checks returns [`SelectionResult::Infeasible`](crate::calculations::SelectionResult)
//! with per-candidate margins.
//!
//! ## Example
//!
//! ```rust
//! use carbeam_core::errors::{CalcError, CalcResult};
//!
//! fn validate_span(span_m: f64) -> CalcResult<()> {
//!     if span_m <= 0.0 {
//!         return Err(CalcError::validation(
//!             "span_m",
//!             span_m.to_string(),
//!             "Span must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_span(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for carbeam_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// Malformed or physically invalid input (non-positive span, negative load, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    Validation {
        field: String,
        value: String,
        reason: String,
    },

    /// Empty or degenerate catalog / load set
    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    /// Section identifier not present in the catalog
    #[error("Section not found: {id}")]
    SectionNotFound { id: String },

    /// File I/O or parse error while loading a catalog or settings file
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create a Validation error
    pub fn validation(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::Validation {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a Configuration error
    pub fn configuration(reason: impl Into<String>) -> Self {
        CalcError::Configuration {
            reason: reason.into(),
        }
    }

    /// Create a SectionNotFound error
    pub fn section_not_found(id: impl Into<String>) -> Self {
        CalcError::SectionNotFound { id: id.into() }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// True for errors caused by the caller's inputs rather than by the environment
    pub fn is_input_error(&self) -> bool {
        matches!(self, CalcError::Validation { .. } | CalcError::Configuration { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::Validation { .. } => "VALIDATION_ERROR",
            CalcError::Configuration { .. } => "CONFIGURATION_ERROR",
            CalcError::SectionNotFound { .. } => "SECTION_NOT_FOUND",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

/// Reject non-finite values and values that are not strictly positive.
pub(crate) fn require_positive(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::validation(field, value.to_string(), "Value must be finite"));
    }
    if value <= 0.0 {
        return Err(CalcError::validation(field, value.to_string(), "Value must be positive"));
    }
    Ok(())
}

/// Reject non-finite and negative values; zero is allowed.
pub(crate) fn require_non_negative(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::validation(field, value.to_string(), "Value must be finite"));
    }
    if value < 0.0 {
        return Err(CalcError::validation(field, value.to_string(), "Value must not be negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::validation("span_m", "-5", "Span must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"Validation\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::configuration("x").error_code(), "CONFIGURATION_ERROR");
        assert_eq!(CalcError::section_not_found("IPE 100").error_code(), "SECTION_NOT_FOUND");
        assert_eq!(CalcError::validation("a", "b", "c").error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_input_error_classification() {
        assert!(CalcError::configuration("empty").is_input_error());
        assert!(!CalcError::file_error("open", "x.csv", "missing").is_input_error());
    }

    #[test]
    fn test_positive_guards() {
        assert!(require_positive("x", 1.0).is_ok());
        assert!(require_positive("x", 0.0).is_err());
        assert!(require_positive("x", f64::NAN).is_err());
        assert!(require_non_negative("x", 0.0).is_ok());
        assert!(require_non_negative("x", -0.1).is_err());
        assert!(require_non_negative("x", f64::INFINITY).is_err());
    }
}
