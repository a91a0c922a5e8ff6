//! # Error Types
//!
//! Domain-specific error types for pizza-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pizza-core errors (this file)                                         │
//! │  ├── CoreError        - Parsing of codes and units                     │
//! │  └── ValidationError  - Raw user input rejected before it is a Pizza   │
//! │                                                                         │
//! │  pizza-settings errors (separate crate)                                │
//! │  └── SettingsError    - InvalidCurrency, storage, config               │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the user sees (code + message)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in this crate is fatal. Lookups fall back to defaults and the
//! comparison functions are total, so these errors only surface from parsing.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised when parsing domain codes.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Currency code is not in the known ISO 4217 set.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Distance unit is neither `cm` nor `in`.
    #[error("Unknown distance unit: '{0}'. Valid options: cm, in")]
    UnknownDistanceUnit(String),

    /// Country code is not two uppercase ASCII letters.
    #[error("Invalid country code: {0}")]
    InvalidCountryCode(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by [`crate::validation`] when raw text from the input collaborator
/// cannot become a pizza attribute. A [`crate::Pizza`] never sees these values.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field is not a number.
    #[error("{field} must be a number, got '{value}'")]
    InvalidNumber { field: String, value: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not have a fractional part.
    #[error("{field} must be a whole number")]
    MustBeWholeNumber { field: String },

    /// Value is below the smallest accepted input.
    #[error("{field} must be at least {min}")]
    BelowMinimum { field: String, min: f64 },

    /// Currency code is not recognized.
    #[error("'{code}' is not a known currency code")]
    UnknownCurrency { code: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::UnknownDistanceUnit("mm".to_string());
        assert_eq!(
            err.to_string(),
            "Unknown distance unit: 'mm'. Valid options: cm, in"
        );

        let err = ValidationError::BelowMinimum {
            field: "price".to_string(),
            min: 0.01,
        };
        assert_eq!(err.to_string(), "price must be at least 0.01");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "diameter".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
