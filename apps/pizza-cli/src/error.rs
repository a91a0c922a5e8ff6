//! # CLI Error Type
//!
//! Unified error type for every command.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ValidationError ── "price must be at least 0.01" ──┐                   │
//! │  CoreError ──────── "Unknown distance unit ..." ────┤                   │
//! │  SettingsError ──── InvalidCurrency / Storage ──────┼──► CliError       │
//! │  serde_json::Error ─────────────────────────────────┘    code + message │
//! │                                                                │        │
//! │                                        stderr (text or JSON) ◄─┤        │
//! │                                        process exit code    ◄──┘        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;

use pizza_core::{CoreError, ValidationError};
use pizza_settings::SettingsError;

/// Result type for command functions.
pub type CliResult<T> = Result<T, CliError>;

/// Error returned from commands.
///
/// With `--json` this is what gets printed:
/// ```json
/// {
///   "code": "INVALID_CURRENCY",
///   "message": "'XXY' is not a known currency code"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct CliError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A pizza field or unit was rejected
    InvalidInput,

    /// The currency override is not a known code
    InvalidCurrency,

    /// Config file could not be loaded or is invalid
    ConfigError,

    /// Settings file could not be read or written
    StorageError,

    /// Anything else
    Internal,
}

impl ErrorCode {
    /// Process exit code for this error.
    pub const fn exit_code(&self) -> u8 {
        match self {
            ErrorCode::Internal => 1,
            ErrorCode::InvalidInput | ErrorCode::InvalidCurrency => 2,
            ErrorCode::ConfigError => 3,
            ErrorCode::StorageError => 4,
        }
    }
}

impl CliError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::InvalidInput, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Internal, message)
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::invalid_input(err.to_string())
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownCurrency(code) => CliError::new(
                ErrorCode::InvalidCurrency,
                format!("'{}' is not a known currency code", code),
            ),
            CoreError::Validation(e) => e.into(),
            other => CliError::invalid_input(other.to_string()),
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        match err {
            SettingsError::InvalidCurrency { .. } => {
                CliError::new(ErrorCode::InvalidCurrency, err.to_string())
            }
            SettingsError::Storage(ref e) => {
                tracing::error!("Settings storage failed: {}", e);
                CliError::new(ErrorCode::StorageError, err.to_string())
            }
            ref e if e.is_config_error() => CliError::new(ErrorCode::ConfigError, err.to_string()),
            _ => CliError::internal(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::internal(format!("Failed to render JSON: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_currency_exit_code() {
        let err: CliError = SettingsError::InvalidCurrency { code: "XXY".into() }.into();
        assert_eq!(err.code, ErrorCode::InvalidCurrency);
        assert_eq!(err.code.exit_code(), 2);
        assert_eq!(err.to_string(), "'XXY' is not a known currency code");
    }

    #[test]
    fn test_validation_maps_to_invalid_input() {
        let err: CliError = ValidationError::MustBeWholeNumber {
            field: "count".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(err.message, "count must be a whole number");
    }

    #[test]
    fn test_config_errors() {
        let err: CliError = SettingsError::ConfigLoadFailed("bad toml".into()).into();
        assert_eq!(err.code, ErrorCode::ConfigError);
        assert_eq!(err.code.exit_code(), 3);
    }

    #[test]
    fn test_json_shape() {
        let err = CliError::new(ErrorCode::StorageError, "disk full");
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"code":"STORAGE_ERROR","message":"disk full"}"#);
    }
}
