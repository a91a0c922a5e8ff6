//! # Settings Error Types
//!
//! Error types for the settings store, its backends and its configuration.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Settings Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  User Input     │  │   Storage       │  │     Configuration       │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidCurrency│  │  Storage        │  │  InvalidConfig          │ │
//! │  │                 │  │                 │  │  ConfigLoadFailed       │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `InvalidCurrency` is the only error a user can trigger directly. It is
//! always raised before anything is written.

use thiserror::Error;

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Settings error type.
#[derive(Debug, Error)]
pub enum SettingsError {
    // =========================================================================
    // User Input Errors
    // =========================================================================
    /// The currency override is not a known currency code.
    #[error("'{code}' is not a known currency code")]
    InvalidCurrency { code: String },

    // =========================================================================
    // Storage Errors
    // =========================================================================
    /// The key-value backend failed to read or write.
    #[error("Settings storage error: {0}")]
    Storage(String),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for SettingsError {
    fn from(err: std::io::Error) -> Self {
        SettingsError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for SettingsError {
    fn from(err: toml::de::Error) -> Self {
        SettingsError::ConfigLoadFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl SettingsError {
    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SettingsError::InvalidConfig(_) | SettingsError::ConfigLoadFailed(_)
        )
    }
}
