//! # Settings Configuration
//!
//! Where the settings file lives and which locale the app resolves defaults from.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     PIZZA_SETTINGS_PATH=/tmp/settings.toml                             │
//! │     PIZZA_LANGUAGES=pl-PL,en-US                                        │
//! │     PIZZA_FALLBACK_LOCALE=en-GB                                        │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/pizza-compare/pizza.toml (Linux)                         │
//! │                                                                         │
//! │  3. POSIX locale (only when no languages are configured)               │
//! │     LANGUAGE, LC_ALL, LC_MESSAGES, LANG                                │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     no languages, fallback "en-US", platform settings path             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # pizza.toml
//! [storage]
//! path = "/home/me/.local/share/pizza-compare/settings.toml"
//!
//! [locale]
//! languages = ["pl-PL", "en-US"]
//! fallback = "en-US"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use pizza_core::locale::normalize_posix_locale;
use pizza_core::LocalePreferences;

use crate::backend::TomlFileStore;
use crate::error::{SettingsError, SettingsResult};

/// POSIX variables consulted, in priority order, when no languages are set.
const POSIX_LOCALE_VARS: [&str; 4] = ["LANGUAGE", "LC_ALL", "LC_MESSAGES", "LANG"];

// =============================================================================
// Storage Settings
// =============================================================================

/// Where overrides are persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Settings file. Defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete settings configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub locale: LocalePreferences,
}

impl SettingsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (pizza.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> SettingsResult<Self> {
        Self::load_with(config_path, &process_env)
    }

    /// [`SettingsConfig::load`] with environment variables read through `lookup`.
    pub fn load_with(
        config_path: Option<PathBuf>,
        lookup: &dyn Fn(&str) -> Option<String>,
    ) -> SettingsResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading settings config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides_from(lookup);
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load_or_default_with(config_path, &process_env)
    }

    /// [`SettingsConfig::load_or_default`] with environment variables read
    /// through `lookup`.
    pub fn load_or_default_with(
        config_path: Option<PathBuf>,
        lookup: &dyn Fn(&str) -> Option<String>,
    ) -> Self {
        Self::load_with(config_path, lookup).unwrap_or_else(|e| {
            warn!("Failed to load settings config: {}. Using defaults.", e);
            let mut config = Self::default();
            config.apply_overrides_from(lookup);
            config
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> SettingsResult<()> {
        if self.locale.fallback.trim().is_empty() {
            return Err(SettingsError::InvalidConfig(
                "locale.fallback must not be empty".into(),
            ));
        }

        if self.locale.languages.iter().any(|tag| tag.trim().is_empty()) {
            return Err(SettingsError::InvalidConfig(
                "locale.languages must not contain empty tags".into(),
            ));
        }

        if let Some(path) = &self.storage.path {
            if path.as_os_str().is_empty() {
                return Err(SettingsError::InvalidConfig(
                    "storage.path must not be empty".into(),
                ));
            }
        }

        Ok(())
    }

    /// Applies overrides from `lookup`, which maps a variable name to its value.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("PIZZA_SETTINGS_PATH").filter(|p| !p.trim().is_empty()) {
            debug!(path = %path, "Overriding settings path from environment");
            self.storage.path = Some(PathBuf::from(path));
        }

        if let Some(languages) = lookup("PIZZA_LANGUAGES") {
            let tags: Vec<String> = languages
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(String::from)
                .collect();
            debug!(?tags, "Overriding languages from environment");
            self.locale.languages = tags;
        }

        if let Some(fallback) = lookup("PIZZA_FALLBACK_LOCALE").filter(|f| !f.trim().is_empty()) {
            self.locale.fallback = fallback.trim().to_string();
        }

        if self.locale.languages.is_empty() {
            self.locale.languages = posix_languages(&lookup);
            if !self.locale.languages.is_empty() {
                debug!(languages = ?self.locale.languages, "Using POSIX locale");
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "pizzacompare", "pizza-compare")
            .map(|dirs| dirs.config_dir().join("pizza.toml"))
    }

    /// The settings file to open: the configured path, else the platform default.
    pub fn settings_path(&self) -> Option<PathBuf> {
        self.storage.path.clone().or_else(TomlFileStore::default_path)
    }
}

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Reads the first set POSIX locale variable. `LANGUAGE` may hold a
/// colon-separated priority list.
fn posix_languages(lookup: &impl Fn(&str) -> Option<String>) -> Vec<String> {
    POSIX_LOCALE_VARS
        .iter()
        .filter_map(|var| lookup(*var))
        .find(|value| !value.trim().is_empty())
        .map(|value| value.split(':').filter_map(normalize_posix_locale).collect())
        .unwrap_or_default()
}
