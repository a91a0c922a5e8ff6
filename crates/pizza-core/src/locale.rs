//! # Locale Resolution
//!
//! Derives a country from the ranked locale tags the host environment
//! provides.
//!
//! ## Resolution Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  languages: ["fr", "zh-Hant-TW", "en-US"]     fallback: "en-US"         │
//! │                                                                         │
//! │  "fr"          ──► no region subtag                                     │
//! │  "zh-Hant-TW"  ──► "-Ha" rejected (lowercase), "-TW" accepted ──► TW    │
//! │                                                                         │
//! │  First match wins. The fallback tag is only consulted when no          │
//! │  language yields a region. No region at all → None → table defaults.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::types::CountryCode;
use crate::DEFAULT_FALLBACK_LOCALE;

/// Extracts the region subtag from a single locale tag.
///
/// A region is a `-` followed by exactly two uppercase ASCII letters that are
/// not followed by another word character (letter, digit or `_`).
///
/// ```rust
/// use pizza_core::locale::country_from_tag;
///
/// assert_eq!(country_from_tag("en-US").unwrap().as_str(), "US");
/// assert_eq!(country_from_tag("sr-Latn-RS").unwrap().as_str(), "RS");
/// assert!(country_from_tag("en-us").is_none());
/// assert!(country_from_tag("es-419").is_none());
/// ```
pub fn country_from_tag(tag: &str) -> Option<CountryCode> {
    let bytes = tag.as_bytes();
    (0..bytes.len()).find_map(|i| {
        let region = bytes.get(i + 1..i + 3)?;
        let terminated = bytes.get(i + 3).map_or(true, |next| !is_word_byte(*next));
        if bytes[i] == b'-' && region.iter().all(u8::is_ascii_uppercase) && terminated {
            CountryCode::parse(&tag[i + 1..i + 3])
        } else {
            None
        }
    })
}

/// Resolves a country from `locales` (most preferred first), then `fallback`.
///
/// Returns `None` when no tag carries a region. That is the documented path
/// to the table defaults, not an error.
pub fn resolve_country<S: AsRef<str>>(locales: &[S], fallback: &str) -> Option<CountryCode> {
    locales
        .iter()
        .find_map(|tag| country_from_tag(tag.as_ref()))
        .or_else(|| country_from_tag(fallback))
}

/// Converts a POSIX locale value (`en_US.UTF-8`, `de_DE@euro`) to a
/// BCP-47-like tag (`en-US`, `de-DE`).
///
/// Returns `None` for the `C`/`POSIX` locales and empty values.
pub fn normalize_posix_locale(value: &str) -> Option<String> {
    let base = value
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim();

    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }

    Some(base.replace('_', "-"))
}

fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

// =============================================================================
// Locale Preferences
// =============================================================================

/// The host's locale input: ranked language tags plus one fallback tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalePreferences {
    /// Language tags, most preferred first.
    #[serde(default)]
    pub languages: Vec<String>,

    /// Consulted when no language yields a region.
    #[serde(default = "default_fallback")]
    pub fallback: String,
}

fn default_fallback() -> String {
    DEFAULT_FALLBACK_LOCALE.to_string()
}

impl Default for LocalePreferences {
    fn default() -> Self {
        LocalePreferences {
            languages: Vec::new(),
            fallback: default_fallback(),
        }
    }
}

impl LocalePreferences {
    pub fn new(languages: Vec<String>, fallback: impl Into<String>) -> Self {
        LocalePreferences {
            languages,
            fallback: fallback.into(),
        }
    }

    /// Resolves the user's country. See [`resolve_country`].
    pub fn resolve_country(&self) -> Option<CountryCode> {
        resolve_country(&self.languages, &self.fallback)
    }

    /// The locale handed to the formatting collaborator: the most preferred
    /// language, or the fallback when none are set.
    pub fn primary_locale(&self) -> &str {
        self.languages
            .iter()
            .map(|tag| tag.trim())
            .find(|tag| !tag.is_empty())
            .unwrap_or(&self.fallback)
    }
}
