//! # Settings Store
//!
//! Resolves the currency and distance unit the app displays, and persists the
//! user's overrides.
//!
//! ## Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  effective_currency      = currency override                            │
//! │                            ?? currency_for_country(country)             │
//! │                                                                         │
//! │  effective_distance_unit = distance unit override                       │
//! │                            ?? distance_unit_for_country(country)        │
//! │                                                                         │
//! │  country = resolve_country(languages, fallback), once, at open()        │
//! │  no country → USD and cm                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Edit Flow
//! ```text
//!   begin_edit() ──► SettingsDraft ──(user types)──► is_valid()?
//!                                                         │
//!                 ┌───────────────────────────────────────┤
//!                 ▼                                       ▼
//!            revert()                              save_draft()
//!            fresh draft,                          validate → set_many
//!            nothing written                       → overrides → publish
//! ```

use tracing::{debug, info, warn};

use pizza_core::conventions::{currency_for_country, distance_unit_for_country, FALLBACK_CURRENCY};
use pizza_core::validation::validate_currency_code;
use pizza_core::{
    CountryCode, CurrencyCode, DistanceUnit, EffectiveSettings, LocalePreferences,
    ValidationError,
};

use crate::backend::{KeyValueStore, TomlFileStore, CURRENCY_KEY, DISTANCE_UNIT_KEY};
use crate::channel::SettingsChangeChannel;
use crate::config::SettingsConfig;
use crate::error::{SettingsError, SettingsResult};

// =============================================================================
// Settings Draft
// =============================================================================

/// The settings dialog's in-progress values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsDraft {
    /// Currency as typed. Not yet validated or normalized.
    pub currency_text: String,
    pub distance_unit: DistanceUnit,
}

impl SettingsDraft {
    /// Prefills a draft with the given settings.
    pub fn from_effective(settings: EffectiveSettings) -> Self {
        SettingsDraft {
            currency_text: settings.currency.to_string(),
            distance_unit: settings.distance_unit,
        }
    }

    /// True when the typed currency would be accepted by
    /// [`SettingsStore::save_override`]. Drives the enabled state of "save".
    pub fn is_valid(&self) -> bool {
        validate_currency_code(&self.currency_text).is_ok()
    }
}

// =============================================================================
// Settings Store
// =============================================================================

/// Owner of the currency and distance unit overrides.
pub struct SettingsStore {
    backend: Box<dyn KeyValueStore>,
    channel: SettingsChangeChannel,
    country: Option<CountryCode>,
    currency_override: Option<CurrencyCode>,
    distance_unit_override: Option<DistanceUnit>,
}

impl SettingsStore {
    /// Resolves the country and reads both persisted overrides.
    ///
    /// Persisted values that do not parse are ignored (and logged), so a
    /// corrupted entry falls back to the locale default instead of failing.
    pub fn open(
        backend: impl KeyValueStore + 'static,
        locale: &LocalePreferences,
        channel: SettingsChangeChannel,
    ) -> SettingsResult<Self> {
        let country = locale.resolve_country();
        let currency_override = backend
            .get(CURRENCY_KEY)?
            .and_then(|value| parse_persisted_currency(&value));
        let distance_unit_override = backend
            .get(DISTANCE_UNIT_KEY)?
            .and_then(|value| parse_persisted_unit(&value));

        debug!(
            country = country.as_ref().map(CountryCode::as_str),
            currency_override = currency_override.map(|c| c.as_str()),
            distance_unit_override = distance_unit_override.map(|u| u.symbol()),
            "Settings store opened"
        );

        Ok(SettingsStore {
            backend: Box::new(backend),
            channel,
            country,
            currency_override,
            distance_unit_override,
        })
    }

    /// Opens a store on the TOML file `config` points at.
    pub fn from_config(
        config: &SettingsConfig,
        channel: SettingsChangeChannel,
    ) -> SettingsResult<Self> {
        let path = config
            .settings_path()
            .ok_or_else(|| SettingsError::InvalidConfig("No settings path available".into()))?;
        Self::open(TomlFileStore::new(path), &config.locale, channel)
    }

    /// The country resolved at open, if any locale tag carried one.
    pub fn country(&self) -> Option<CountryCode> {
        self.country
    }

    pub fn currency_override(&self) -> Option<CurrencyCode> {
        self.currency_override
    }

    pub fn distance_unit_override(&self) -> Option<DistanceUnit> {
        self.distance_unit_override
    }

    pub fn effective_currency(&self) -> CurrencyCode {
        self.currency_override.unwrap_or_else(|| match &self.country {
            Some(country) => currency_for_country(country),
            None => FALLBACK_CURRENCY,
        })
    }

    pub fn effective_distance_unit(&self) -> DistanceUnit {
        self.distance_unit_override.unwrap_or_else(|| match &self.country {
            Some(country) => distance_unit_for_country(country),
            None => DistanceUnit::Centimeters,
        })
    }

    pub fn effective(&self) -> EffectiveSettings {
        EffectiveSettings::new(self.effective_currency(), self.effective_distance_unit())
    }

    /// The channel this store publishes on.
    pub fn channel(&self) -> &SettingsChangeChannel {
        &self.channel
    }

    /// Validates, persists and broadcasts a new override pair.
    ///
    /// `currency` is trimmed and uppercased first. An unknown code fails with
    /// [`SettingsError::InvalidCurrency`] before anything is written. Saving
    /// the pair that is already in effect still publishes.
    pub fn save_override(
        &mut self,
        currency: &str,
        distance_unit: DistanceUnit,
    ) -> SettingsResult<EffectiveSettings> {
        let currency = validate_currency_code(currency).map_err(|err| {
            warn!(error = %err, "Rejected currency override");
            match err {
                ValidationError::UnknownCurrency { code } => SettingsError::InvalidCurrency { code },
                _ => SettingsError::InvalidCurrency {
                    code: currency.trim().to_ascii_uppercase(),
                },
            }
        })?;

        self.backend.set_many(&[
            (CURRENCY_KEY, currency.as_str()),
            (DISTANCE_UNIT_KEY, distance_unit.symbol()),
        ])?;

        self.currency_override = Some(currency);
        self.distance_unit_override = Some(distance_unit);

        let settings = EffectiveSettings::new(currency, distance_unit);
        info!(%settings, "Settings override saved");
        self.channel.publish(&settings);
        Ok(settings)
    }

    /// Starts an edit, prefilled with the effective settings.
    pub fn begin_edit(&self) -> SettingsDraft {
        SettingsDraft::from_effective(self.effective())
    }

    /// Discards an in-progress edit. Writes nothing and publishes nothing.
    pub fn revert(&self) -> SettingsDraft {
        debug!("Settings edit cancelled");
        self.begin_edit()
    }

    /// Saves a draft. See [`SettingsStore::save_override`].
    pub fn save_draft(&mut self, draft: &SettingsDraft) -> SettingsResult<EffectiveSettings> {
        self.save_override(&draft.currency_text, draft.distance_unit)
    }
}

impl std::fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsStore")
            .field("country", &self.country)
            .field("currency_override", &self.currency_override)
            .field("distance_unit_override", &self.distance_unit_override)
            .field("channel", &self.channel)
            .finish_non_exhaustive()
    }
}

fn parse_persisted_currency(value: &str) -> Option<CurrencyCode> {
    let parsed = CurrencyCode::parse(value);
    if parsed.is_none() {
        warn!(value, "Ignoring persisted currency override");
    }
    parsed
}

fn parse_persisted_unit(value: &str) -> Option<DistanceUnit> {
    match value {
        "cm" => Some(DistanceUnit::Centimeters),
        "in" => Some(DistanceUnit::Inches),
        other => {
            warn!(value = other, "Ignoring persisted distance unit override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::InMemoryKeyValueStore;
    use std::sync::{Arc, Mutex};

    fn locale(tags: &[&str]) -> LocalePreferences {
        LocalePreferences::new(tags.iter().map(|t| t.to_string()).collect(), "en-US")
    }

    fn open(backend: &InMemoryKeyValueStore, tags: &[&str]) -> SettingsStore {
        SettingsStore::open(backend.clone(), &locale(tags), SettingsChangeChannel::new()).unwrap()
    }

    #[test]
    fn test_locale_defaults() {
        let backend = InMemoryKeyValueStore::new();

        let store = open(&backend, &["de-DE"]);
        assert_eq!(store.effective_currency().as_str(), "EUR");
        assert_eq!(store.effective_distance_unit(), DistanceUnit::Centimeters);

        let store = open(&backend, &["en-US"]);
        assert_eq!(store.effective_currency().as_str(), "USD");
        assert_eq!(store.effective_distance_unit(), DistanceUnit::Inches);

        let store = open(&backend, &["en-GB"]);
        assert_eq!(store.effective().to_string(), "GBP, cm");
    }

    #[test]
    fn test_no_country_uses_fallbacks() {
        let backend = InMemoryKeyValueStore::new();
        let locale = LocalePreferences::new(vec!["fr".into()], "fr");
        let store = SettingsStore::open(backend, &locale, SettingsChangeChannel::new()).unwrap();

        assert_eq!(store.country(), None);
        assert_eq!(store.effective_currency().as_str(), "USD");
        assert_eq!(store.effective_distance_unit(), DistanceUnit::Centimeters);
    }

    #[test]
    fn test_persisted_overrides_win() {
        let backend = InMemoryKeyValueStore::with_entries([
            (CURRENCY_KEY, "JPY"),
            (DISTANCE_UNIT_KEY, "in"),
        ]);
        let store = open(&backend, &["de-DE"]);

        assert_eq!(store.effective_currency().as_str(), "JPY");
        assert_eq!(store.effective_distance_unit(), DistanceUnit::Inches);
    }

    #[test]
    fn test_persisted_garbage_is_ignored() {
        let backend = InMemoryKeyValueStore::with_entries([
            (CURRENCY_KEY, "NOPE"),
            (DISTANCE_UNIT_KEY, "mm"),
        ]);
        let store = open(&backend, &["pl-PL"]);

        assert_eq!(store.currency_override(), None);
        assert_eq!(store.distance_unit_override(), None);
        assert_eq!(store.effective_currency().as_str(), "PLN");
    }

    #[test]
    fn test_save_override_normalizes_and_persists() {
        let backend = InMemoryKeyValueStore::new();
        let mut store = open(&backend, &["en-US"]);

        let saved = store.save_override("  eur ", DistanceUnit::Centimeters).unwrap();
        assert_eq!(saved.currency.as_str(), "EUR");
        assert_eq!(store.effective(), saved);

        assert_eq!(backend.write_count(), 1);
        assert_eq!(backend.get(CURRENCY_KEY).unwrap().as_deref(), Some("EUR"));
        assert_eq!(backend.get(DISTANCE_UNIT_KEY).unwrap().as_deref(), Some("cm"));
    }

    #[test]
    fn test_draft_and_save_agree_on_validity() {
        let backend = InMemoryKeyValueStore::new();
        let mut store = open(&backend, &["en-US"]);

        for text in [" chf", "jpy ", "", "   ", "XXY", "EURO"] {
            let draft = SettingsDraft {
                currency_text: text.to_string(),
                distance_unit: DistanceUnit::Inches,
            };
            assert_eq!(draft.is_valid(), store.save_draft(&draft).is_ok(), "{:?}", text);
        }

        let blank = SettingsDraft {
            currency_text: "  ".to_string(),
            distance_unit: DistanceUnit::Inches,
        };
        assert!(matches!(
            store.save_draft(&blank),
            Err(SettingsError::InvalidCurrency { code }) if code.is_empty()
        ));
        assert!(matches!(
            store.save_override("xxy", DistanceUnit::Inches),
            Err(SettingsError::InvalidCurrency { code }) if code == "XXY"
        ));
    }

    #[test]
    fn test_invalid_currency_changes_nothing() {
        let backend = InMemoryKeyValueStore::new();
        let mut store = open(&backend, &["en-US"]);
        let before = store.effective();

        let published = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&published);
        store.channel().subscribe(move |_| *counter.lock().unwrap() += 1);

        let err = store.save_override("xxy", DistanceUnit::Centimeters).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidCurrency { ref code } if code == "XXY"));

        assert!(store.save_override("", DistanceUnit::Centimeters).is_err());
        assert_eq!(store.effective(), before);
        assert_eq!(backend.write_count(), 0);
        assert_eq!(*published.lock().unwrap(), 0);
    }

    #[test]
    fn test_draft_validity() {
        let backend = InMemoryKeyValueStore::new();
        let store = open(&backend, &["en-GB"]);

        let mut draft = store.begin_edit();
        assert_eq!(draft.currency_text, "GBP");
        assert!(draft.is_valid());

        draft.currency_text = "eu".into();
        assert!(!draft.is_valid());
        draft.currency_text = "eur".into();
        assert!(draft.is_valid());
    }

    #[test]
    fn test_revert_restores_effective_values() {
        let backend = InMemoryKeyValueStore::new();
        let mut store = open(&backend, &["en-US"]);
        store.save_override("CAD", DistanceUnit::Centimeters).unwrap();
        let publishes = store.channel().publish_count();

        let mut draft = store.begin_edit();
        draft.currency_text = "CHF".into();
        draft.distance_unit = DistanceUnit::Inches;

        let reverted = store.revert();
        assert_eq!(reverted.currency_text, "CAD");
        assert_eq!(reverted.distance_unit, DistanceUnit::Centimeters);
        assert_eq!(backend.write_count(), 1);
        assert_eq!(store.channel().publish_count(), publishes);
    }

    #[test]
    fn test_save_draft() {
        let backend = InMemoryKeyValueStore::new();
        let mut store = open(&backend, &["en-US"]);

        let mut draft = store.begin_edit();
        draft.currency_text = "sek".into();
        draft.distance_unit = draft.distance_unit.other();

        let saved = store.save_draft(&draft).unwrap();
        assert_eq!(saved.to_string(), "SEK, cm");
        assert_eq!(store.channel().publish_count(), 1);
    }
}
