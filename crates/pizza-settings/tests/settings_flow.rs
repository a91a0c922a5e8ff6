//! End-to-end settings flows: open, override, persist, broadcast.

use std::sync::{Arc, Mutex};

use pizza_core::{DistanceUnit, EffectiveSettings, LocalePreferences};
use pizza_settings::backend::{CURRENCY_KEY, DISTANCE_UNIT_KEY};
use pizza_settings::{
    InMemoryKeyValueStore, KeyValueStore, SettingsChangeChannel, SettingsConfig, SettingsError,
    SettingsStore, TomlFileStore,
};
use tempfile::TempDir;

fn us_locale() -> LocalePreferences {
    LocalePreferences::new(vec!["en-US".into(), "fr".into()], "en-US")
}

fn record(channel: &SettingsChangeChannel) -> Arc<Mutex<Vec<EffectiveSettings>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    channel.subscribe(move |settings| sink.lock().unwrap().push(*settings));
    seen
}

#[test]
fn override_survives_reopen_with_file_backend() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");

    let mut store =
        SettingsStore::open(TomlFileStore::new(&path), &us_locale(), SettingsChangeChannel::new())
            .unwrap();
    assert_eq!(store.effective().to_string(), "USD, in");
    store.save_override("eur", DistanceUnit::Centimeters).unwrap();

    let reopened =
        SettingsStore::open(TomlFileStore::new(&path), &us_locale(), SettingsChangeChannel::new())
            .unwrap();
    assert_eq!(reopened.effective_currency().as_str(), "EUR");
    assert_eq!(reopened.effective_distance_unit(), DistanceUnit::Centimeters);
}

#[test]
fn store_opens_from_config() {
    let dir = TempDir::new().unwrap();
    let mut config = SettingsConfig::default();
    config.storage.path = Some(dir.path().join("nested").join("settings.toml"));
    config.locale = LocalePreferences::new(vec!["en-AU".into()], "en-US");

    let mut store = SettingsStore::from_config(&config, SettingsChangeChannel::new()).unwrap();
    assert_eq!(store.effective().to_string(), "AUD, cm");

    store.save_override("NZD", DistanceUnit::Centimeters).unwrap();
    let backend = TomlFileStore::new(config.settings_path().unwrap());
    assert_eq!(backend.get(CURRENCY_KEY).unwrap().as_deref(), Some("NZD"));
}

#[test]
fn every_subscriber_sees_each_save_even_when_unchanged() {
    let channel = SettingsChangeChannel::new();
    let first = record(&channel);
    let second = record(&channel);

    let mut store =
        SettingsStore::open(InMemoryKeyValueStore::new(), &us_locale(), channel.clone()).unwrap();

    let saved = store.save_override("GBP", DistanceUnit::Centimeters).unwrap();
    let again = store.save_override("GBP", DistanceUnit::Centimeters).unwrap();
    assert_eq!(saved, again);

    assert_eq!(*first.lock().unwrap(), vec![saved, saved]);
    assert_eq!(*second.lock().unwrap(), vec![saved, saved]);
    assert_eq!(channel.publish_count(), 2);
}

#[test]
fn unknown_currency_is_rejected_without_side_effects() {
    let backend = InMemoryKeyValueStore::new();
    let channel = SettingsChangeChannel::new();
    let seen = record(&channel);
    let mut store = SettingsStore::open(backend.clone(), &us_locale(), channel).unwrap();

    let err = store.save_override("XXX", DistanceUnit::Centimeters).unwrap_err();
    assert!(matches!(err, SettingsError::InvalidCurrency { .. }));

    assert_eq!(backend.write_count(), 0);
    assert!(backend.snapshot().is_empty());
    assert!(seen.lock().unwrap().is_empty());
    assert_eq!(store.effective().to_string(), "USD, in");
}

#[test]
fn cancelled_edit_leaves_everything_alone() {
    let backend =
        InMemoryKeyValueStore::with_entries([(CURRENCY_KEY, "SEK"), (DISTANCE_UNIT_KEY, "cm")]);
    let channel = SettingsChangeChannel::new();
    let seen = record(&channel);
    let store = SettingsStore::open(backend.clone(), &us_locale(), channel).unwrap();

    let mut draft = store.begin_edit();
    draft.currency_text = "NOK".into();
    draft.distance_unit = DistanceUnit::Inches;

    let restored = store.revert();
    assert_eq!(restored.currency_text, "SEK");
    assert_eq!(restored.distance_unit, DistanceUnit::Centimeters);
    assert_eq!(backend.write_count(), 0);
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn mistyped_file_entries_fall_back_to_locale_and_can_be_repaired() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "currency = 5\ndistanceUnit = true\n").unwrap();

    let mut store =
        SettingsStore::open(TomlFileStore::new(&path), &us_locale(), SettingsChangeChannel::new())
            .unwrap();
    assert_eq!(store.currency_override(), None);
    assert_eq!(store.distance_unit_override(), None);
    assert_eq!(store.effective().to_string(), "USD, in");

    store.save_override("EUR", DistanceUnit::Centimeters).unwrap();

    let file = TomlFileStore::new(&path);
    assert_eq!(file.get(CURRENCY_KEY).unwrap().as_deref(), Some("EUR"));
    assert_eq!(file.get(DISTANCE_UNIT_KEY).unwrap().as_deref(), Some("cm"));
}
