//! # Settings Commands
//!
//! `settings show` prints the effective currency and distance unit and where
//! each one comes from. `settings set` runs the edit flow: draft, validate,
//! save, broadcast.

use clap::{Args, Subcommand};
use serde::Serialize;

use pizza_core::{CurrencyCode, DistanceUnit};
use pizza_settings::SettingsStore;

use crate::error::CliResult;
use crate::state::AppState;

/// Arguments for `settings`.
#[derive(Debug, Clone, Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub action: SettingsAction,
}

#[derive(Debug, Clone, Subcommand)]
pub enum SettingsAction {
    /// Show the effective currency and distance unit
    Show,

    /// Override the currency and distance unit
    Set {
        /// 3-letter currency code, e.g. EUR
        currency: String,

        /// Distance unit
        #[arg(value_name = "cm|in")]
        unit: DistanceUnit,
    },
}

/// Where an effective value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Override,
    Locale,
}

/// What `settings show` and `settings set` print.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsView {
    pub currency: CurrencyCode,
    pub currency_source: Source,
    pub distance_unit: DistanceUnit,
    pub distance_unit_source: Source,
    pub country: Option<String>,
}

impl SettingsView {
    pub fn from_store(store: &SettingsStore) -> Self {
        let source = |overridden: bool| if overridden { Source::Override } else { Source::Locale };
        SettingsView {
            currency: store.effective_currency(),
            currency_source: source(store.currency_override().is_some()),
            distance_unit: store.effective_distance_unit(),
            distance_unit_source: source(store.distance_unit_override().is_some()),
            country: store.country().map(|c| c.to_string()),
        }
    }

    fn render_text(&self) -> String {
        let label = |source: Source| match source {
            Source::Override => "saved override",
            Source::Locale => "from locale",
        };
        format!(
            "currency       {} ({})\ndistance unit  {} ({})\ncountry        {}",
            self.currency,
            label(self.currency_source),
            self.distance_unit,
            label(self.distance_unit_source),
            self.country.as_deref().unwrap_or("-"),
        )
    }
}

/// Runs a `settings` subcommand and returns what should be printed.
pub fn execute(args: &SettingsArgs, app: &mut AppState, json: bool) -> CliResult<String> {
    match &args.action {
        SettingsAction::Show => {}
        SettingsAction::Set { currency, unit } => {
            let store = app.store_mut();
            let mut draft = store.begin_edit();
            draft.currency_text = currency.clone();
            draft.distance_unit = *unit;
            store.save_draft(&draft)?;
        }
    }

    let view = SettingsView::from_store(app.store());
    if json {
        Ok(serde_json::to_string_pretty(&view)?)
    } else {
        Ok(view.render_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use pizza_core::LocalePreferences;
    use pizza_settings::{InMemoryKeyValueStore, SettingsChangeChannel};

    fn app(tag: &str, backend: &InMemoryKeyValueStore) -> AppState {
        let locale = LocalePreferences::new(vec![tag.to_string()], "en-US");
        let store =
            SettingsStore::open(backend.clone(), &locale, SettingsChangeChannel::new()).unwrap();
        AppState::new(store, locale)
    }

    #[test]
    fn test_show_locale_defaults() {
        let backend = InMemoryKeyValueStore::new();
        let mut app = app("fr-FR", &backend);
        let args = SettingsArgs {
            action: SettingsAction::Show,
        };

        let out = execute(&args, &mut app, false).unwrap();
        assert_eq!(
            out,
            "currency       EUR (from locale)\ndistance unit  cm (from locale)\ncountry        FR"
        );
    }

    #[test]
    fn test_set_then_show_json() {
        let backend = InMemoryKeyValueStore::new();
        let mut app = app("en-US", &backend);
        let set = SettingsArgs {
            action: SettingsAction::Set {
                currency: "chf".into(),
                unit: DistanceUnit::Centimeters,
            },
        };

        let json = execute(&set, &mut app, true).unwrap();
        let view: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(view["currency"], "CHF");
        assert_eq!(view["currencySource"], "override");
        assert_eq!(view["distanceUnit"], "cm");
        assert_eq!(view["country"], "US");
        assert_eq!(app.store().channel().publish_count(), 1);
    }

    #[test]
    fn test_set_unknown_currency() {
        let backend = InMemoryKeyValueStore::new();
        let mut app = app("en-US", &backend);
        let set = SettingsArgs {
            action: SettingsAction::Set {
                currency: "XXY".into(),
                unit: DistanceUnit::Centimeters,
            },
        };

        let err = execute(&set, &mut app, false).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCurrency);
        assert_eq!(backend.write_count(), 0);
        assert_eq!(app.store().effective().to_string(), "USD, in");
    }
}
