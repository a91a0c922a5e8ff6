//! # State Module
//!
//! Application state shared by the commands.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  AppState                                                        │  │
//! │  │  ├── SettingsStore     (owns overrides, publishes changes)       │  │
//! │  │  ├── LocalePreferences (locale tag for the formatter)            │  │
//! │  │  └── PlainFormatter                                              │  │
//! │  └─────────────────────────────┬────────────────────────────────────┘  │
//! │                                │ open_comparison()                      │
//! │                                ▼                                        │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  ComparisonState  (two PizzaCards subscribed to the channel)     │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod comparison;

pub use comparison::{ComparisonReport, ComparisonState, PizzaCard, PizzaReport};

use pizza_core::format::{LocaleFormatter, PlainFormatter};
use pizza_core::LocalePreferences;
use pizza_settings::SettingsStore;

/// Everything a command needs.
#[derive(Debug)]
pub struct AppState {
    store: SettingsStore,
    locale: LocalePreferences,
    formatter: PlainFormatter,
}

impl AppState {
    pub fn new(store: SettingsStore, locale: LocalePreferences) -> Self {
        AppState {
            store,
            locale,
            formatter: PlainFormatter,
        }
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut SettingsStore {
        &mut self.store
    }

    pub fn locale(&self) -> &LocalePreferences {
        &self.locale
    }

    pub fn formatter(&self) -> &dyn LocaleFormatter {
        &self.formatter
    }

    /// Opens a comparison screen rendered with the current effective settings
    /// and subscribed to the store's channel.
    pub fn open_comparison(&self) -> ComparisonState {
        ComparisonState::new(self.store.effective(), self.store.channel())
    }
}
