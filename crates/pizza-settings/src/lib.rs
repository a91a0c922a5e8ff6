//! # pizza-settings: Settings Store for Pizza Compare
//!
//! Holds the user's currency and distance unit overrides, persists them, and
//! tells every open comparison view when they change.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   SettingsConfig ──► LocalePreferences ──┐                              │
//! │   (pizza.toml+env)   settings path       │                              │
//! │                           │              ▼                              │
//! │                           │     ┌─────────────────┐                     │
//! │                           └────►│  SettingsStore  │──► KeyValueStore    │
//! │                                 │                 │    (memory / TOML)  │
//! │                                 └────────┬────────┘                     │
//! │                                          │ publish                      │
//! │                                          ▼                              │
//! │                           ┌──────────────────────────────┐              │
//! │                           │   SettingsChangeChannel      │              │
//! │                           └──────┬───────────────┬───────┘              │
//! │                                  ▼               ▼                      │
//! │                              view #1         view #2                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`store`] - `SettingsStore` and the `SettingsDraft` edit flow
//! - [`channel`] - `SettingsChangeChannel` fan-out
//! - [`backend`] - `KeyValueStore` trait and its two implementations
//! - [`config`] - `SettingsConfig` loading
//! - [`error`] - Settings error types
//!
//! ## Example
//! ```rust
//! use pizza_core::{DistanceUnit, LocalePreferences};
//! use pizza_settings::{InMemoryKeyValueStore, SettingsChangeChannel, SettingsStore};
//!
//! let locale = LocalePreferences::new(vec!["de-DE".into()], "en-US");
//! let channel = SettingsChangeChannel::new();
//! let mut store = SettingsStore::open(InMemoryKeyValueStore::new(), &locale, channel).unwrap();
//!
//! assert_eq!(store.effective().to_string(), "EUR, cm");
//! store.save_override("chf", DistanceUnit::Inches).unwrap();
//! assert_eq!(store.effective().to_string(), "CHF, in");
//! ```

pub mod backend;
pub mod channel;
pub mod config;
pub mod error;
pub mod store;

pub use backend::{InMemoryKeyValueStore, KeyValueStore, TomlFileStore};
pub use channel::{SettingsChangeChannel, SettingsListener, SubscriptionId};
pub use config::SettingsConfig;
pub use error::{SettingsError, SettingsResult};
pub use store::{SettingsDraft, SettingsStore};
