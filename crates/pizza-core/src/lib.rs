//! # pizza-core: Pure Comparison Logic for Pizza Compare
//!
//! This crate holds everything that has actual rules in it: the pizza value
//! model, the country/currency/unit tables, locale tag parsing and the winner
//! decision. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Pizza Compare Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/pizza-cli (rendering)                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │           pizza-settings (store, channel, backends)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pizza-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌────────────┐ ┌─────────┐ ┌──────────────────┐  │   │
//! │  │   │  pizza  │ │conventions │ │ locale  │ │   comparison     │  │   │
//! │  │   │  Pizza  │ │ currencies │ │ country │ │ Winner, verdict  │  │   │
//! │  │   └─────────┘ └────────────┘ └─────────┘ └──────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO PERSISTENCE • PURE FUNCTIONS                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - `CountryCode`, `CurrencyCode`, `DistanceUnit`, `EffectiveSettings`
//! - [`pizza`] - The `Pizza` value object and its derived metrics
//! - [`conventions`] - Country → currency and country → distance unit tables
//! - [`locale`] - Country resolution from ranked locale tags
//! - [`comparison`] - Readiness, winner decision and the comparison view-model
//! - [`format`] - The formatting collaborator contract
//! - [`validation`] - Input filtering for raw user text
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use pizza_core::comparison::{decide_winner, Winner};
//! use pizza_core::Pizza;
//!
//! let small = Pizza::new().with_diameter(30.0).with_price(8.0);
//! let large = Pizza::new().with_diameter(40.0).with_price(12.0);
//!
//! assert_eq!(decide_winner(&small, &large), Winner::Pizza2);
//! ```

pub mod comparison;
pub mod conventions;
pub mod error;
pub mod format;
pub mod locale;
pub mod pizza;
pub mod types;
pub mod validation;

pub use comparison::{Comparison, PizzaSlot, Winner};
pub use error::{CoreError, CoreResult, ValidationError};
pub use locale::LocalePreferences;
pub use pizza::{Pizza, PizzaField, PizzaMetrics};
pub use types::*;

/// Locale tag used when the host supplies nothing usable.
pub const DEFAULT_FALLBACK_LOCALE: &str = "en-US";
