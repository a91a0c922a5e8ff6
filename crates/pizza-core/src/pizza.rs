//! # Pizza Module
//!
//! The `Pizza` value object and the arithmetic behind the comparison.
//!
//! ## Derived Metrics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  diameter ─┐                                                            │
//! │            ├──► total_area  = π × (diameter / 2)² × count ──┐           │
//! │  count ────┤                                                ├──► ppa    │
//! │            ├──► total_price = price × count ────────────────┘           │
//! │  price ────┘                                                            │
//! │                                                                         │
//! │  price_per_area (ppa) = total_price / total_area                        │
//! │  Lower is better. All three are None until diameter and price are set.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pizza_core::Pizza;
//!
//! let pizza = Pizza::new().with_diameter(10.0).with_price(5.0).with_count(2);
//!
//! assert_eq!(pizza.total_price(), Some(10.0));
//! assert!((pizza.total_area().unwrap() - 157.0796).abs() < 1e-3);
//! ```

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use ts_rs::TS;

// =============================================================================
// Pizza
// =============================================================================

/// One pizza offer as entered by the user.
///
/// `Pizza` is `Copy` and never mutated in place. Every attribute change goes
/// through a `with_*` method that returns a new value and keeps the other
/// two attributes.
///
/// Inputs are not validated here. Range checks belong to
/// [`crate::validation`], which runs before a value reaches a `Pizza`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Pizza {
    /// Diameter in the active distance unit.
    pub diameter: Option<f64>,

    /// Price of one pizza in the active currency.
    pub price: Option<f64>,

    /// Number of pizzas in the offer.
    pub count: u32,
}

impl Default for Pizza {
    fn default() -> Self {
        Pizza {
            diameter: None,
            price: None,
            count: 1,
        }
    }
}

impl Pizza {
    /// Creates an empty pizza: no diameter, no price, count 1.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_diameter(self, diameter: f64) -> Self {
        Pizza {
            diameter: Some(diameter),
            ..self
        }
    }

    #[must_use]
    pub fn with_price(self, price: f64) -> Self {
        Pizza {
            price: Some(price),
            ..self
        }
    }

    #[must_use]
    pub fn with_count(self, count: u32) -> Self {
        Pizza { count, ..self }
    }

    /// Replaces whichever attribute `field` names.
    ///
    /// This is the entry point for the input collaborator, which reports
    /// changes as (field, number) pairs. Count values are truncated toward
    /// zero and saturate at `u32::MAX`. Anything below 1, NaN included,
    /// becomes a count of 1, so a pizza built here never has a zero count.
    #[must_use]
    pub fn with_field(self, field: PizzaField, value: f64) -> Self {
        match field {
            PizzaField::Diameter => self.with_diameter(value),
            PizzaField::Price => self.with_price(value),
            PizzaField::Count => self.with_count(value.max(1.0) as u32),
        }
    }

    /// True once both diameter and price have been set.
    pub fn is_defined(&self) -> bool {
        self.diameter.is_some() && self.price.is_some()
    }

    /// `price × count`.
    pub fn total_price(&self) -> Option<f64> {
        self.inputs().map(|(_, price)| price * f64::from(self.count))
    }

    /// `π × (diameter / 2)² × count`, in the square of the active unit.
    pub fn total_area(&self) -> Option<f64> {
        self.inputs()
            .map(|(diameter, _)| PI * (diameter / 2.0).powi(2) * f64::from(self.count))
    }

    /// `total_price / total_area`. This is the comparison metric.
    pub fn price_per_area(&self) -> Option<f64> {
        Some(self.total_price()? / self.total_area()?)
    }

    /// All three derived metrics at once.
    pub fn metrics(&self) -> Option<PizzaMetrics> {
        Some(PizzaMetrics {
            total_price: self.total_price()?,
            total_area: self.total_area()?,
            price_per_area: self.price_per_area()?,
        })
    }

    fn inputs(&self) -> Option<(f64, f64)> {
        Some((self.diameter?, self.price?))
    }
}

// =============================================================================
// Pizza Metrics
// =============================================================================

/// Snapshot of a defined pizza's derived values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PizzaMetrics {
    pub total_price: f64,
    pub total_area: f64,
    pub price_per_area: f64,
}

// =============================================================================
// Pizza Field
// =============================================================================

/// Names one editable attribute of a [`Pizza`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PizzaField {
    Diameter,
    Price,
    Count,
}

impl PizzaField {
    /// Label used in validation messages.
    pub const fn label(&self) -> &'static str {
        match self {
            PizzaField::Diameter => "diameter",
            PizzaField::Price => "price",
            PizzaField::Count => "count",
        }
    }
}
