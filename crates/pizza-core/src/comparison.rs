//! # Comparison Engine
//!
//! Decides which of two pizzas is the better deal.
//!
//! ## Decision Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  pizza1 ready? │ pizza2 ready? │ ppa1 vs ppa2      │ Winner             │
//! │  ──────────────┼───────────────┼───────────────────┼──────────────────  │
//! │  no            │ any           │ -                 │ NoWinner           │
//! │  any           │ no            │ -                 │ NoWinner           │
//! │  yes           │ yes           │ ppa1 < ppa2       │ Pizza1             │
//! │  yes           │ yes           │ ppa1 > ppa2       │ Pizza2             │
//! │  yes           │ yes           │ equal or NaN      │ Tie                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The winner is never stored. [`Comparison`] recomputes it from the two
//! pizzas every time it is asked.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::pizza::Pizza;

// =============================================================================
// Winner
// =============================================================================

/// Outcome of comparing two pizzas by price per area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    /// At least one pizza is not defined yet.
    NoWinner,
    Pizza1,
    Pizza2,
    /// Both pizzas cost the same per unit area.
    Tie,
}

impl Winner {
    /// True when the given slot won outright.
    pub fn is_winner(&self, slot: PizzaSlot) -> bool {
        matches!(
            (self, slot),
            (Winner::Pizza1, PizzaSlot::First) | (Winner::Pizza2, PizzaSlot::Second)
        )
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Winner::NoWinner => "no winner yet",
            Winner::Pizza1 => "pizza 1",
            Winner::Pizza2 => "pizza 2",
            Winner::Tie => "tie",
        };
        f.write_str(text)
    }
}

/// True when both pizzas are defined.
pub fn is_ready(pizza1: &Pizza, pizza2: &Pizza) -> bool {
    pizza1.is_defined() && pizza2.is_defined()
}

/// Picks the pizza with the strictly lower price per area.
///
/// ```rust
/// use pizza_core::comparison::{decide_winner, Winner};
/// use pizza_core::Pizza;
///
/// let a = Pizza::new().with_diameter(30.0).with_price(10.0);
/// let b = Pizza::new().with_diameter(30.0).with_price(10.0);
/// assert_eq!(decide_winner(&a, &b), Winner::Tie);
/// assert_eq!(decide_winner(&a, &Pizza::new()), Winner::NoWinner);
/// ```
pub fn decide_winner(pizza1: &Pizza, pizza2: &Pizza) -> Winner {
    match (pizza1.price_per_area(), pizza2.price_per_area()) {
        (Some(first), Some(second)) if first < second => Winner::Pizza1,
        (Some(first), Some(second)) if first > second => Winner::Pizza2,
        (Some(_), Some(_)) => Winner::Tie,
        _ => Winner::NoWinner,
    }
}

// =============================================================================
// Comparison View-Model
// =============================================================================

/// Identifies one of the two compared pizzas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PizzaSlot {
    First,
    Second,
}

impl PizzaSlot {
    pub const ALL: [PizzaSlot; 2] = [PizzaSlot::First, PizzaSlot::Second];

    /// 1-based position shown to the user.
    pub const fn number(&self) -> u8 {
        match self {
            PizzaSlot::First => 1,
            PizzaSlot::Second => 2,
        }
    }
}

/// State of one comparison screen: two pizzas plus the "details shown" flag.
///
/// The verdict stays hidden until the user asks for it with
/// [`Comparison::calculate`]. After that, every [`Comparison::replace`]
/// is reflected in the next [`Comparison::verdict`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pizza1: Pizza,
    pizza2: Pizza,
    details: bool,
}

impl Comparison {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pizza(&self, slot: PizzaSlot) -> &Pizza {
        match slot {
            PizzaSlot::First => &self.pizza1,
            PizzaSlot::Second => &self.pizza2,
        }
    }

    /// Swaps in a new value for one slot.
    pub fn replace(&mut self, slot: PizzaSlot, pizza: Pizza) {
        match slot {
            PizzaSlot::First => self.pizza1 = pizza,
            PizzaSlot::Second => self.pizza2 = pizza,
        }
    }

    pub fn is_ready(&self) -> bool {
        is_ready(&self.pizza1, &self.pizza2)
    }

    /// Reveals the details and the verdict.
    ///
    /// Has no effect until both pizzas are defined. Returns whether the
    /// details are shown afterwards.
    pub fn calculate(&mut self) -> bool {
        if self.is_ready() {
            self.details = true;
        }
        self.details
    }

    pub fn details_shown(&self) -> bool {
        self.details
    }

    /// The current winner, once details are shown and both pizzas are ready.
    pub fn verdict(&self) -> Option<Winner> {
        (self.details && self.is_ready()).then(|| decide_winner(&self.pizza1, &self.pizza2))
    }
}
