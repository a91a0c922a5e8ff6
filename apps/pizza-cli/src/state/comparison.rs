//! # Comparison State
//!
//! The comparison screen: two pizza cards, the verdict, and how both react to
//! a settings change.
//!
//! ## Settings Propagation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  SettingsStore::save_override("EUR", cm)                                │
//! │          │                                                              │
//! │          ▼ publish                                                      │
//! │  SettingsChangeChannel ─────────────┬───────────────────┐               │
//! │                                     ▼                   ▼               │
//! │                            PizzaCard (slot 1)   PizzaCard (slot 2)      │
//! │                            settings = EUR, cm   settings = EUR, cm      │
//! │                            renders += 1         renders += 1            │
//! │                                                                         │
//! │  Cards never read the store. Dropping a card unsubscribes it.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::debug;

use pizza_core::format::{
    format_price_per_area, format_total_area, format_total_price, LocaleFormatter,
};
use pizza_core::validation::parse_field;
use pizza_core::{
    Comparison, CurrencyCode, DistanceUnit, EffectiveSettings, Pizza, PizzaField, PizzaSlot,
    Winner,
};
use pizza_settings::{SettingsChangeChannel, SubscriptionId};

use crate::error::CliResult;

// =============================================================================
// Pizza Card
// =============================================================================

#[derive(Debug)]
struct CardDisplay {
    settings: EffectiveSettings,
    renders: usize,
}

/// One pizza's card. Holds the settings it was last rendered with.
#[derive(Debug)]
pub struct PizzaCard {
    slot: PizzaSlot,
    display: Arc<Mutex<CardDisplay>>,
    channel: SettingsChangeChannel,
    subscription: SubscriptionId,
}

impl PizzaCard {
    /// Creates a card rendered with `initial` and subscribes it to `channel`.
    pub fn new(
        slot: PizzaSlot,
        initial: EffectiveSettings,
        channel: &SettingsChangeChannel,
    ) -> Self {
        let display = Arc::new(Mutex::new(CardDisplay {
            settings: initial,
            renders: 1,
        }));

        let target = Arc::clone(&display);
        let subscription = channel.subscribe(move |settings| {
            let mut display = target.lock().unwrap_or_else(PoisonError::into_inner);
            display.settings = *settings;
            display.renders += 1;
            debug!(slot = slot.number(), %settings, "Pizza card re-rendered");
        });

        PizzaCard {
            slot,
            display,
            channel: channel.clone(),
            subscription,
        }
    }

    pub fn slot(&self) -> PizzaSlot {
        self.slot
    }

    /// Settings from the initial render or the latest notification.
    pub fn settings(&self) -> EffectiveSettings {
        self.lock().settings
    }

    /// How many times the card has been rendered.
    pub fn render_count(&self) -> usize {
        self.lock().renders
    }

    fn lock(&self) -> MutexGuard<'_, CardDisplay> {
        self.display.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for PizzaCard {
    fn drop(&mut self) {
        self.channel.unsubscribe(self.subscription);
    }
}

// =============================================================================
// Report
// =============================================================================

/// Rendered view of one card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PizzaReport {
    pub number: u8,
    pub pizza: Pizza,
    pub currency: CurrencyCode,
    pub distance_unit: DistanceUnit,
    pub total_price: Option<String>,
    pub total_area: Option<String>,
    pub price_per_area: Option<String>,
    pub winner: bool,
}

/// Rendered view of the whole comparison screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    pub pizzas: Vec<PizzaReport>,
    pub ready: bool,
    pub verdict: Option<Winner>,
}

// =============================================================================
// Comparison State
// =============================================================================

/// The comparison screen.
#[derive(Debug)]
pub struct ComparisonState {
    comparison: Comparison,
    cards: [PizzaCard; 2],
}

impl ComparisonState {
    pub fn new(initial: EffectiveSettings, channel: &SettingsChangeChannel) -> Self {
        ComparisonState {
            comparison: Comparison::new(),
            cards: PizzaSlot::ALL.map(|slot| PizzaCard::new(slot, initial, channel)),
        }
    }

    pub fn card(&self, slot: PizzaSlot) -> &PizzaCard {
        &self.cards[usize::from(slot.number() - 1)]
    }

    pub fn pizza(&self, slot: PizzaSlot) -> &Pizza {
        self.comparison.pizza(slot)
    }

    /// Validates raw text for one field and swaps in the updated pizza.
    pub fn update_field(
        &mut self,
        slot: PizzaSlot,
        field: PizzaField,
        text: &str,
    ) -> CliResult<()> {
        let value = parse_field(field, text)?;
        let pizza = self.comparison.pizza(slot).with_field(field, value);
        self.comparison.replace(slot, pizza);
        Ok(())
    }

    /// Reveals the verdict. See [`Comparison::calculate`].
    pub fn calculate(&mut self) -> bool {
        self.comparison.calculate()
    }

    pub fn verdict(&self) -> Option<Winner> {
        self.comparison.verdict()
    }

    /// Renders both cards with the settings each one currently holds.
    pub fn report(&self, locale: &str, formatter: &dyn LocaleFormatter) -> ComparisonReport {
        let verdict = self.verdict();
        let details = self.comparison.details_shown();

        let pizzas = self
            .cards
            .iter()
            .map(|card| {
                let pizza = *self.comparison.pizza(card.slot());
                let settings = card.settings();
                let (currency, unit) = (settings.currency, settings.distance_unit);
                PizzaReport {
                    number: card.slot().number(),
                    pizza,
                    currency,
                    distance_unit: unit,
                    total_price: format_total_price(&pizza, currency, locale, formatter),
                    total_area: details
                        .then(|| format_total_area(&pizza, unit, locale, formatter))
                        .flatten(),
                    price_per_area: details
                        .then(|| format_price_per_area(&pizza, currency, unit, locale, formatter))
                        .flatten(),
                    winner: verdict.is_some_and(|w| w.is_winner(card.slot())),
                }
            })
            .collect();

        ComparisonReport {
            pizzas,
            ready: self.comparison.is_ready(),
            verdict,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pizza_core::format::PlainFormatter;

    fn usd_inches() -> EffectiveSettings {
        EffectiveSettings::new(CurrencyCode::parse("USD").unwrap(), DistanceUnit::Inches)
    }

    fn eur_cm() -> EffectiveSettings {
        EffectiveSettings::new(CurrencyCode::parse("EUR").unwrap(), DistanceUnit::Centimeters)
    }

    fn filled(channel: &SettingsChangeChannel) -> ComparisonState {
        let mut state = ComparisonState::new(usd_inches(), channel);
        state.update_field(PizzaSlot::First, PizzaField::Diameter, "10").unwrap();
        state.update_field(PizzaSlot::First, PizzaField::Price, "5").unwrap();
        state.update_field(PizzaSlot::First, PizzaField::Count, "2").unwrap();
        state.update_field(PizzaSlot::Second, PizzaField::Diameter, "12").unwrap();
        state.update_field(PizzaSlot::Second, PizzaField::Price, "9").unwrap();
        state
    }

    #[test]
    fn test_cards_follow_settings_changes() {
        let channel = SettingsChangeChannel::new();
        let state = ComparisonState::new(usd_inches(), &channel);
        assert_eq!(channel.subscriber_count(), 2);

        channel.publish(&eur_cm());

        for slot in PizzaSlot::ALL {
            assert_eq!(state.card(slot).settings(), eur_cm());
            assert_eq!(state.card(slot).render_count(), 2);
        }
    }

    #[test]
    fn test_dropping_cards_unsubscribes() {
        let channel = SettingsChangeChannel::new();
        let state = ComparisonState::new(usd_inches(), &channel);
        let card = PizzaCard::new(PizzaSlot::First, usd_inches(), &channel);
        assert_eq!(channel.subscriber_count(), 3);

        drop(card);
        assert_eq!(channel.subscriber_count(), 2);

        drop(state);
        assert_eq!(channel.subscriber_count(), 0);
    }

    #[test]
    fn test_invalid_field_is_rejected() {
        let channel = SettingsChangeChannel::new();
        let mut state = ComparisonState::new(usd_inches(), &channel);

        assert!(state.update_field(PizzaSlot::First, PizzaField::Price, "0.001").is_err());
        assert!(state.update_field(PizzaSlot::First, PizzaField::Count, "1.5").is_err());
        assert_eq!(*state.pizza(PizzaSlot::First), Pizza::new());
    }

    #[test]
    fn test_report_before_and_after_calculate() {
        let channel = SettingsChangeChannel::new();
        let mut state = filled(&channel);

        let report = state.report("en-US", &PlainFormatter);
        assert!(report.ready);
        assert_eq!(report.verdict, None);
        assert_eq!(report.pizzas[0].total_price.as_deref(), Some("$10.00"));
        assert_eq!(report.pizzas[0].total_area, None);

        assert!(state.calculate());
        let report = state.report("en-US", &PlainFormatter);
        assert_eq!(report.verdict, Some(Winner::Pizza1));
        assert!(report.pizzas[0].winner);
        assert!(!report.pizzas[1].winner);
        assert_eq!(report.pizzas[0].total_area.as_deref(), Some("157.08\u{a0}in²"));
        assert_eq!(report.pizzas[0].price_per_area.as_deref(), Some("$0.0637/in²"));
    }

    #[test]
    fn test_report_uses_broadcast_settings() {
        let channel = SettingsChangeChannel::new();
        let mut state = filled(&channel);
        state.calculate();

        channel.publish(&eur_cm());
        let report = state.report("de-DE", &PlainFormatter);

        assert_eq!(report.pizzas[1].currency.as_str(), "EUR");
        assert_eq!(report.pizzas[0].price_per_area.as_deref(), Some("€0.0637/cm²"));
    }
}
