//! # Formatting
//!
//! Turns pizza metrics into display strings.
//!
//! Number and currency rendering is delegated to a [`LocaleFormatter`]. This
//! module only decides which value gets which style and how the unit suffix
//! is attached:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Metric          │ Style     │ Max digits │ Suffix        │ Example     │
//! │  ────────────────┼───────────┼────────────┼───────────────┼──────────── │
//! │  total price     │ currency  │ 2          │ -             │ $10.00      │
//! │  total area      │ number    │ 2          │ NBSP unit ²   │ 157.08 cm²  │
//! │  price per area  │ currency  │ 4          │ / unit ²      │ $0.0637/cm² │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::conventions::currency_symbol;
use crate::pizza::Pizza;
use crate::types::{CurrencyCode, DistanceUnit};

/// Separates the area value from its unit.
pub const NO_BREAK_SPACE: char = '\u{a0}';

const TOTAL_PRICE_DIGITS: u8 = 2;
const TOTAL_AREA_DIGITS: u8 = 2;
const PRICE_PER_AREA_DIGITS: u8 = 4;

/// Locale-aware number rendering supplied by the host.
pub trait LocaleFormatter {
    /// Renders `value` as an amount of `currency`, with at most
    /// `max_fraction_digits` digits after the decimal separator.
    fn format_currency(
        &self,
        locale: &str,
        value: f64,
        currency: CurrencyCode,
        max_fraction_digits: u8,
    ) -> String;

    /// Renders a plain number with at most `max_fraction_digits` fraction digits.
    fn format_number(&self, locale: &str, value: f64, max_fraction_digits: u8) -> String;
}

// =============================================================================
// Plain Formatter
// =============================================================================

/// A locale-agnostic [`LocaleFormatter`].
///
/// Uses `.` as the decimal separator and no grouping. Currencies with a known
/// symbol get it as a prefix (`$10.00`), the rest get their code and a space
/// (`PLN 10.00`). Currency amounts always show at least two fraction digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFormatter;

impl PlainFormatter {
    const MIN_CURRENCY_DIGITS: u8 = 2;
}

impl LocaleFormatter for PlainFormatter {
    fn format_currency(
        &self,
        _locale: &str,
        value: f64,
        currency: CurrencyCode,
        max_fraction_digits: u8,
    ) -> String {
        let min_digits = Self::MIN_CURRENCY_DIGITS.min(max_fraction_digits);
        let amount = fixed(value.abs(), max_fraction_digits, min_digits);
        let sign = if value.is_sign_negative() && value != 0.0 { "-" } else { "" };

        match currency_symbol(currency) {
            Some(symbol) => format!("{sign}{symbol}{amount}"),
            None => format!("{sign}{currency} {amount}"),
        }
    }

    fn format_number(&self, _locale: &str, value: f64, max_fraction_digits: u8) -> String {
        fixed(value, max_fraction_digits, 0)
    }
}

/// Rounds to `max` fraction digits, then drops trailing zeros down to `min`.
fn fixed(value: f64, max: u8, min: u8) -> String {
    let mut text = format!("{:.*}", usize::from(max), value);
    if let Some(dot) = text.find('.') {
        let keep = dot + 1 + usize::from(min);
        while text.len() > keep && text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    text
}

// =============================================================================
// Metric Formatting
// =============================================================================

/// `total_price` in currency style, or `None` while the pizza is undefined.
pub fn format_total_price(
    pizza: &Pizza,
    currency: CurrencyCode,
    locale: &str,
    formatter: &dyn LocaleFormatter,
) -> Option<String> {
    let total = pizza.total_price()?;
    Some(formatter.format_currency(locale, total, currency, TOTAL_PRICE_DIGITS))
}

/// `total_area` followed by a no-break space and the squared unit.
pub fn format_total_area(
    pizza: &Pizza,
    unit: DistanceUnit,
    locale: &str,
    formatter: &dyn LocaleFormatter,
) -> Option<String> {
    let area = pizza.total_area()?;
    let number = formatter.format_number(locale, area, TOTAL_AREA_DIGITS);
    Some(format!("{number}{NO_BREAK_SPACE}{unit}²"))
}

/// `price_per_area` in currency style followed by `/unit²`.
pub fn format_price_per_area(
    pizza: &Pizza,
    currency: CurrencyCode,
    unit: DistanceUnit,
    locale: &str,
    formatter: &dyn LocaleFormatter,
) -> Option<String> {
    let ppa = pizza.price_per_area()?;
    let amount = formatter.format_currency(locale, ppa, currency, PRICE_PER_AREA_DIGITS);
    Some(format!("{amount}/{unit}²"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd() -> CurrencyCode {
        CurrencyCode::parse("USD").unwrap()
    }

    fn sample() -> Pizza {
        Pizza::new().with_diameter(10.0).with_price(5.0).with_count(2)
    }

    #[test]
    fn test_fixed() {
        assert_eq!(fixed(10.0, 2, 2), "10.00");
        assert_eq!(fixed(157.0796, 2, 0), "157.08");
        assert_eq!(fixed(0.063662, 4, 2), "0.0637");
        assert_eq!(fixed(0.5, 4, 2), "0.50");
        assert_eq!(fixed(12.0, 2, 0), "12");
        assert_eq!(fixed(3.0, 0, 0), "3");
    }

    #[test]
    fn test_formats_sample_pizza() {
        let f = PlainFormatter;
        let pizza = sample();

        assert_eq!(format_total_price(&pizza, usd(), "en-US", &f).as_deref(), Some("$10.00"));
        assert_eq!(
            format_total_area(&pizza, DistanceUnit::Centimeters, "en-US", &f).as_deref(),
            Some("157.08\u{a0}cm²")
        );
        assert_eq!(
            format_price_per_area(&pizza, usd(), DistanceUnit::Centimeters, "en-US", &f)
                .as_deref(),
            Some("$0.0637/cm²")
        );
    }

    #[test]
    fn test_code_prefix_without_symbol() {
        let pln = CurrencyCode::parse("PLN").unwrap();
        assert_eq!(PlainFormatter.format_currency("pl-PL", 10.0, pln, 2), "PLN 10.00");
        assert_eq!(PlainFormatter.format_currency("en-US", -5.5, usd(), 2), "-$5.50");
    }

    #[test]
    fn test_undefined_pizza_formats_nothing() {
        let f = PlainFormatter;
        let pizza = Pizza::new().with_price(5.0);
        assert_eq!(format_total_price(&pizza, usd(), "en-US", &f), None);
        assert_eq!(format_total_area(&pizza, DistanceUnit::Inches, "en-US", &f), None);
    }

    struct Recording;

    impl LocaleFormatter for Recording {
        fn format_currency(&self, locale: &str, _: f64, currency: CurrencyCode, digits: u8) -> String {
            format!("{locale}|{currency}|{digits}")
        }

        fn format_number(&self, locale: &str, _: f64, digits: u8) -> String {
            format!("{locale}|{digits}")
        }
    }

    #[test]
    fn test_collaborator_receives_locale_and_digits() {
        let pizza = sample();
        assert_eq!(
            format_price_per_area(&pizza, usd(), DistanceUnit::Inches, "de-DE", &Recording)
                .as_deref(),
            Some("de-DE|USD|4/in²")
        );
        assert_eq!(
            format_total_area(&pizza, DistanceUnit::Inches, "de-DE", &Recording).as_deref(),
            Some("de-DE|2\u{a0}in²")
        );
    }
}
