//! # Validation Module
//!
//! Filters raw text from the input collaborator before it becomes a pizza
//! attribute or a currency override.
//!
//! ## Input Constraints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Field     │ Kind           │ Minimum │ Rejected examples               │
//! │  ──────────┼────────────────┼─────────┼──────────────────────────────── │
//! │  diameter  │ number         │ 1       │ "", "abc", "0", "0.5", "inf"    │
//! │  price     │ number         │ 0.01    │ "", "-3", "0.001"               │
//! │  count     │ whole number   │ 1       │ "0", "1.5", "-2"                │
//! │  currency  │ ISO 4217 code  │ -       │ "", "EURO", "XXY"               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`crate::Pizza`] itself accepts any number. These checks exist so the
//! input side never hands it one that makes the comparison meaningless.

use crate::error::ValidationError;
use crate::pizza::PizzaField;
use crate::types::CurrencyCode;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Smallest diameter the input accepts.
pub const MIN_DIAMETER: f64 = 1.0;

/// Smallest price the input accepts.
pub const MIN_PRICE: f64 = 0.01;

// =============================================================================
// Numeric Fields
// =============================================================================

/// Parses a diameter (≥ 1).
///
/// ```rust
/// use pizza_core::validation::parse_diameter;
///
/// assert_eq!(parse_diameter(" 32 ").unwrap(), 32.0);
/// assert!(parse_diameter("0.5").is_err());
/// ```
pub fn parse_diameter(text: &str) -> ValidationResult<f64> {
    parse_bounded(PizzaField::Diameter, text, MIN_DIAMETER)
}

/// Parses a price (≥ 0.01).
pub fn parse_price(text: &str) -> ValidationResult<f64> {
    parse_bounded(PizzaField::Price, text, MIN_PRICE)
}

/// Parses a count (whole number ≥ 1).
pub fn parse_count(text: &str) -> ValidationResult<u32> {
    let field = PizzaField::Count;
    let value = parse_positive(field, text)?;

    if value.fract() != 0.0 {
        return Err(ValidationError::MustBeWholeNumber {
            field: field.label().to_string(),
        });
    }

    if value > f64::from(u32::MAX) {
        return Err(invalid_number(field, text));
    }

    Ok(value as u32)
}

/// Parses the value for any field, as the number [`crate::Pizza::with_field`]
/// expects.
pub fn parse_field(field: PizzaField, text: &str) -> ValidationResult<f64> {
    match field {
        PizzaField::Diameter => parse_diameter(text),
        PizzaField::Price => parse_price(text),
        PizzaField::Count => parse_count(text).map(f64::from),
    }
}

fn parse_bounded(field: PizzaField, text: &str, min: f64) -> ValidationResult<f64> {
    let value = parse_positive(field, text)?;

    if value < min {
        return Err(ValidationError::BelowMinimum {
            field: field.label().to_string(),
            min,
        });
    }

    Ok(value)
}

fn parse_positive(field: PizzaField, text: &str) -> ValidationResult<f64> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: field.label().to_string(),
        });
    }

    let value: f64 = trimmed
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or_else(|| invalid_number(field, text))?;

    if value <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: field.label().to_string(),
        });
    }

    Ok(value)
}

fn invalid_number(field: PizzaField, text: &str) -> ValidationError {
    ValidationError::InvalidNumber {
        field: field.label().to_string(),
        value: text.trim().to_string(),
    }
}

// =============================================================================
// Currency
// =============================================================================

/// Validates a currency override typed by the user.
///
/// Surrounding whitespace is ignored and the code is uppercased first, so
/// `" eur "` is accepted as `EUR`.
pub fn validate_currency_code(text: &str) -> ValidationResult<CurrencyCode> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: "currency".to_string(),
        });
    }

    CurrencyCode::parse(trimmed).ok_or_else(|| ValidationError::UnknownCurrency {
        code: trimmed.to_ascii_uppercase(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_diameter() {
        assert_eq!(parse_diameter("30").unwrap(), 30.0);
        assert_eq!(parse_diameter("1").unwrap(), 1.0);
        assert!(matches!(parse_diameter(""), Err(ValidationError::Required { .. })));
        assert!(matches!(parse_diameter("abc"), Err(ValidationError::InvalidNumber { .. })));
        assert!(matches!(parse_diameter("inf"), Err(ValidationError::InvalidNumber { .. })));
        assert!(matches!(parse_diameter("0"), Err(ValidationError::MustBePositive { .. })));
        assert!(matches!(parse_diameter("0.5"), Err(ValidationError::BelowMinimum { .. })));
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("0.01").unwrap(), 0.01);
        assert_eq!(parse_price("12.99").unwrap(), 12.99);
        assert!(matches!(parse_price("-3"), Err(ValidationError::MustBePositive { .. })));

        let err = parse_price("0.001").unwrap_err();
        assert_eq!(err.to_string(), "price must be at least 0.01");
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("3").unwrap(), 3);
        assert_eq!(parse_count("2.0").unwrap(), 2);
        assert!(matches!(parse_count("1.5"), Err(ValidationError::MustBeWholeNumber { .. })));
        assert!(matches!(parse_count("0"), Err(ValidationError::MustBePositive { .. })));
        assert!(matches!(parse_count("1e12"), Err(ValidationError::InvalidNumber { .. })));
    }

    #[test]
    fn test_parse_field() {
        assert_eq!(parse_field(PizzaField::Count, "4").unwrap(), 4.0);
        assert_eq!(parse_field(PizzaField::Diameter, "28.5").unwrap(), 28.5);
        assert!(parse_field(PizzaField::Price, "free").is_err());
    }

    #[test]
    fn test_validate_currency_code() {
        assert_eq!(validate_currency_code(" eur ").unwrap().as_str(), "EUR");
        assert!(matches!(validate_currency_code("  "), Err(ValidationError::Required { .. })));

        let err = validate_currency_code("xxy").unwrap_err();
        assert_eq!(err.to_string(), "'XXY' is not a known currency code");
    }
}
