//! # Domain Types
//!
//! Small value types shared by every layer of Pizza Compare.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CountryCode    │   │  CurrencyCode   │   │  DistanceUnit   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  "US", "DE"     │   │  "USD", "EUR"   │   │  cm | in        │       │
//! │  │  2 uppercase    │   │  known ISO 4217 │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌───────────────────────────────────────┐                              │
//! │  │  EffectiveSettings                    │  What the renderer uses      │
//! │  │  currency + distance_unit             │  and what the change         │
//! │  └───────────────────────────────────────┘  channel carries             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both code types can only be built through validation, so a value in hand is
//! always well formed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::conventions;
use crate::error::{CoreError, CoreResult};

// =============================================================================
// Country Code
// =============================================================================

/// A 2-letter uppercase region identifier (ISO 3166-1 alpha-2 shaped).
///
/// Only the shape is checked. `"ZZ"` is a valid `CountryCode` that simply has
/// no entry in the convention tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode([u8; 2]);

impl CountryCode {
    /// Parses an exact 2-letter uppercase code.
    ///
    /// ```rust
    /// use pizza_core::CountryCode;
    ///
    /// assert_eq!(CountryCode::parse("US").unwrap().as_str(), "US");
    /// assert!(CountryCode::parse("us").is_none());
    /// assert!(CountryCode::parse("USA").is_none());
    /// ```
    pub fn parse(code: &str) -> Option<Self> {
        match code.as_bytes() {
            [a, b] if a.is_ascii_uppercase() && b.is_ascii_uppercase() => {
                Some(CountryCode([*a, *b]))
            }
            _ => None,
        }
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // Both bytes are ASCII uppercase by construction.
        std::str::from_utf8(&self.0).unwrap_or("")
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CountryCode {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        CountryCode::parse(s).ok_or_else(|| CoreError::InvalidCountryCode(s.to_string()))
    }
}

impl TryFrom<String> for CountryCode {
    type Error = CoreError;

    fn try_from(value: String) -> CoreResult<Self> {
        value.parse()
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> Self {
        code.as_str().to_string()
    }
}

// =============================================================================
// Currency Code
// =============================================================================

/// A currency code drawn from the closed [`conventions::KNOWN_CURRENCIES`] set.
///
/// Holding a `CurrencyCode` means the code has already been validated, which
/// is why the settings store can persist it without re-checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct CurrencyCode(&'static str);

// Equivalent to `#[serde(try_from = "String")]`; written by hand because the
// derive infers a `'de: 'static` bound from the `&'static str` field.
impl<'de> Deserialize<'de> for CurrencyCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        CurrencyCode::try_from(value).map_err(serde::de::Error::custom)
    }
}

impl CurrencyCode {
    /// Looks up a code, normalizing surrounding whitespace and case.
    ///
    /// ```rust
    /// use pizza_core::CurrencyCode;
    ///
    /// assert_eq!(CurrencyCode::parse(" eur ").unwrap().as_str(), "EUR");
    /// assert!(CurrencyCode::parse("XXY").is_none());
    /// ```
    pub fn parse(code: &str) -> Option<Self> {
        let normalized = code.trim().to_ascii_uppercase();
        conventions::KNOWN_CURRENCIES
            .iter()
            .copied()
            .find(|known| *known == normalized)
            .map(CurrencyCode)
    }

    /// Builds a code from a table entry. Callers guarantee membership.
    pub(crate) const fn from_static(code: &'static str) -> Self {
        CurrencyCode(code)
    }

    /// Returns the 3-letter code.
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        CurrencyCode::parse(s).ok_or_else(|| CoreError::UnknownCurrency(s.to_string()))
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = CoreError;

    fn try_from(value: String) -> CoreResult<Self> {
        value.parse()
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0.to_string()
    }
}

// =============================================================================
// Distance Unit
// =============================================================================

/// The unit diameters are entered in and areas are displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum DistanceUnit {
    /// Metric, used everywhere except the imperial countries.
    #[serde(rename = "cm")]
    Centimeters,
    /// Imperial (US, MM, LR).
    #[serde(rename = "in")]
    Inches,
}

impl DistanceUnit {
    /// Returns the short symbol shown next to numbers (`cm` / `in`).
    pub const fn symbol(&self) -> &'static str {
        match self {
            DistanceUnit::Centimeters => "cm",
            DistanceUnit::Inches => "in",
        }
    }

    /// Returns the other unit. The settings dialog uses this to toggle its radio pair.
    pub const fn other(&self) -> Self {
        match self {
            DistanceUnit::Centimeters => DistanceUnit::Inches,
            DistanceUnit::Inches => DistanceUnit::Centimeters,
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for DistanceUnit {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "cm" | "centimeter" | "centimeters" => Ok(DistanceUnit::Centimeters),
            "in" | "inch" | "inches" => Ok(DistanceUnit::Inches),
            _ => Err(CoreError::UnknownDistanceUnit(s.to_string())),
        }
    }
}

// =============================================================================
// Effective Settings
// =============================================================================

/// The currency and distance unit actually used for display.
///
/// Produced by the settings store and carried by every settings-change
/// notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveSettings {
    #[ts(type = "string")]
    pub currency: CurrencyCode,
    pub distance_unit: DistanceUnit,
}

impl EffectiveSettings {
    pub const fn new(currency: CurrencyCode, distance_unit: DistanceUnit) -> Self {
        EffectiveSettings {
            currency,
            distance_unit,
        }
    }
}

impl fmt::Display for EffectiveSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.currency, self.distance_unit)
    }
}
