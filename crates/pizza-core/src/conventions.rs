//! # Unit Conventions
//!
//! Pure lookup tables mapping a country to the currency and distance unit its
//! people expect to see.
//!
//! ## Lookup Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CountryCode "DE"                                                       │
//! │       │                                                                 │
//! │       ├──► currency_for_country ──► COUNTRY_CURRENCIES ──► EUR          │
//! │       │                             (absent → FALLBACK_CURRENCY = USD)  │
//! │       │                                                                 │
//! │       └──► distance_unit_for_country ──► IMPERIAL_COUNTRIES? ──► cm     │
//! │                                                                         │
//! │  None of these functions can fail.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `KNOWN_CURRENCIES` is used for validating user input only. There is no
//! conversion between currencies anywhere in the system.

use tracing::trace;

use crate::types::{CountryCode, CurrencyCode, DistanceUnit};

/// Currency used when a country has no entry in [`COUNTRY_CURRENCIES`].
pub const FALLBACK_CURRENCY: CurrencyCode = CurrencyCode::from_static("USD");

/// Countries that measure pizzas in inches.
pub const IMPERIAL_COUNTRIES: &[&str] = &["US", "MM", "LR"];

/// Active ISO 4217 codes, sorted. The closed set accepted as a currency override.
pub const KNOWN_CURRENCIES: &[&str] = &[
    "AED", "AFN", "ALL", "AMD", "ANG", "AOA", "ARS", "AUD", "AWG", "AZN",
    "BAM", "BBD", "BDT", "BGN", "BHD", "BIF", "BMD", "BND", "BOB", "BRL",
    "BSD", "BTN", "BWP", "BYN", "BZD", "CAD", "CDF", "CHF", "CLP", "CNY",
    "COP", "CRC", "CUP", "CVE", "CZK", "DJF", "DKK", "DOP", "DZD", "EGP",
    "ERN", "ETB", "EUR", "FJD", "FKP", "GBP", "GEL", "GHS", "GIP", "GMD",
    "GNF", "GTQ", "GYD", "HKD", "HNL", "HTG", "HUF", "IDR", "ILS", "INR",
    "IQD", "IRR", "ISK", "JMD", "JOD", "JPY", "KES", "KGS", "KHR", "KMF",
    "KPW", "KRW", "KWD", "KYD", "KZT", "LAK", "LBP", "LKR", "LRD", "LSL",
    "LYD", "MAD", "MDL", "MGA", "MKD", "MMK", "MNT", "MOP", "MRU", "MUR",
    "MVR", "MWK", "MXN", "MYR", "MZN", "NAD", "NGN", "NIO", "NOK", "NPR",
    "NZD", "OMR", "PAB", "PEN", "PGK", "PHP", "PKR", "PLN", "PYG", "QAR",
    "RON", "RSD", "RUB", "RWF", "SAR", "SBD", "SCR", "SDG", "SEK", "SGD",
    "SHP", "SLE", "SOS", "SRD", "SSP", "STN", "SVC", "SYP", "SZL", "THB",
    "TJS", "TMT", "TND", "TOP", "TRY", "TTD", "TWD", "TZS", "UAH", "UGX",
    "USD", "UYU", "UZS", "VES", "VND", "VUV", "WST", "XAF", "XCD", "XOF",
    "XPF", "YER", "ZAR", "ZMW", "ZWL",
];

/// Country → local currency, sorted by country code.
pub const COUNTRY_CURRENCIES: &[(&str, &str)] = &[
    ("AD", "EUR"), ("AE", "AED"), ("AF", "AFN"), ("AG", "XCD"), ("AI", "XCD"),
    ("AL", "ALL"), ("AM", "AMD"), ("AO", "AOA"), ("AR", "ARS"), ("AS", "USD"),
    ("AT", "EUR"), ("AU", "AUD"), ("AW", "AWG"), ("AX", "EUR"), ("AZ", "AZN"),
    ("BA", "BAM"), ("BB", "BBD"), ("BD", "BDT"), ("BE", "EUR"), ("BF", "XOF"),
    ("BG", "BGN"), ("BH", "BHD"), ("BI", "BIF"), ("BJ", "XOF"), ("BL", "EUR"),
    ("BM", "BMD"), ("BN", "BND"), ("BO", "BOB"), ("BQ", "USD"), ("BR", "BRL"),
    ("BS", "BSD"), ("BT", "BTN"), ("BV", "NOK"), ("BW", "BWP"), ("BY", "BYN"),
    ("BZ", "BZD"), ("CA", "CAD"), ("CC", "AUD"), ("CD", "CDF"), ("CF", "XAF"),
    ("CG", "XAF"), ("CH", "CHF"), ("CI", "XOF"), ("CK", "NZD"), ("CL", "CLP"),
    ("CM", "XAF"), ("CN", "CNY"), ("CO", "COP"), ("CR", "CRC"), ("CU", "CUP"),
    ("CV", "CVE"), ("CW", "ANG"), ("CX", "AUD"), ("CY", "EUR"), ("CZ", "CZK"),
    ("DE", "EUR"), ("DJ", "DJF"), ("DK", "DKK"), ("DM", "XCD"), ("DO", "DOP"),
    ("DZ", "DZD"), ("EC", "USD"), ("EE", "EUR"), ("EG", "EGP"), ("EH", "MAD"),
    ("ER", "ERN"), ("ES", "EUR"), ("ET", "ETB"), ("FI", "EUR"), ("FJ", "FJD"),
    ("FK", "FKP"), ("FM", "USD"), ("FO", "DKK"), ("FR", "EUR"), ("GA", "XAF"),
    ("GB", "GBP"), ("GD", "XCD"), ("GE", "GEL"), ("GF", "EUR"), ("GG", "GBP"),
    ("GH", "GHS"), ("GI", "GIP"), ("GL", "DKK"), ("GM", "GMD"), ("GN", "GNF"),
    ("GP", "EUR"), ("GQ", "XAF"), ("GR", "EUR"), ("GS", "GBP"), ("GT", "GTQ"),
    ("GU", "USD"), ("GW", "XOF"), ("GY", "GYD"), ("HK", "HKD"), ("HM", "AUD"),
    ("HN", "HNL"), ("HR", "EUR"), ("HT", "HTG"), ("HU", "HUF"), ("ID", "IDR"),
    ("IE", "EUR"), ("IL", "ILS"), ("IM", "GBP"), ("IN", "INR"), ("IO", "USD"),
    ("IQ", "IQD"), ("IR", "IRR"), ("IS", "ISK"), ("IT", "EUR"), ("JE", "GBP"),
    ("JM", "JMD"), ("JO", "JOD"), ("JP", "JPY"), ("KE", "KES"), ("KG", "KGS"),
    ("KH", "KHR"), ("KI", "AUD"), ("KM", "KMF"), ("KN", "XCD"), ("KP", "KPW"),
    ("KR", "KRW"), ("KW", "KWD"), ("KY", "KYD"), ("KZ", "KZT"), ("LA", "LAK"),
    ("LB", "LBP"), ("LC", "XCD"), ("LI", "CHF"), ("LK", "LKR"), ("LR", "LRD"),
    ("LS", "LSL"), ("LT", "EUR"), ("LU", "EUR"), ("LV", "EUR"), ("LY", "LYD"),
    ("MA", "MAD"), ("MC", "EUR"), ("MD", "MDL"), ("ME", "EUR"), ("MF", "EUR"),
    ("MG", "MGA"), ("MH", "USD"), ("MK", "MKD"), ("ML", "XOF"), ("MM", "MMK"),
    ("MN", "MNT"), ("MO", "MOP"), ("MP", "USD"), ("MQ", "EUR"), ("MR", "MRU"),
    ("MS", "XCD"), ("MT", "EUR"), ("MU", "MUR"), ("MV", "MVR"), ("MW", "MWK"),
    ("MX", "MXN"), ("MY", "MYR"), ("MZ", "MZN"), ("NA", "NAD"), ("NC", "XPF"),
    ("NE", "XOF"), ("NF", "AUD"), ("NG", "NGN"), ("NI", "NIO"), ("NL", "EUR"),
    ("NO", "NOK"), ("NP", "NPR"), ("NR", "AUD"), ("NU", "NZD"), ("NZ", "NZD"),
    ("OM", "OMR"), ("PA", "PAB"), ("PE", "PEN"), ("PF", "XPF"), ("PG", "PGK"),
    ("PH", "PHP"), ("PK", "PKR"), ("PL", "PLN"), ("PM", "EUR"), ("PN", "NZD"),
    ("PR", "USD"), ("PS", "ILS"), ("PT", "EUR"), ("PW", "USD"), ("PY", "PYG"),
    ("QA", "QAR"), ("RE", "EUR"), ("RO", "RON"), ("RS", "RSD"), ("RU", "RUB"),
    ("RW", "RWF"), ("SA", "SAR"), ("SB", "SBD"), ("SC", "SCR"), ("SD", "SDG"),
    ("SE", "SEK"), ("SG", "SGD"), ("SH", "SHP"), ("SI", "EUR"), ("SJ", "NOK"),
    ("SK", "EUR"), ("SL", "SLE"), ("SM", "EUR"), ("SN", "XOF"), ("SO", "SOS"),
    ("SR", "SRD"), ("SS", "SSP"), ("ST", "STN"), ("SV", "USD"), ("SX", "ANG"),
    ("SY", "SYP"), ("SZ", "SZL"), ("TC", "USD"), ("TD", "XAF"), ("TF", "EUR"),
    ("TG", "XOF"), ("TH", "THB"), ("TJ", "TJS"), ("TK", "NZD"), ("TL", "USD"),
    ("TM", "TMT"), ("TN", "TND"), ("TO", "TOP"), ("TR", "TRY"), ("TT", "TTD"),
    ("TV", "AUD"), ("TW", "TWD"), ("TZ", "TZS"), ("UA", "UAH"), ("UG", "UGX"),
    ("UM", "USD"), ("US", "USD"), ("UY", "UYU"), ("UZ", "UZS"), ("VA", "EUR"),
    ("VC", "XCD"), ("VE", "VES"), ("VG", "USD"), ("VI", "USD"), ("VN", "VND"),
    ("VU", "VUV"), ("WF", "XPF"), ("WS", "WST"), ("XK", "EUR"), ("YE", "YER"),
    ("YT", "EUR"), ("ZA", "ZAR"), ("ZM", "ZMW"), ("ZW", "ZWL"),
];

/// Display symbols for the currencies people most often switch to.
/// Anything missing here is rendered with its code.
const CURRENCY_SYMBOLS: &[(&str, &str)] = &[
    ("AUD", "A$"),
    ("BRL", "R$"),
    ("CAD", "CA$"),
    ("CNY", "CN¥"),
    ("EUR", "€"),
    ("GBP", "£"),
    ("HKD", "HK$"),
    ("ILS", "₪"),
    ("INR", "₹"),
    ("JPY", "¥"),
    ("KRW", "₩"),
    ("MXN", "MX$"),
    ("NZD", "NZ$"),
    ("PHP", "₱"),
    ("TWD", "NT$"),
    ("USD", "$"),
    ("VND", "₫"),
];

// =============================================================================
// Lookups
// =============================================================================

/// Returns the local currency of `country`, or [`FALLBACK_CURRENCY`].
///
/// ```rust
/// use pizza_core::conventions::currency_for_country;
/// use pizza_core::CountryCode;
///
/// let pl = CountryCode::parse("PL").unwrap();
/// assert_eq!(currency_for_country(&pl).as_str(), "PLN");
///
/// let nowhere = CountryCode::parse("ZZ").unwrap();
/// assert_eq!(currency_for_country(&nowhere).as_str(), "USD");
/// ```
pub fn currency_for_country(country: &CountryCode) -> CurrencyCode {
    let found = COUNTRY_CURRENCIES
        .binary_search_by_key(&country.as_str(), |&(code, _)| code)
        .ok()
        .map(|index| CurrencyCode::from_static(COUNTRY_CURRENCIES[index].1));

    match found {
        Some(currency) => currency,
        None => {
            trace!(%country, fallback = %FALLBACK_CURRENCY, "No currency for country");
            FALLBACK_CURRENCY
        }
    }
}

/// Returns [`DistanceUnit::Inches`] for the imperial countries, else centimeters.
pub fn distance_unit_for_country(country: &CountryCode) -> DistanceUnit {
    if IMPERIAL_COUNTRIES.contains(&country.as_str()) {
        DistanceUnit::Inches
    } else {
        DistanceUnit::Centimeters
    }
}

/// Exact membership test against [`KNOWN_CURRENCIES`].
///
/// Case-sensitive: callers normalize to uppercase first.
pub fn is_known_currency(code: &str) -> bool {
    KNOWN_CURRENCIES.binary_search(&code).is_ok()
}

/// Returns the display symbol for a currency, if it has a short one.
pub fn currency_symbol(currency: CurrencyCode) -> Option<&'static str> {
    CURRENCY_SYMBOLS
        .iter()
        .find(|(code, _)| *code == currency.as_str())
        .map(|(_, symbol)| *symbol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn country(code: &str) -> CountryCode {
        CountryCode::parse(code).unwrap()
    }

    #[test]
    fn test_tables_are_sorted_and_unique() {
        assert!(KNOWN_CURRENCIES.windows(2).all(|w| w[0] < w[1]));
        assert!(COUNTRY_CURRENCIES.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_every_table_currency_is_known() {
        for (country, currency) in COUNTRY_CURRENCIES {
            assert!(
                is_known_currency(currency),
                "{} maps to unknown currency {}",
                country,
                currency
            );
            assert!(CountryCode::parse(country).is_some());
        }
        assert!(is_known_currency(FALLBACK_CURRENCY.as_str()));
    }

    #[test]
    fn test_currency_for_country() {
        assert_eq!(currency_for_country(&country("US")).as_str(), "USD");
        assert_eq!(currency_for_country(&country("DE")).as_str(), "EUR");
        assert_eq!(currency_for_country(&country("GB")).as_str(), "GBP");
        assert_eq!(currency_for_country(&country("JP")).as_str(), "JPY");
        assert_eq!(currency_for_country(&country("ZZ")), FALLBACK_CURRENCY);
    }

    #[test]
    fn test_distance_unit_for_imperial_countries() {
        for code in IMPERIAL_COUNTRIES {
            assert_eq!(distance_unit_for_country(&country(code)), DistanceUnit::Inches);
        }
        assert_eq!(distance_unit_for_country(&country("GB")), DistanceUnit::Centimeters);
        assert_eq!(distance_unit_for_country(&country("CA")), DistanceUnit::Centimeters);
    }

    #[test]
    fn test_is_known_currency_is_case_sensitive() {
        assert!(is_known_currency("EUR"));
        assert!(!is_known_currency("eur"));
        assert!(!is_known_currency("XXX"));
        assert!(!is_known_currency(""));
    }

    #[test]
    fn test_currency_symbol() {
        assert_eq!(currency_symbol(FALLBACK_CURRENCY), Some("$"));
        assert_eq!(currency_symbol(CurrencyCode::parse("PLN").unwrap()), None);
    }

    proptest! {
        #[test]
        fn prop_unlisted_countries_fall_back(code in "[A-Z]{2}") {
            let parsed = country(&code);
            let listed = COUNTRY_CURRENCIES.iter().any(|(c, _)| *c == code);
            let currency = currency_for_country(&parsed);
            if listed {
                prop_assert!(is_known_currency(currency.as_str()));
            } else {
                prop_assert_eq!(currency, FALLBACK_CURRENCY);
            }
        }

        #[test]
        fn prop_only_imperial_countries_use_inches(code in "[A-Z]{2}") {
            let unit = distance_unit_for_country(&country(&code));
            let imperial = IMPERIAL_COUNTRIES.contains(&code.as_str());
            prop_assert_eq!(unit == DistanceUnit::Inches, imperial);
        }
    }
}
