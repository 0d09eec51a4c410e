//! Currency identification and display metadata.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The pivot currency through which all conversions route.
pub const PIVOT_CURRENCY: &str = "USD";

/// ISO 4217 currency code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Currency(String);

impl Currency {
    /// Create a new currency from code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    /// Get the currency code.
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Whether this is the pivot currency.
    pub fn is_pivot(&self) -> bool {
        self.0 == PIVOT_CURRENCY
    }

    /// Get the standard decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self.0.as_str() {
            "JPY" | "KRW" | "VND" => 0,
            "BHD" | "KWD" | "OMR" => 3,
            _ => 2,
        }
    }

    /// Get the display symbol, if one is known.
    ///
    /// Codes without an entry are rendered with the raw code as prefix.
    pub fn symbol(&self) -> Option<&'static str> {
        match self.0.as_str() {
            "USD" => Some("$"),
            "EUR" => Some("€"),
            "GBP" => Some("£"),
            "JPY" => Some("¥"),
            "CNY" => Some("CN¥"),
            "INR" => Some("₹"),
            "KRW" => Some("₩"),
            "BRL" => Some("R$"),
            "CAD" => Some("CA$"),
            "AUD" => Some("A$"),
            "MXN" => Some("MX$"),
            "CHF" => Some("CHF"),
            "SEK" | "NOK" | "DKK" => Some("kr"),
            "PLN" => Some("zł"),
            "RUB" => Some("₽"),
            "TRY" => Some("₺"),
            _ => None,
        }
    }

    /// Common currencies
    pub fn usd() -> Self {
        Self::new("USD")
    }

    pub fn eur() -> Self {
        Self::new("EUR")
    }

    pub fn gbp() -> Self {
        Self::new("GBP")
    }

    pub fn jpy() -> Self {
        Self::new("JPY")
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Currency {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
