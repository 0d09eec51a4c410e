//! USD-relative exchange rate tables.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::currency::PIVOT_CURRENCY;

/// A table of exchange rates expressed as units per 1 USD.
///
/// The pivot currency is implicit identity and is never stored. Tables
/// handed to consumers are always non-empty, whichever source produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable(HashMap<String, f64>);

impl RateTable {
    /// Build a table from a raw provider map.
    ///
    /// Drops the pivot entry and any rate that is not a positive finite
    /// number. Returns `None` if nothing usable remains.
    pub fn from_map(map: HashMap<String, f64>) -> Option<Self> {
        let cleaned: HashMap<String, f64> = map
            .into_iter()
            .map(|(code, rate)| (code.to_uppercase(), rate))
            .filter(|(code, rate)| code != PIVOT_CURRENCY && rate.is_finite() && *rate > 0.0)
            .collect();

        if cleaned.is_empty() {
            None
        } else {
            Some(Self(cleaned))
        }
    }

    /// Build a table from known-good pairs. Used for static tables and tests.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(code, rate)| (code.into().to_uppercase(), rate))
                .filter(|(code, _)| code != PIVOT_CURRENCY)
                .collect(),
        )
    }

    /// Re-validate a table that entered from untrusted storage.
    ///
    /// A persisted record decodes cleanly whatever its `rates` object holds;
    /// running it through the same cleaning as provider bodies keeps the
    /// non-empty invariant. `None` means nothing usable remained.
    pub fn sanitize(self) -> Option<Self> {
        Self::from_map(self.0)
    }

    /// Get the rate for a currency code, if present.
    pub fn get(&self, code: &str) -> Option<f64> {
        if code == PIVOT_CURRENCY {
            return Some(1.0);
        }
        self.0.get(code).copied()
    }

    /// Lenient lookup: a code absent from the table is priced at USD parity.
    ///
    /// An unsupported currency must never block rendering; the cost is a
    /// silently wrong number for that one code.
    pub fn rate_or_parity(&self, code: &str) -> f64 {
        self.get(code).unwrap_or(1.0)
    }

    /// Whether the table carries a rate for the given code.
    pub fn contains(&self, code: &str) -> bool {
        code == PIVOT_CURRENCY || self.0.contains_key(code)
    }

    /// Number of stored rates (excluding the implicit pivot).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table stores no rates at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over stored `(code, rate)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(code, rate)| (code.as_str(), *rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_map_drops_pivot_and_junk() {
        let mut map = HashMap::new();
        map.insert("USD".to_string(), 1.0);
        map.insert("EUR".to_string(), 0.9);
        map.insert("BAD".to_string(), -3.0);
        map.insert("NAN".to_string(), f64::NAN);

        let table = RateTable::from_map(map).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("EUR"), Some(0.9));
        assert!(!table.contains("BAD"));
    }

    #[test]
    fn test_from_map_empty_is_none() {
        let mut map = HashMap::new();
        map.insert("USD".to_string(), 1.0);
        assert!(RateTable::from_map(map).is_none());
        assert!(RateTable::from_map(HashMap::new()).is_none());
    }

    #[test]
    fn test_pivot_is_identity() {
        let table = RateTable::from_pairs([("EUR", 0.9)]);
        assert_eq!(table.get("USD"), Some(1.0));
        assert!(table.contains("USD"));
    }

    #[test]
    fn test_rate_or_parity() {
        let table = RateTable::from_pairs([("EUR", 0.9)]);
        assert_eq!(table.rate_or_parity("EUR"), 0.9);
        assert_eq!(table.rate_or_parity("USD"), 1.0);
        // Unknown codes default to parity rather than failing.
        assert_eq!(table.rate_or_parity("ZZZ"), 1.0);
    }

    #[test]
    fn test_sanitize_rejects_unusable_tables() {
        let empty: RateTable = serde_json::from_str("{}").unwrap();
        assert!(empty.sanitize().is_none());

        let junk: RateTable = serde_json::from_str(r#"{"EUR": -1.0, "USD": 1.0}"#).unwrap();
        assert!(junk.sanitize().is_none());
    }

    #[test]
    fn test_sanitize_keeps_good_entries() {
        let mixed: RateTable = serde_json::from_str(r#"{"EUR": 0.9, "BAD": -1.0}"#).unwrap();
        let cleaned = mixed.sanitize().unwrap();
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned.get("EUR"), Some(0.9));
    }

    #[test]
    fn test_codes_uppercased() {
        let table = RateTable::from_pairs([("eur", 0.9)]);
        assert_eq!(table.get("EUR"), Some(0.9));
    }
}
