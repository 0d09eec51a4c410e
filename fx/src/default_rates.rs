//! Static last-resort rate table.

use stayline_common::RateTable;

/// Approximate USD-relative rates for the major display currencies.
///
/// Used only when every provider is down and no usable persisted record
/// exists. A placeholder, not an observation: it is never written to the
/// memory slot or the store.
pub fn default_rate_table() -> RateTable {
    RateTable::from_pairs([
        ("EUR", 0.92),
        ("GBP", 0.79),
        ("JPY", 150.0),
        ("CAD", 1.36),
        ("AUD", 1.52),
        ("CHF", 0.88),
        ("CNY", 7.20),
        ("INR", 83.0),
        ("BRL", 5.0),
        ("MXN", 17.0),
        ("KRW", 1330.0),
        ("SEK", 10.5),
        ("NOK", 10.6),
        ("DKK", 6.9),
        ("PLN", 4.0),
        ("TRY", 32.0),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_usable() {
        let table = default_rate_table();
        assert!(!table.is_empty());
        assert!(table.contains("EUR"));
        assert!(table.contains("USD"));
    }

    #[test]
    fn test_default_rates_positive() {
        for (code, rate) in default_rate_table().iter() {
            assert!(rate > 0.0, "rate for {code} must be positive");
        }
    }
}
