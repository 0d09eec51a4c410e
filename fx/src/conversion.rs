//! Pure USD-pivot conversion.

use stayline_common::{Currency, RateTable};

/// Convert an amount between two currencies through the USD pivot.
///
/// Equal codes short-circuit to the unchanged amount, avoiding float noise.
/// Codes missing from the table price at USD parity via the table's lenient
/// lookup. The result is rounded to 2 decimals at the last step only, never
/// at the intermediate pivot. Pure: no I/O, no cache access.
pub fn convert(amount: f64, from: &Currency, to: &Currency, rates: &RateTable) -> f64 {
    if from == to {
        return amount;
    }

    let usd = if from.is_pivot() {
        amount
    } else {
        amount / rates.rate_or_parity(from.code())
    };

    let result = if to.is_pivot() {
        usd
    } else {
        usd * rates.rate_or_parity(to.code())
    };

    round_cents(result)
}

/// Round to 2 decimals, applied once at the end of a conversion.
fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn table() -> RateTable {
        RateTable::from_pairs([("EUR", 0.9), ("GBP", 0.8), ("JPY", 150.0)])
    }

    #[test]
    fn test_identity_is_exact() {
        let amount = 123.456789;
        assert_eq!(convert(amount, &Currency::eur(), &Currency::eur(), &table()), amount);
        assert_eq!(convert(amount, &Currency::usd(), &Currency::usd(), &table()), amount);
    }

    #[test]
    fn test_usd_to_other() {
        assert_eq!(convert(100.0, &Currency::usd(), &Currency::eur(), &table()), 90.0);
        assert_eq!(convert(100.0, &Currency::usd(), &Currency::jpy(), &table()), 15000.0);
    }

    #[test]
    fn test_other_to_usd() {
        assert_eq!(convert(90.0, &Currency::eur(), &Currency::usd(), &table()), 100.0);
    }

    #[test]
    fn test_cross_currency_pivots_through_usd() {
        // 90 EUR -> 100 USD -> 80 GBP
        assert_eq!(convert(90.0, &Currency::eur(), &Currency::gbp(), &table()), 80.0);
    }

    #[test]
    fn test_unknown_code_prices_at_parity() {
        let zzz = Currency::new("ZZZ");
        assert_eq!(convert(100.0, &Currency::usd(), &zzz, &table()), 100.0);
        assert_eq!(convert(100.0, &zzz, &Currency::eur(), &table()), 90.0);
    }

    #[test]
    fn test_rounds_only_at_final_step() {
        let rates = RateTable::from_pairs([("EUR", 3.0), ("GBP", 7.0)]);
        // 1 EUR -> 0.333... USD -> 2.333... GBP. Rounding the intermediate
        // pivot would give 0.33 * 7 = 2.31 instead.
        assert_eq!(convert(1.0, &Currency::eur(), &Currency::gbp(), &rates), 2.33);
    }

    #[test]
    fn test_result_rounded_to_cents() {
        let rates = RateTable::from_pairs([("EUR", 0.915)]);
        assert_eq!(convert(10.0, &Currency::usd(), &Currency::eur(), &rates), 9.15);
        assert_eq!(convert(1.0, &Currency::usd(), &Currency::eur(), &rates), 0.92);
    }

    proptest! {
        #[test]
        fn prop_identity_conversion(amount in -1.0e9f64..1.0e9) {
            prop_assert_eq!(convert(amount, &Currency::eur(), &Currency::eur(), &table()), amount);
        }

        #[test]
        fn prop_usd_to_target_matches_rounded_product(amount in 0.0f64..1.0e7) {
            let expected = (amount * 0.9 * 100.0).round() / 100.0;
            prop_assert_eq!(convert(amount, &Currency::usd(), &Currency::eur(), &table()), expected);
        }

        #[test]
        fn prop_result_has_at_most_two_decimals(amount in 0.0f64..1.0e7) {
            let result = convert(amount, &Currency::usd(), &Currency::eur(), &table());
            let scaled = result * 100.0;
            prop_assert!((scaled - scaled.round()).abs() < 1e-6);
        }
    }
}
