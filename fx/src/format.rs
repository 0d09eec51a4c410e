//! Locale-aware display formatting with a symbol-table fallback.
//!
//! Mirrors the cache's totality guarantee: formatting never fails outward.
//! An unsupported locale or currency degrades to a plain symbol prefix, and
//! a code without a known symbol is rendered with the raw code as prefix.

use stayline_common::Currency;
use tracing::debug;

use crate::error::FormatError;

/// Locale used when the caller supplies none.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Display pattern for one locale family.
#[derive(Debug, Clone, Copy)]
struct LocalePattern {
    decimal_sep: char,
    group_sep: Option<char>,
    symbol_first: bool,
}

/// Patterns are keyed on the primary language subtag; regional variants
/// share their language's pattern.
fn pattern_for(locale: &str) -> Result<LocalePattern, FormatError> {
    let primary = locale.split(['-', '_']).next().unwrap_or(locale);

    match primary {
        "en" => Ok(LocalePattern {
            decimal_sep: '.',
            group_sep: Some(','),
            symbol_first: true,
        }),
        "de" | "es" | "it" | "nl" | "pt" | "ru" | "pl" | "tr" => Ok(LocalePattern {
            decimal_sep: ',',
            group_sep: Some('.'),
            symbol_first: false,
        }),
        "fr" | "sv" | "nb" | "da" | "fi" => Ok(LocalePattern {
            decimal_sep: ',',
            group_sep: Some(' '),
            symbol_first: false,
        }),
        "ja" | "zh" | "ko" => Ok(LocalePattern {
            decimal_sep: '.',
            group_sep: Some(','),
            symbol_first: true,
        }),
        _ => Err(FormatError::UnknownLocale(locale.to_string())),
    }
}

/// Render an amount with its currency as a display string.
///
/// Total: any formatting failure is recovered via the symbol fallback.
pub fn format(amount: f64, currency: &Currency, locale: Option<&str>) -> String {
    let locale = locale.unwrap_or(DEFAULT_LOCALE);

    match locale_format(amount, currency, locale) {
        Ok(rendered) => rendered,
        Err(e) => {
            debug!(currency = %currency, locale, error = %e, "Locale formatting unavailable, using symbol fallback");
            fallback_format(amount, currency)
        }
    }
}

fn locale_format(amount: f64, currency: &Currency, locale: &str) -> Result<String, FormatError> {
    let pattern = pattern_for(locale)?;
    let symbol = currency
        .symbol()
        .ok_or_else(|| FormatError::UnknownCurrency(currency.code().to_string()))?;

    let number = render_number(amount.abs(), currency.decimal_places(), pattern);
    let sign = if amount < 0.0 { "-" } else { "" };

    Ok(if pattern.symbol_first {
        format!("{sign}{symbol}{number}")
    } else {
        format!("{sign}{number} {symbol}")
    })
}

/// Static fallback: known symbol as prefix, else the raw code.
fn fallback_format(amount: f64, currency: &Currency) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let number = format!(
        "{:.*}",
        currency.decimal_places() as usize,
        amount.abs()
    );

    match currency.symbol() {
        Some(symbol) => format!("{sign}{symbol}{number}"),
        None => format!("{} {sign}{number}", currency.code()),
    }
}

fn render_number(amount: f64, places: u32, pattern: LocalePattern) -> String {
    let fixed = format!("{:.*}", places as usize, amount);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    let mut out = match pattern.group_sep {
        Some(sep) => group_digits(int_part, sep),
        None => int_part.to_string(),
    };

    if let Some(frac) = frac_part {
        out.push(pattern.decimal_sep);
        out.push_str(frac);
    }

    out
}

fn group_digits(digits: &str, sep: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usd_default_locale() {
        assert_eq!(format(100.0, &Currency::usd(), None), "$100.00");
    }

    #[test]
    fn test_grouping_en() {
        assert_eq!(
            format(1234567.891, &Currency::usd(), Some("en-US")),
            "$1,234,567.89"
        );
    }

    #[test]
    fn test_de_locale_pattern() {
        assert_eq!(
            format(1234.56, &Currency::eur(), Some("de-DE")),
            "1.234,56 €"
        );
    }

    #[test]
    fn test_fr_locale_pattern() {
        assert_eq!(
            format(1234.56, &Currency::eur(), Some("fr-FR")),
            "1 234,56 €"
        );
    }

    #[test]
    fn test_zero_decimal_currency() {
        assert_eq!(format(1500.0, &Currency::jpy(), Some("en-US")), "¥1,500");
    }

    #[test]
    fn test_unknown_code_uses_raw_prefix() {
        assert_eq!(format(100.0, &Currency::new("ZZZ"), None), "ZZZ 100.00");
    }

    #[test]
    fn test_unknown_locale_falls_back_to_symbol() {
        assert_eq!(format(100.0, &Currency::usd(), Some("xx-XX")), "$100.00");
    }

    #[test]
    fn test_negative_amount() {
        assert_eq!(format(-12.34, &Currency::usd(), None), "-$12.34");
        assert_eq!(format(-12.34, &Currency::eur(), Some("de-DE")), "-12,34 €");
    }

    #[test]
    fn test_language_subtag_fallback() {
        // A regional variant without its own entry shares the language
        // pattern rather than failing.
        assert_eq!(format(100.0, &Currency::usd(), Some("en-AU")), "$100.00");
        assert_eq!(format(100.0, &Currency::eur(), Some("de-AT")), "100,00 €");
    }
}
