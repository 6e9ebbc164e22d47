//! Parsers for locale-formatted numbers and clock times.

use tracing::warn;

/// Convert a European-formatted number string into a float.
///
/// Thousands are separated with `.` and decimals with `,`; the value may
/// carry a leading sign and a trailing `%` or currency glyph.
///
/// Examples:
/// - `"240.937,98"` -> `240937.98`
/// - `"41,71%"` -> `41.71`
/// - `"+70.864,27"` -> `70864.27`
/// - `"-1.615,47"` -> `-1615.47`
///
/// Empty or unparseable input yields `0.0`; callers must accept the zero
/// fallback instead of a missing value.
pub fn parse_locale_number(value: &str) -> f64 {
    if value.is_empty() {
        return 0.0;
    }

    let cleaned: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '%' && *c != '€')
        .collect();
    let negative = cleaned.starts_with('-');
    let unsigned = cleaned.trim_start_matches(['+', '-']);
    let normalized = unsigned.replace('.', "").replace(',', ".");

    match normalized.parse::<f64>() {
        Ok(number) if negative => -number,
        Ok(number) => number,
        Err(_) => {
            warn!("could not parse number: {value}");
            0.0
        }
    }
}

/// Parse an `"HH:MM"` string into an (hour, minute) pair.
///
/// Returns `None` when the string does not split into two integer fields; a
/// schedule entry that fails to parse never matches.
pub fn parse_clock_time(value: &str) -> Option<(u32, u32)> {
    let (hour, minute) = value.split_once(':')?;
    Some((hour.trim().parse().ok()?, minute.trim().parse().ok()?))
}

/// Normalize a portfolio name for use in identifiers.
///
/// Lowercases the name, turns spaces into underscores, and drops everything
/// else that is not ASCII alphanumeric. `"John's Crypto"` -> `"johns_crypto"`.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c == ' ' { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locale_number() {
        assert_eq!(parse_locale_number("240.937,98"), 240937.98);
        assert_eq!(parse_locale_number("41,71%"), 41.71);
        assert_eq!(parse_locale_number("+70.864,27"), 70864.27);
        assert_eq!(parse_locale_number("-1.615,47"), -1615.47);
        assert_eq!(parse_locale_number("-0,67%"), -0.67);
    }

    #[test]
    fn test_parse_locale_number_strips_currency() {
        assert_eq!(parse_locale_number("1.234,50 €"), 1234.5);
    }

    #[test]
    fn test_parse_locale_number_fallback() {
        assert_eq!(parse_locale_number(""), 0.0);
        assert_eq!(parse_locale_number("garbage"), 0.0);
        assert_eq!(parse_locale_number("%"), 0.0);
    }

    #[test]
    fn test_parse_clock_time() {
        assert_eq!(parse_clock_time("22:05"), Some((22, 5)));
        assert_eq!(parse_clock_time("04:00"), Some((4, 0)));
        assert_eq!(parse_clock_time("4"), None);
        assert_eq!(parse_clock_time("late:night"), None);
        assert_eq!(parse_clock_time(""), None);
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("John's Crypto"), "johns_crypto");
        assert_eq!(normalize_name("Main Portfolio"), "main_portfolio");
        assert_eq!(normalize_name("ETFs (2024)"), "etfs_2024");
    }
}
