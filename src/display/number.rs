//! Locale-aware number formatting
//!
//! Digits are always grouped, fractions are trimmed of trailing zeros and
//! ties round away from zero.

use crate::config::LocaleSettings;
use crate::reports::AxisScale;

/// Format with grouping and no decimals
pub fn format_number(value: f64, locale: &LocaleSettings) -> String {
    format_number_with(value, 0, locale)
}

/// Format with grouping and at most `max_decimals` decimals
pub fn format_number_with(value: f64, max_decimals: usize, locale: &LocaleSettings) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let scale = 10f64.powi(max_decimals as i32);
    let rounded = (value.abs() * scale).round() / scale;
    let negative = value < 0.0 && rounded != 0.0;

    let digits = format!("{:.*}", max_decimals, rounded);
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, fraction.trim_end_matches('0')),
        None => (digits.as_str(), ""),
    };

    let mut out = String::with_capacity(digits.len() + whole.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    out.push_str(&group_digits(whole, locale.thousands_separator));
    if !fraction.is_empty() {
        out.push(locale.decimal_separator);
        out.push_str(fraction);
    }
    out
}

/// Whole amount followed by the currency symbol, e.g. `1.234 €`
pub fn format_currency(value: f64, locale: &LocaleSettings) -> String {
    format!("{} {}", format_number(value, locale), locale.currency_symbol)
}

/// Axis tick label under the active scale
///
/// Whole-thousand steps show values in thousands with the thousands suffix.
pub fn format_tick(value: f64, scale: &AxisScale, locale: &LocaleSettings) -> String {
    if scale.is_thousands() {
        format!(
            "{} {}",
            format_number(value / 1000.0, locale),
            locale.thousands_suffix
        )
    } else {
        format_currency(value, locale)
    }
}

fn group_digits(whole: &str, separator: char) -> String {
    let len = whole.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn es() -> LocaleSettings {
        LocaleSettings::default()
    }

    #[test]
    fn test_grouping() {
        assert_eq!(format_number(0.0, &es()), "0");
        assert_eq!(format_number(999.0, &es()), "999");
        assert_eq!(format_number(1234.0, &es()), "1.234");
        assert_eq!(format_number(1234567.0, &es()), "1.234.567");
        assert_eq!(format_number(-45210.0, &es()), "-45.210");
    }

    #[test]
    fn test_rounding_away_from_zero() {
        assert_eq!(format_number(2.5, &es()), "3");
        assert_eq!(format_number(-2.5, &es()), "-3");
        assert_eq!(format_number(-0.4, &es()), "0");
    }

    #[test]
    fn test_decimals_trimmed() {
        assert_eq!(format_number_with(0.3, 1, &es()), "0,3");
        assert_eq!(format_number_with(2.0, 1, &es()), "2");
        assert_eq!(format_number_with(1234.56, 1, &es()), "1.234,6");
    }

    #[test]
    fn test_currency() {
        assert_eq!(format_currency(1612.6875, &es()), "1.613 €");
    }

    #[test]
    fn test_ticks() {
        let thousands = AxisScale {
            step_size: Some(10_000),
        };
        let auto = AxisScale { step_size: None };
        assert_eq!(format_tick(20_000.0, &thousands, &es()), "20 k€");
        assert_eq!(format_tick(2_500.0, &thousands, &es()), "3 k€");
        assert_eq!(format_tick(2_500.0, &auto, &es()), "2.500 €");
    }

    #[test]
    fn test_other_locale() {
        let en = LocaleSettings {
            thousands_separator: ',',
            decimal_separator: '.',
            currency_symbol: "$".into(),
            thousands_suffix: "k$".into(),
        };
        assert_eq!(format_number_with(9876543.25, 2, &en), "9,876,543.25");
    }
}
