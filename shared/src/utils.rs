// Display formatting and input coercion shared by the engine and its front ends.
use crate::models::Currency;

// Turns raw field text into a number the model can use.
// Anything that does not parse as a finite number becomes 0.
pub fn coerce_number(raw: &str) -> f64 {
    let normalized = raw.trim().replace(',', "");
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

// Same as `coerce_number`, truncated to a non-negative integer count.
pub fn coerce_count(raw: &str) -> u32 {
    let value = coerce_number(raw);
    if value <= 0.0 {
        0
    } else if value >= u32::MAX as f64 {
        u32::MAX
    } else {
        value.trunc() as u32
    }
}

fn group_thousands(integer_part: &str) -> String {
    let mut grouped = String::with_capacity(integer_part.len() + integer_part.len() / 3);
    for (i, ch) in integer_part.chars().enumerate() {
        if i > 0 && (integer_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

// Formats with thousands separators, e.g. 1234567.891 -> "1,234,567.89".
pub fn format_decimal(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.decimals$}", value.abs(), decimals = decimals);
    let (integer_part, fraction) = match formatted.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (formatted.as_str(), None),
    };
    let mut out = String::new();
    if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        out.push('-');
    }
    out.push_str(&group_thousands(integer_part));
    if let Some(frac) = fraction {
        out.push('.');
        out.push_str(frac);
    }
    out
}

// Symbol only. The magnitude is shown as-is in whatever currency is selected.
pub fn format_currency(amount: f64, currency: Currency) -> String {
    let decimals = if currency == Currency::JPY { 0 } else { 2 };
    let body = format_decimal(amount.abs(), decimals);
    if amount < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-{}{}", currency.symbol(), body)
    } else {
        format!("{}{}", currency.symbol(), body)
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{}%", format_decimal(value, 1))
}

pub fn format_ratio(value: f64) -> String {
    format!("{:.2}:1", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_number_valid() {
        assert_eq!(coerce_number("42"), 42.0);
        assert_eq!(coerce_number(" 3.5 "), 3.5);
        assert_eq!(coerce_number("1,500"), 1500.0);
        assert_eq!(coerce_number("-2"), -2.0);
    }

    #[test]
    fn test_coerce_number_invalid_is_zero() {
        assert_eq!(coerce_number(""), 0.0);
        assert_eq!(coerce_number("abc"), 0.0);
        assert_eq!(coerce_number("NaN"), 0.0);
        assert_eq!(coerce_number("inf"), 0.0);
    }

    #[test]
    fn test_coerce_count() {
        assert_eq!(coerce_count("40"), 40);
        assert_eq!(coerce_count("12.9"), 12);
        assert_eq!(coerce_count("-5"), 0);
        assert_eq!(coerce_count("lots"), 0);
    }

    #[test]
    fn test_format_decimal_grouping() {
        assert_eq!(format_decimal(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_decimal(999.0, 0), "999");
        assert_eq!(format_decimal(1000.0, 0), "1,000");
        assert_eq!(format_decimal(-1500.5, 1), "-1,500.5");
        assert_eq!(format_decimal(0.0, 2), "0.00");
    }

    #[test]
    fn test_format_currency_uses_symbol_without_conversion() {
        assert_eq!(format_currency(160000.0, Currency::USD), "$160,000.00");
        assert_eq!(format_currency(160000.0, Currency::EUR), "€160,000.00");
        assert_eq!(format_currency(-250.0, Currency::GBP), "-£250.00");
        assert_eq!(format_currency(1234.4, Currency::JPY), "¥1,234");
    }

    #[test]
    fn test_format_percent_and_ratio() {
        assert_eq!(format_percent(-100.0), "-100.0%");
        assert_eq!(format_percent(1234.56), "1,234.6%");
        assert_eq!(format_ratio(3.0), "3.00:1");
    }
}
