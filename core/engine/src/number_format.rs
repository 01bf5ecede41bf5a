//! FILENAME: core/engine/src/number_format.rs
//! PURPOSE: Number formatting utilities for labels and exported values.
//! CONTEXT: Chart text labels use currency formatting (`$1,234.56`);
//! table cells and CSV exports use the general format.

/// Format a number in general format (auto-detect best representation).
pub fn format_general(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    // For integers, don't show decimal point
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{:.0}", value);
    }

    // Shortest representation that round-trips
    format!("{}", value)
}

/// Format a number with specified decimal places and thousands separators.
pub fn format_decimal(value: f64, decimal_places: u8) -> String {
    add_thousands_separator(&format!("{:.prec$}", value, prec = decimal_places as usize))
}

/// Format a number as currency with the symbol in front. The sign follows
/// the symbol, so negative amounts read `$-1,234.50`.
pub fn format_currency(value: f64, decimal_places: u8, symbol: &str) -> String {
    format!("{}{}", symbol, format_decimal(value, decimal_places))
}

/// Add thousands separators to a numeric string.
fn add_thousands_separator(s: &str) -> String {
    let (integer_part, decimal_part) = match s.split_once('.') {
        Some((int, dec)) => (int, Some(dec)),
        None => (s, None),
    };

    let negative = integer_part.starts_with('-');
    let digits: String = integer_part.chars().filter(|c| c.is_ascii_digit()).collect();

    let mut result = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    let len = digits.len();

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    if negative {
        result.insert(0, '-');
    }

    if let Some(decimal) = decimal_part {
        result.push('.');
        result.push_str(decimal);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_general() {
        assert_eq!(format_general(0.0), "0");
        assert_eq!(format_general(42.0), "42");
        assert_eq!(format_general(-3.5), "-3.5");
        assert_eq!(format_general(22.368), "22.368");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1234.5, 2, "$"), "$1,234.50");
        assert_eq!(format_currency(741999.7953, 2, "$"), "$741,999.80");
        assert_eq!(format_currency(12.0, 2, "$"), "$12.00");
        assert_eq!(format_currency(-5.0, 2, "$"), "$-5.00");
        assert_eq!(format_currency(-1234.5, 2, "$"), "$-1,234.50");
    }

    #[test]
    fn test_thousands_separator() {
        assert_eq!(format_decimal(1234567.891, 1), "1,234,567.9");
        assert_eq!(format_decimal(-1000.0, 0), "-1,000");
        assert_eq!(format_decimal(999.0, 0), "999");
    }
}
