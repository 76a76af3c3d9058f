//! Locale-style number formatting shared by the panels.

/// Group thousands with commas and keep at most `max_fraction_digits`
/// decimals, dropping trailing zeros: `(65432.1, 3)` → "65,432.1".
pub fn format_number(value: f64, max_fraction_digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.*}", max_fraction_digits, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    // No "-0" when the value rounds away
    let sign = if value < 0.0 && (grouped != "0" || !frac.is_empty()) {
        "-"
    } else {
        ""
    };
    if frac.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping() {
        assert_eq!(format_number(65432.1, 3), "65,432.1");
        assert_eq!(format_number(1234567.891, 3), "1,234,567.891");
        assert_eq!(format_number(999.0, 2), "999");
        assert_eq!(format_number(1000.0, 2), "1,000");
    }

    #[test]
    fn test_fraction_limit() {
        assert_eq!(format_number(93.123456, 4), "93.1235");
        assert_eq!(format_number(0.000123, 3), "0");
        assert_eq!(format_number(2.6, 0), "3");
    }

    #[test]
    fn test_negative() {
        assert_eq!(format_number(-1500.5, 3), "-1,500.5");
        assert_eq!(format_number(-0.0001, 2), "0");
    }
}
