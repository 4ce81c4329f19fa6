pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "$0".to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();
    // Suffix is chosen after rounding so 999_600 reads "$1.0M", not "$1000K".
    if magnitude >= 1_000_000.0 || (magnitude / 1_000.0).round() >= 1_000.0 {
        format!("{sign}${:.1}M", magnitude / 1_000_000.0)
    } else if magnitude >= 1_000.0 || magnitude.round() >= 1_000.0 {
        format!("{sign}${:.0}K", magnitude / 1_000.0)
    } else {
        format!("{sign}${magnitude:.0}")
    }
}

/// Inverse of [`format_currency`]. Accepts plain numbers, `$` prefixes,
/// thousands separators and a trailing K/M/B multiplier. Anything that does
/// not parse is treated as zero.
pub fn parse_currency_string(raw: &str) -> f64 {
    let sanitized: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
        .collect();
    if sanitized.is_empty() {
        return 0.0;
    }

    let (number, multiplier) = match sanitized.chars().last() {
        Some('k') | Some('K') => (&sanitized[..sanitized.len() - 1], 1_000.0),
        Some('m') | Some('M') => (&sanitized[..sanitized.len() - 1], 1_000_000.0),
        Some('b') | Some('B') => (&sanitized[..sanitized.len() - 1], 1_000_000_000.0),
        _ => (sanitized.as_str(), 1.0),
    };

    match number.parse::<f64>() {
        Ok(v) if v.is_finite() => v * multiplier,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::{format_currency, parse_currency_string};

    #[test]
    fn formats_with_unit_suffixes() {
        assert_eq!(format_currency(2_500_000.0), "$2.5M");
        assert_eq!(format_currency(150_000.0), "$150K");
        assert_eq!(format_currency(500.0), "$500");
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(-42_000.0), "-$42K");
    }

    #[test]
    fn rounding_rolls_over_to_the_next_suffix() {
        assert_eq!(format_currency(999_500.0), "$1.0M");
        assert_eq!(format_currency(999_999.0), "$1.0M");
        assert_eq!(format_currency(-999_600.0), "-$1.0M");
        assert_eq!(format_currency(999_400.0), "$999K");
        assert_eq!(format_currency(999.5), "$1K");
        assert_eq!(format_currency(999.4), "$999");
    }

    #[test]
    fn parses_suffixes_and_separators() {
        assert_eq!(parse_currency_string("$2.5M"), 2_500_000.0);
        assert_eq!(parse_currency_string("$150K"), 150_000.0);
        assert_eq!(parse_currency_string("1,234,567"), 1_234_567.0);
        assert_eq!(parse_currency_string(" $3b "), 3_000_000_000.0);
        assert_eq!(parse_currency_string("-$42K"), -42_000.0);
    }

    #[test]
    fn unparseable_input_is_zero() {
        assert_eq!(parse_currency_string(""), 0.0);
        assert_eq!(parse_currency_string("$"), 0.0);
        assert_eq!(parse_currency_string("lots"), 0.0);
        assert_eq!(parse_currency_string("12..5K"), 0.0);
    }

    #[test]
    fn round_trips_at_suffix_granularity() {
        for value in [500.0, 7_000.0, 150_000.0, 2_500_000.0, 48_300_000.0] {
            let parsed = parse_currency_string(&format_currency(value));
            assert!((parsed - value).abs() < 1e-6, "{value} -> {parsed}");
        }
    }
}
