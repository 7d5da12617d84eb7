use iso_currency::Currency;
use num_format::{CustomFormat, Grouping, ToFormattedString as _};

use crate::entities::NumberFormat;

/// Symbol for an ISO 4217 code; unknown codes are shown as-is.
pub(crate) fn currency_symbol(code: &str) -> String {
    Currency::from_code(code)
        .map(|c| c.symbol().to_string())
        .unwrap_or_else(|| code.to_string())
}

/// Format amount with currency symbol, configured number of decimal places and
/// thousands separator (ex. `-$1,234.50`).
///
/// The decimal mark is always '.', whatever the separator.
pub(crate) fn format_amount(amount: f64, currency: &str, number_format: &NumberFormat) -> String {
    let decimal_places = number_format
        .decimal_places
        .min(NumberFormat::MAX_DECIMAL_PLACES) as usize;
    let rounded = format!("{:.decimal_places$}", amount.abs());
    let (integer_part, fractional_part) = match rounded.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rounded.as_str(), None),
    };
    let integer_part = group_thousands(integer_part, &number_format.thousands_separator);
    let sign = if amount < 0.0 && rounded.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    match fractional_part {
        Some(f) => format!("{sign}{}{integer_part}.{f}", currency_symbol(currency)),
        None => format!("{sign}{}{integer_part}", currency_symbol(currency)),
    }
}

fn group_thousands(digits: &str, separator: &str) -> String {
    let Ok(value) = digits.parse::<u64>() else {
        return digits.to_string();
    };
    match CustomFormat::builder()
        .grouping(Grouping::Standard)
        .separator(separator)
        .build()
    {
        Ok(format) => value.to_formatted_string(&format),
        Err(_) => digits.to_string(),
    }
}

/// Percentage with one decimal, as shown next to progress bars.
pub(crate) fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number_format(decimal_places: u32, separator: &str) -> NumberFormat {
        NumberFormat {
            decimal_places,
            thousands_separator: separator.to_string(),
        }
    }

    #[test]
    fn default_format() {
        let nf = NumberFormat::default();
        assert_eq!(format_amount(1234.5, "USD", &nf), "$1,234.50");
        assert_eq!(format_amount(0.0, "USD", &nf), "$0.00");
        assert_eq!(format_amount(-200.0, "USD", &nf), "-$200.00");
        assert_eq!(format_amount(1_000_000.0, "USD", &nf), "$1,000,000.00");
    }

    #[test]
    fn rounding_carries_into_integer_part() {
        let nf = NumberFormat::default();
        assert_eq!(format_amount(999.999, "USD", &nf), "$1,000.00");
        assert_eq!(format_amount(-0.001, "USD", &nf), "$0.00");
    }

    #[test]
    fn custom_separator_and_decimals() {
        assert_eq!(format_amount(1234567.891, "EUR", &number_format(0, " ")), "€1 234 568");
        assert_eq!(format_amount(1234.5, "USD", &number_format(3, "")), "$1234.500");
    }

    #[test]
    fn decimal_places_are_capped() {
        let formatted = format_amount(12.5, "USD", &number_format(100_000, ","));
        assert_eq!(formatted, "$12.5000000000");
    }

    #[test]
    fn unknown_currency_code_is_used_verbatim() {
        assert_eq!(currency_symbol("XYZ1"), "XYZ1");
        assert_eq!(format_amount(5.0, "XYZ1", &NumberFormat::default()), "XYZ15.00");
    }

    #[test]
    fn percentages() {
        assert_eq!(format_percentage(33.333), "33.3%");
        assert_eq!(format_percentage(100.0), "100.0%");
    }
}
