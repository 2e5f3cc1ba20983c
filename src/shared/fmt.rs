//! Display formatting for USD amounts.

use rust_decimal::Decimal;

/// Format a USD amount for display: two decimal places, comma-grouped.
///
/// ```
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
/// assert_eq!(swapbook_sdk::shared::fmt::usd(&Decimal::from_str("1234.5").unwrap()), "1,234.50");
/// ```
pub fn usd(value: &Decimal) -> String {
    let rounded = value.round_dp(2);
    let raw = format!("{:.2}", rounded);
    group_thousands(&raw)
}

fn group_thousands(raw: &str) -> String {
    let (sign, rest) = match raw.strip_prefix('-') {
        Some(r) => ("-", r),
        None => ("", raw),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}
