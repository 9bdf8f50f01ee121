//! USD display helpers.
//!
//! Formatting only; amounts stay unrounded `Decimal` everywhere else.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Format as `$1,234.56` (rounded half-even to cents, `-$` for negatives).
pub fn format_usd(amount: Decimal) -> String {
    let mut cents = amount.round_dp(2);
    cents.rescale(2);

    let negative = cents.is_sign_negative() && !cents.is_zero();
    let digits = cents.abs().to_string();
    let (whole, frac) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let sign = if negative { "-" } else { "" };
    format!("{sign}${}.{frac}", group_thousands(whole))
}

/// Like [`format_usd`], but whole-dollar amounts drop the cents (`$100`).
pub fn format_usd_whole(amount: Decimal) -> String {
    if amount.fract().is_zero() {
        let whole = amount.abs().trunc().normalize().to_string();
        let sign = if amount.is_sign_negative() && !amount.is_zero() { "-" } else { "" };
        format!("{sign}${}", group_thousands(&whole))
    } else {
        format_usd(amount)
    }
}

/// Format with a magnitude suffix, e.g. `$2.75T`, `$410.00B`.
pub fn format_usd_compact(amount: Decimal) -> String {
    const SCALES: [(Decimal, &str); 3] = [
        (dec!(1000000000000), "T"),
        (dec!(1000000000), "B"),
        (dec!(1000000), "M"),
    ];

    let magnitude = amount.abs();
    for (scale, suffix) in SCALES {
        if magnitude >= scale {
            let mut scaled = (amount / scale).round_dp(2);
            scaled.rescale(2);
            return format!("${scaled}{suffix}");
        }
    }
    format_usd(amount)
}

fn group_thousands(whole: &str) -> String {
    let len = whole.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_usd_whole() {
        assert_eq!(format_usd_whole(dec!(100)), "$100");
        assert_eq!(format_usd_whole(dec!(100.00)), "$100");
        assert_eq!(format_usd_whole(dec!(1000000)), "$1,000,000");
        assert_eq!(format_usd_whole(dec!(99.5)), "$99.50");
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(dec!(1000)), "$1,000.00");
        assert_eq!(format_usd(dec!(100)), "$100.00");
        assert_eq!(format_usd(dec!(18.5175)), "$18.52");
        assert_eq!(format_usd(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(format_usd(dec!(0.5)), "$0.50");
        assert_eq!(format_usd(dec!(-1.2)), "-$1.20");
    }

    #[test]
    fn test_format_usd_compact() {
        assert_eq!(format_usd_compact(dec!(2750000000000)), "$2.75T");
        assert_eq!(format_usd_compact(dec!(410000000000)), "$410.00B");
        assert_eq!(format_usd_compact(dec!(175.5)), "$175.50");
    }
}
