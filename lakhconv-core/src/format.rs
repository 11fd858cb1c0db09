//! Magnitude formatting in INR (lakh/crore) and USD (K/M/B) notation.

use crate::models::FormattedAmount;
use crate::parser::{BILLION, CRORE, LAKH, MILLION, THOUSAND};

/// A magnitude bucket: values at or above `threshold` are divided by it and
/// tagged with `suffix`.
#[derive(Debug, Clone, Copy)]
struct Bucket {
    threshold: f64,
    suffix: &'static str,
}

/// INR buckets, largest first.
const INR_BUCKETS: &[Bucket] = &[
    Bucket { threshold: CRORE, suffix: " Cr" },
    Bucket { threshold: LAKH, suffix: " L" },
];

/// USD buckets, largest first.
const USD_BUCKETS: &[Bucket] = &[
    Bucket { threshold: BILLION, suffix: "B" },
    Bucket { threshold: MILLION, suffix: "M" },
    Bucket { threshold: THOUSAND, suffix: "K" },
];

/// Formats a rupee amount using crore and lakh.
///
/// ```
/// use lakhconv_core::format_inr;
///
/// assert_eq!(format_inr(1e7, true).to_string(), "1.00 Cr");
/// assert_eq!(format_inr(5e5, true).to_string(), "5.00 L");
/// assert_eq!(format_inr(999.0, true).to_string(), "999.00");
/// ```
pub fn format_inr(value: f64, rounded: bool) -> FormattedAmount {
    format_with(INR_BUCKETS, value, rounded)
}

/// Formats a dollar amount using K, M and B.
///
/// ```
/// use lakhconv_core::format_usd;
///
/// assert_eq!(format_usd(2.3e9, true).to_string(), "2.30B");
/// assert_eq!(format_usd(500.0, true).to_string(), "500.00");
/// ```
pub fn format_usd(value: f64, rounded: bool) -> FormattedAmount {
    format_with(USD_BUCKETS, value, rounded)
}

/// Picks the first bucket whose threshold `value` reaches and formats it.
///
/// Negative and non-finite values are clamped to zero first.
fn format_with(buckets: &[Bucket], value: f64, rounded: bool) -> FormattedAmount {
    let value = if value.is_finite() && value > 0.0 { value } else { 0.0 };

    let bucket = buckets.iter().find(|b| value >= b.threshold);

    match (bucket, rounded) {
        (Some(b), true) => {
            FormattedAmount::Text(format!("{}{}", to_fixed_2(value / b.threshold), b.suffix))
        }
        (Some(b), false) => {
            FormattedAmount::Text(format!("{}{}", value / b.threshold, b.suffix))
        }
        (None, true) => FormattedAmount::Text(to_fixed_2(value)),
        (None, false) => FormattedAmount::Number(value),
    }
}

/// Formats `value` with exactly two decimals.
///
/// Exact binary ties (x.xx5 with no trailing error, i.e. odd multiples of
/// 1/8) round up instead of to even. The whole part and the cents are
/// handled apart, since scaling a large value by 100 drops the half cent.
fn to_fixed_2(value: f64) -> String {
    let eighths = value * 8.0;
    if eighths.fract() == 0.0 && eighths.rem_euclid(2.0) == 1.0 {
        let mut whole = value.trunc();
        let mut cents = (value.fract() * 100.0).ceil();
        if cents >= 100.0 {
            whole += 1.0;
            cents -= 100.0;
        }
        return format!("{whole:.0}.{cents:02.0}");
    }
    format!("{value:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: FormattedAmount) -> String {
        value.to_string()
    }

    #[test]
    fn test_inr_rounded_buckets() {
        assert_eq!(text(format_inr(1e7, true)), "1.00 Cr");
        assert_eq!(text(format_inr(2.5e7, true)), "2.50 Cr");
        assert_eq!(text(format_inr(5e5, true)), "5.00 L");
        assert_eq!(text(format_inr(999.0, true)), "999.00");
    }

    #[test]
    fn test_usd_rounded_buckets() {
        assert_eq!(text(format_usd(2.3e9, true)), "2.30B");
        assert_eq!(text(format_usd(1.5e6, true)), "1.50M");
        assert_eq!(text(format_usd(10e3, true)), "10.00K");
        assert_eq!(text(format_usd(500.0, true)), "500.00");
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        assert_eq!(text(format_inr(CRORE, true)), "1.00 Cr");
        assert_eq!(text(format_inr(LAKH, true)), "1.00 L");
        assert_eq!(text(format_usd(BILLION, true)), "1.00B");
        assert_eq!(text(format_usd(MILLION, true)), "1.00M");
        assert_eq!(text(format_usd(THOUSAND, true)), "1.00K");
    }

    #[test]
    fn test_just_below_thresholds() {
        assert_eq!(text(format_inr(9_999_999.0, true)), "100.00 L");
        assert_eq!(text(format_inr(99_999.0, true)), "99999.00");
        assert_eq!(text(format_usd(999.0, true)), "999.00");
    }

    #[test]
    fn test_unrounded_with_suffix_is_text() {
        assert_eq!(format_inr(1.5e7, false), FormattedAmount::Text("1.5 Cr".to_string()));
        assert_eq!(format_inr(2e5, false), FormattedAmount::Text("2 L".to_string()));
        assert_eq!(format_usd(1234.0, false), FormattedAmount::Text("1.234K".to_string()));
    }

    #[test]
    fn test_unrounded_without_suffix_is_number() {
        assert_eq!(format_inr(999.0, false), FormattedAmount::Number(999.0));
        assert_eq!(format_usd(12.345, false), FormattedAmount::Number(12.345));
        assert_eq!(format_usd(0.5, false).to_string(), "0.5");
    }

    #[test]
    fn test_exact_ties_round_up() {
        assert_eq!(to_fixed_2(0.125), "0.13");
        assert_eq!(to_fixed_2(0.625), "0.63");
        assert_eq!(to_fixed_2(2.375), "2.38");
        // 1.005 is slightly below the tie in binary.
        assert_eq!(to_fixed_2(1.005), "1.00");
        assert_eq!(to_fixed_2(12.0), "12.00");
    }

    #[test]
    fn test_large_ties_keep_exact_cents() {
        // 2^49 + 1/8: the last magnitude where an exact .125 exists.
        let q = 562_949_953_421_312.125;
        assert_eq!(to_fixed_2(q), "562949953421312.13");
        assert_eq!(to_fixed_2(70_368_744_177_664.375), "70368744177664.38");
        assert_eq!(text(format_usd(q * 1e9, true)), "562949953421312.13B");
        assert_eq!(text(format_inr(q * 1e7, true)), "562949953421312.13 Cr");
    }

    #[test]
    fn test_out_of_contract_values_clamp_to_zero() {
        assert_eq!(text(format_inr(-5e7, true)), "0.00");
        assert_eq!(text(format_usd(f64::NAN, true)), "0.00");
        assert_eq!(format_usd(f64::INFINITY, false), FormattedAmount::Number(0.0));
    }

    #[test]
    fn test_formatting_is_idempotent() {
        assert_eq!(format_usd(123_456.789, true), format_usd(123_456.789, true));
        assert_eq!(format_inr(42.0, false), format_inr(42.0, false));
    }
}
