//! Flexible amount parsing.
//!
//! Turns free-form user input such as `"1.5Cr"`, `"50 lakh"`, `"2.3B"` or
//! `"300000"` into a plain amount in base units (rupees or dollars).
//!
//! Suffixes are checked against the end of the normalized input in a fixed
//! priority order, and only the first matching rule is applied:
//!
//! | suffix                      | multiplier |
//! |-----------------------------|------------|
//! | `CR`                        | 1e7        |
//! | `L`, `LAKH`                 | 1e5        |
//! | `B`, `BIL`, `BILLION`       | 1e9        |
//! | `M`, `MIL`, `MILLION`       | 1e6        |
//! | `K`, `THOUSAND`             | 1e3        |
//!
//! `BIL` and `MIL` end in `L`, so they are caught by the lakh rule before the
//! billion and million rules are consulted.

use std::sync::LazyLock;

use regex::Regex;

/// One crore.
pub const CRORE: f64 = 1e7;
/// One lakh.
pub const LAKH: f64 = 1e5;
/// One billion.
pub const BILLION: f64 = 1e9;
/// One million.
pub const MILLION: f64 = 1e6;
/// One thousand.
pub const THOUSAND: f64 = 1e3;

static BILLION_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("B(IL(LION)?)?").expect("valid billion pattern"));
static MILLION_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("M(IL(LION)?)?").expect("valid million pattern"));
static THOUSAND_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("K|THOUSAND").expect("valid thousand pattern"));

/// Parses a user-entered amount into base units.
///
/// Never fails: anything without a leading number yields `0.0`. The result
/// is always finite and non-negative; negative and overflowing inputs are
/// clamped to `0.0`.
///
/// # Examples
///
/// ```
/// use lakhconv_core::parse_amount;
///
/// assert_eq!(parse_amount("1Cr"), 1e7);
/// assert_eq!(parse_amount("50 L"), 5e6);
/// assert_eq!(parse_amount("abc"), 0.0);
/// ```
pub fn parse_amount(raw: &str) -> f64 {
    let normalized = normalize(raw);
    let (number, multiplier) = strip_suffix(&normalized);

    let amount = parse_leading_float(&number).map_or(0.0, |n| n * multiplier);

    if amount.is_finite() && amount > 0.0 {
        amount
    } else {
        0.0
    }
}

/// Drops all whitespace and uppercases.
fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|&c| !is_input_space(c))
        .collect::<String>()
        .to_uppercase()
}

/// ECMAScript whitespace and line terminators. Unlike
/// [`char::is_whitespace`], this includes U+FEFF and excludes U+0085.
fn is_input_space(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Applies the first matching suffix rule, returning the remaining text and
/// its multiplier.
///
/// Only the first occurrence of a token is removed, wherever it sits in the
/// string.
fn strip_suffix(input: &str) -> (String, f64) {
    if input.ends_with("CR") {
        (input.replacen("CR", "", 1), CRORE)
    } else if input.ends_with('L') || input.ends_with("LAKH") {
        let stripped = input.replacen('L', "", 1).replacen("LAKH", "", 1);
        (stripped, LAKH)
    } else if input.ends_with('B') || input.ends_with("BIL") || input.ends_with("BILLION") {
        (BILLION_SUFFIX.replace(input, "").into_owned(), BILLION)
    } else if input.ends_with('M') || input.ends_with("MIL") || input.ends_with("MILLION") {
        (MILLION_SUFFIX.replace(input, "").into_owned(), MILLION)
    } else if input.ends_with('K') || input.ends_with("THOUSAND") {
        (THOUSAND_SUFFIX.replace(input, "").into_owned(), THOUSAND)
    } else {
        (input.to_string(), 1.0)
    }
}

/// Parses the longest numeric prefix of `input`.
///
/// Accepts an optional sign, digits with at most one decimal point (at least
/// one digit overall), and an optional exponent. Anything after the prefix
/// is ignored. Returns `None` when no digits lead the string.
fn parse_leading_float(input: &str) -> Option<f64> {
    let bytes = input.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when followed by at least one digit.
    if end < bytes.len() && matches!(bytes[end], b'E' | b'e') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    input[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse_amount("300000"), 3e5);
        assert_eq!(parse_amount("42.5"), 42.5);
        assert_eq!(parse_amount("  7  "), 7.0);
    }

    #[test]
    fn test_input_whitespace_set() {
        assert_eq!(parse_amount("\u{FEFF}5\u{A0}L"), 5e5);
        assert_eq!(parse_amount("1\u{3000}Cr"), 1e7);
        // NEL is not input whitespace, so nothing numeric leads.
        assert_eq!(parse_amount("\u{85}5"), 0.0);
    }

    #[test]
    fn test_crore_suffix() {
        assert_eq!(parse_amount("1Cr"), 1e7);
        assert_eq!(parse_amount("1.5cr"), 1.5e7);
        assert_eq!(parse_amount("2 CR"), 2e7);
    }

    #[test]
    fn test_lakh_suffix() {
        assert_eq!(parse_amount("50L"), 5e6);
        assert_eq!(parse_amount("50 lakh"), 5e6);
        assert_eq!(parse_amount("2.5Lakh"), 2.5e5);
    }

    #[test]
    fn test_billion_suffix() {
        assert_eq!(parse_amount("2.3B"), 2.3e9);
        assert_eq!(parse_amount("4 billion"), 4e9);
    }

    #[test]
    fn test_million_suffix() {
        assert_eq!(parse_amount("2M"), 2e6);
        assert_eq!(parse_amount("1.5 million"), 1.5e6);
    }

    #[test]
    fn test_thousand_suffix() {
        assert_eq!(parse_amount("10K"), 1e4);
        assert_eq!(parse_amount("5 thousand"), 5e3);
    }

    #[test]
    fn test_bil_and_mil_hit_lakh_rule() {
        // Both end in "L", which is checked before the billion/million rules.
        assert_eq!(parse_amount("2BIL"), 2e5);
        assert_eq!(parse_amount("3mil"), 3e5);
    }

    #[test]
    fn test_unparseable_input_is_zero() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("   "), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount("CR"), 0.0);
        assert_eq!(parse_amount("K"), 0.0);
        assert_eq!(parse_amount("."), 0.0);
    }

    #[test]
    fn test_trailing_garbage_ignored() {
        assert_eq!(parse_amount("12abc"), 12.0);
        assert_eq!(parse_amount("1.2.3"), 1.2);
    }

    #[test]
    fn test_interior_whitespace_removed() {
        assert_eq!(parse_amount("1 000"), 1000.0);
        assert_eq!(parse_amount("1\t5 L"), 15e5);
    }

    #[test]
    fn test_negative_and_overflow_clamped() {
        assert_eq!(parse_amount("-5"), 0.0);
        assert_eq!(parse_amount("-2Cr"), 0.0);
        assert_eq!(parse_amount("1E400"), 0.0);
    }

    #[test]
    fn test_leading_float_forms() {
        assert_eq!(parse_leading_float(".5"), Some(0.5));
        assert_eq!(parse_leading_float("5."), Some(5.0));
        assert_eq!(parse_leading_float("+5"), Some(5.0));
        assert_eq!(parse_leading_float("1E3"), Some(1000.0));
        assert_eq!(parse_leading_float("1E"), Some(1.0));
        assert_eq!(parse_leading_float("1E+"), Some(1.0));
        assert_eq!(parse_leading_float("-"), None);
        assert_eq!(parse_leading_float(""), None);
    }

    #[test]
    fn test_only_first_token_removed() {
        // "CR" appears twice: only the first occurrence is stripped.
        assert_eq!(strip_suffix("1CRCR"), ("1CR".to_string(), CRORE));
        // The lakh rule drops the first "L" and then any "LAKH".
        assert_eq!(strip_suffix("5LAKH"), ("5AKH".to_string(), LAKH));
        assert_eq!(parse_amount("5LAKH"), 5e5);
    }
}
