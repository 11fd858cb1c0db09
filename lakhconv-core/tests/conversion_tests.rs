//! Integration tests for the parse → convert → format pipeline.

use lakhconv_core::{
    ConversionResult, ConversionService, Direction, ExchangeRate, FormattedAmount,
    FormattingOptions, convert, format_inr, format_usd, parse_amount,
};

const RATE: f64 = 0.012;

#[test]
fn test_documented_parse_values() {
    assert_eq!(parse_amount("1Cr"), 1e7);
    assert_eq!(parse_amount("50L"), 5e6);
    assert_eq!(parse_amount("2.3B"), 2.3e9);
    assert_eq!(parse_amount("10K"), 1e4);
    assert_eq!(parse_amount("300000"), 3e5);
    assert_eq!(parse_amount(""), 0.0);
    assert_eq!(parse_amount("abc"), 0.0);
}

#[test]
fn test_inr_to_usd_matches_manual_pipeline() {
    let inputs = ["1Cr", "50L", "2.5 lakh", "12345", "0.75cr", "99999"];
    for raw in inputs {
        for rounded in [true, false] {
            let expected = format_usd(parse_amount(raw) * RATE, rounded);
            let result = convert(raw, Direction::InrToUsd, rounded, Some(RATE));
            assert_eq!(result.formatted(), Some(&expected), "input {raw}, rounded {rounded}");
        }
    }
}

#[test]
fn test_usd_to_inr_matches_manual_pipeline() {
    let inputs = ["1M", "2.3B", "10K", "500", "7 thousand"];
    for raw in inputs {
        for rounded in [true, false] {
            let expected = format_inr(parse_amount(raw) / RATE, rounded);
            let result = convert(raw, Direction::UsdToInr, rounded, Some(RATE));
            assert_eq!(result.formatted(), Some(&expected), "input {raw}, rounded {rounded}");
        }
    }
}

#[test]
fn test_missing_rate_always_invalid() {
    for raw in ["1Cr", "", "abc", "10K"] {
        for dir in Direction::all() {
            for rounded in [true, false] {
                let result = convert(raw, *dir, rounded, None);
                assert_eq!(result.to_string(), "Invalid input");
            }
        }
    }
}

#[test]
fn test_zero_input_invalid() {
    for dir in Direction::all() {
        assert_eq!(convert("0", *dir, true, Some(RATE)), ConversionResult::Invalid);
    }
}

#[test]
fn test_small_unrounded_result_keeps_number_variant() {
    // 500 INR at 0.012 is 6 USD: below every USD bucket.
    let result = convert("500", Direction::InrToUsd, false, Some(RATE));
    match result.formatted() {
        Some(FormattedAmount::Number(n)) => assert!((n - 6.0).abs() < 1e-9),
        other => panic!("expected bare number, got {other:?}"),
    }
}

#[test]
fn test_session_flow() {
    let rate = ExchangeRate::new(RATE).unwrap().with_source("test");
    let mut service =
        ConversionService::new(Direction::InrToUsd, FormattingOptions::rounded()).with_rate(rate);

    assert_eq!(service.convert("1.5Cr").to_string(), "180.00K");
    service.swap();
    assert_eq!(service.convert("180K").to_string(), "1.50 Cr");
}
