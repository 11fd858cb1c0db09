//! Serde serialization/deserialization tests for core types.
//!
//! These pin the JSON shapes written to disk and printed by the CLI.

use chrono::NaiveDate;
use serde_json::json;

use crate::{ConversionResult, Direction, ExchangeRate, FormattedAmount, HistoryEntry};

// ============================================================================
// Direction
// ============================================================================

#[test]
fn test_direction_serializes_screaming_snake() {
    assert_eq!(serde_json::to_string(&Direction::InrToUsd).unwrap(), r#""INR_TO_USD""#);
    assert_eq!(serde_json::to_string(&Direction::UsdToInr).unwrap(), r#""USD_TO_INR""#);
}

#[test]
fn test_direction_invalid_deserialize() {
    let result: Result<Direction, _> = serde_json::from_str(r#""EUR_TO_USD""#);
    assert!(result.is_err());
}

// ============================================================================
// FormattedAmount
// ============================================================================

#[test]
fn test_formatted_amount_is_untagged() {
    let number = serde_json::to_value(FormattedAmount::Number(999.0)).unwrap();
    assert_eq!(number, json!(999.0));

    let text = serde_json::to_value(FormattedAmount::Text("1.00 Cr".into())).unwrap();
    assert_eq!(text, json!("1.00 Cr"));
}

#[test]
fn test_formatted_amount_deserializes_either_shape() {
    let number: FormattedAmount = serde_json::from_str("12.5").unwrap();
    assert_eq!(number, FormattedAmount::Number(12.5));

    let text: FormattedAmount = serde_json::from_str(r#""2.30B""#).unwrap();
    assert_eq!(text, FormattedAmount::Text("2.30B".into()));
}

// ============================================================================
// ConversionResult
// ============================================================================

#[test]
fn test_conversion_result_tagged_by_status() {
    let converted = ConversionResult::Converted {
        amount: 1e7,
        converted: 120_000.0,
        formatted: FormattedAmount::Text("120.00K".into()),
    };
    let value = serde_json::to_value(&converted).unwrap();
    assert_eq!(value["status"], "converted");
    assert_eq!(value["formatted"], "120.00K");

    let invalid = serde_json::to_value(ConversionResult::Invalid).unwrap();
    assert_eq!(invalid, json!({"status": "invalid"}));
}

// ============================================================================
// HistoryEntry
// ============================================================================

#[test]
fn test_history_entry_shape() {
    let entry = HistoryEntry {
        id: 1_710_000_000_000,
        input: "50L".into(),
        result: "60.00K".into(),
        date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
        direction: Direction::InrToUsd,
    };

    let value = serde_json::to_value(&entry).unwrap();
    assert_eq!(value["date"], "2024-03-09");
    assert_eq!(value["direction"], "INR_TO_USD");

    let back: HistoryEntry = serde_json::from_value(value).unwrap();
    assert_eq!(back, entry);
}

// ============================================================================
// ExchangeRate
// ============================================================================

#[test]
fn test_exchange_rate_optional_fields_omitted() {
    let rate = ExchangeRate::new(0.012).unwrap();
    let value = serde_json::to_value(&rate).unwrap();
    assert_eq!(value["usd_per_inr"], 0.012);
    assert!(value.get("as_of").is_none());
    assert!(value.get("source").is_none());
}

#[test]
fn test_exchange_rate_deserialized_invalid_is_detected() {
    let rate: ExchangeRate = serde_json::from_value(json!({
        "usd_per_inr": -1.0,
        "fetched_at": "2024-01-01T00:00:00Z"
    }))
    .unwrap();
    assert!(!rate.is_valid());
}
