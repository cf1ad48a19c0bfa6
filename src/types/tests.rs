use super::{format_timestamp, parse_timestamp, Amount};
use anyhow::Result;
use chrono::{TimeZone, Utc};
use std::str::FromStr;

#[test]
fn test_amount_successfully_parses_valid_strings() -> Result<()> {
    let test_cases = vec![
        ("10", 10.0),
        ("10.50", 10.5),
        ("  42.25  ", 42.25),
        ("-3.5", -3.5),
        ("+7", 7.0),
        ("1e3", 1000.0),
        ("-0.0", 0.0),
    ];

    for (input_string, expected_value) in test_cases {
        assert_eq!(Amount::from_str(input_string)?.value(), expected_value);
    }

    Ok(())
}

#[test]
fn test_amount_fails_to_parse_invalid_strings() {
    assert!(Amount::from_str("").is_err());
    assert!(Amount::from_str("   ").is_err());
    assert!(Amount::from_str("abc").is_err());
    assert!(Amount::from_str("12,50").is_err());
    assert!(Amount::from_str("1.2.3").is_err());
    assert!(Amount::from_str("NaN").is_err());
    assert!(Amount::from_str("inf").is_err());
    assert!(Amount::from_str("-infinity").is_err());
}

#[test]
fn test_amount_display_round_trips_through_parsing() -> Result<()> {
    let amount = Amount::from_str("1234.5678")?;

    assert_eq!(Amount::from_str(&amount.to_string())?, amount);

    Ok(())
}

#[test]
fn test_timestamp_normalizes_offsets_to_utc() -> Result<()> {
    let expected = Utc.with_ymd_and_hms(2024, 3, 1, 15, 15, 0).unwrap();

    assert_eq!(parse_timestamp("2024-03-01T10:15:00-05:00")?, expected);
    assert_eq!(parse_timestamp("2024-03-01 10:15:00-05:00")?, expected);
    assert_eq!(parse_timestamp("2024-03-01 10:15:00-0500")?, expected);
    assert_eq!(parse_timestamp("2024-03-01T15:15:00Z")?, expected);

    Ok(())
}

#[test]
fn test_timestamp_treats_naive_values_as_utc() -> Result<()> {
    assert_eq!(parse_timestamp("2024-03-01 15:15:00")?, Utc.with_ymd_and_hms(2024, 3, 1, 15, 15, 0).unwrap());
    assert_eq!(parse_timestamp("2024-03-01T15:15:00")?, Utc.with_ymd_and_hms(2024, 3, 1, 15, 15, 0).unwrap());
    assert_eq!(parse_timestamp("2024-03-01")?, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());

    Ok(())
}

#[test]
fn test_timestamp_fails_to_parse_invalid_strings() {
    assert!(parse_timestamp("").is_err());
    assert!(parse_timestamp("not-a-date").is_err());
    assert!(parse_timestamp("2024-13-01 00:00:00").is_err());
    assert!(parse_timestamp("2024-02-30").is_err());
    assert!(parse_timestamp("yesterday at noon").is_err());
}

#[test]
fn test_timestamp_formatting_is_reparseable() -> Result<()> {
    let timestamp = parse_timestamp("2024-03-01 10:15:00.250-05:00")?;
    let formatted = format_timestamp(&timestamp);

    assert_eq!(formatted, "2024-03-01T15:15:00.250Z");
    assert_eq!(parse_timestamp(&formatted)?, timestamp);

    Ok(())
}
