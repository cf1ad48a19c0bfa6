use super::{BatchLabel, CleanRecord, Destination, RawRecord, RecordError};

use anyhow::Result;
use chrono::{TimeZone, Utc};

fn create_raw_record(transaction_id: Option<&str>, amount: Option<&str>, timestamp: Option<&str>, country: Option<&str>, status: Option<&str>) -> RawRecord {
    RawRecord {
        transaction_id: transaction_id.map(str::to_string),
        user_id: Some("user_1".to_string()),
        merchant_id: Some("merchant_1".to_string()),
        amount: amount.map(str::to_string),
        timestamp: timestamp.map(str::to_string),
        country: country.map(str::to_string),
        status: status.map(str::to_string)
    }
}

#[test]
fn test_valid_record_is_normalized() -> Result<()> {
    let raw = create_raw_record(Some("tx_1"), Some("125.50"), Some("2024-03-01 10:15:00-05:00"), Some("pe"), Some("approved"));

    let clean = raw.validate()?;

    assert_eq!(clean.transaction_id, "tx_1");
    assert_eq!(clean.amount.value(), 125.5);
    assert_eq!(clean.timestamp, Utc.with_ymd_and_hms(2024, 3, 1, 15, 15, 0).unwrap());
    assert_eq!(clean.country, "PE");
    assert_eq!(clean.status, "approved");

    Ok(())
}

#[test]
fn test_missing_optional_fields_receive_sentinels() -> Result<()> {
    let raw = create_raw_record(Some("tx_1"), Some("10"), Some("2024-03-01"), None, None);

    let clean = raw.validate()?;

    assert_eq!(clean.country, "ZZ");
    assert_eq!(clean.status, "UNKNOWN");

    Ok(())
}

#[test]
fn test_blank_optional_fields_receive_sentinels() -> Result<()> {
    let raw = create_raw_record(Some("tx_1"), Some("10"), Some("2024-03-01"), Some("  "), Some(""));

    let clean = raw.validate()?;

    assert_eq!(clean.country, "ZZ");
    assert_eq!(clean.status, "UNKNOWN");

    Ok(())
}

#[test]
fn test_missing_critical_fields_are_rejected() {
    let missing_amount = create_raw_record(Some("tx_1"), None, Some("2024-03-01"), None, None);
    let missing_id = create_raw_record(None, Some("10"), Some("2024-03-01"), None, None);
    let mut missing_user = create_raw_record(Some("tx_3"), Some("10"), Some("2024-03-01"), None, None);
    missing_user.user_id = None;
    let mut blank_merchant = create_raw_record(Some("tx_4"), Some("10"), Some("2024-03-01"), None, None);
    blank_merchant.merchant_id = Some(" ".to_string());

    assert!(matches!(missing_amount.validate(), Err(RecordError::MissingField { field: "amount", .. })));
    assert!(matches!(missing_id.validate(), Err(RecordError::MissingField { field: "transaction_id", .. })));
    assert!(matches!(missing_user.validate(), Err(RecordError::MissingField { field: "user_id", .. })));
    assert!(matches!(blank_merchant.validate(), Err(RecordError::MissingField { field: "merchant_id", .. })));
}

#[test]
fn test_blank_amount_counts_as_missing() {
    let empty = create_raw_record(Some("tx_1"), Some(""), Some("2024-03-01"), None, None);
    let spaces = create_raw_record(Some("tx_2"), Some("   "), Some("2024-03-01"), None, None);

    assert!(matches!(empty.validate(), Err(RecordError::MissingField { field: "amount", .. })));
    assert!(matches!(spaces.validate(), Err(RecordError::MissingField { field: "amount", .. })));
}

#[test]
fn test_malformed_amount_is_rejected_not_defaulted() {
    let raw = create_raw_record(Some("tx_1"), Some("12.5abc"), Some("2024-03-01"), None, None);

    assert!(matches!(raw.validate(), Err(RecordError::InvalidAmount { .. })));
}

#[test]
fn test_missing_or_malformed_timestamp_is_rejected() {
    let missing = create_raw_record(Some("tx_1"), Some("10"), None, None, None);
    let malformed = create_raw_record(Some("tx_2"), Some("10"), Some("31/31/2024"), None, None);

    assert!(matches!(missing.validate(), Err(RecordError::InvalidTimestamp { .. })));
    assert!(matches!(malformed.validate(), Err(RecordError::InvalidTimestamp { .. })));
}

#[test]
fn test_critical_field_check_runs_before_amount_parsing() {
    let raw = create_raw_record(None, Some("not-a-number"), Some("2024-03-01"), None, None);

    assert!(matches!(raw.validate(), Err(RecordError::MissingField { field: "transaction_id", .. })));
}

#[test]
fn test_clean_record_converts_back_to_an_equivalent_raw_record() -> Result<()> {
    let raw = create_raw_record(Some("tx_1"), Some("99.99"), Some("2024-03-01T08:00:00+02:00"), Some("us"), Some("declined"));
    let clean: CleanRecord = raw.validate()?;

    let round_tripped = RawRecord::from(&clean).validate()?;

    assert_eq!(round_tripped, clean);

    Ok(())
}

#[test]
fn test_batch_label_file_names_are_unique_per_sequence() {
    let created_at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 5, 7).unwrap();
    let first = BatchLabel::new(1, created_at);
    let second = BatchLabel::new(2, created_at);

    assert_eq!(first.file_name(Destination::Raw), "transactions_20240301_090507_0001.csv");
    assert_eq!(first.file_name(Destination::Normal), "processed_20240301_090507_0001.csv");
    assert_eq!(first.file_name(Destination::Suspicious), "suspicious_20240301_090507_0001.csv");
    assert_ne!(first.file_name(Destination::Normal), second.file_name(Destination::Normal));
}
