use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::errors::RecordError;
use crate::models::{UNKNOWN_COUNTRY, UNKNOWN_STATUS};
use crate::types::{format_timestamp, parse_timestamp, Amount, Timestamp, TimestampError};

/// A transaction exactly as it arrives in a raw batch file.
///
/// Every field is optional and kept as text: amounts and timestamps may be malformed, and
/// anything may be missing. Empty CSV cells deserialize to `None`.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    pub transaction_id: Option<String>,
    pub user_id: Option<String>,
    pub merchant_id: Option<String>,
    pub amount: Option<String>,
    pub timestamp: Option<String>,
    pub country: Option<String>,
    pub status: Option<String>
}

/// A transaction that passed validation and normalization.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct CleanRecord {
    pub transaction_id: String,
    pub user_id: String,
    pub merchant_id: String,
    pub amount: Amount,
    pub timestamp: Timestamp,
    /// Upper-cased; `ZZ` when the raw record had none.
    pub country: String,
    /// `UNKNOWN` when the raw record had none.
    pub status: String
}

impl RawRecord {
    /// Validates and normalizes a single record.
    ///
    /// Checks run in a fixed order and the first failure decides the rejection reason:
    /// critical fields present, defaults filled, amount parsed, timestamp parsed, country
    /// upper-cased.
    ///
    /// # Errors
    /// Returns `RecordError` if:
    /// - `amount`, `transaction_id`, `user_id` or `merchant_id` is missing or blank.
    /// - `amount` is not a finite number.
    /// - `timestamp` is missing or not a recognizable point in time (reported as an invalid
    ///   timestamp, since it has no critical-field check of its own).
    pub fn validate(&self) -> Result<CleanRecord, RecordError> {
        let Some(amount) = present(&self.amount) else {
            return Err(RecordError::missing_field(self, "amount"))
        };
        let transaction_id = present(&self.transaction_id).ok_or_else(|| RecordError::missing_field(self, "transaction_id"))?;
        let user_id = present(&self.user_id).ok_or_else(|| RecordError::missing_field(self, "user_id"))?;
        let merchant_id = present(&self.merchant_id).ok_or_else(|| RecordError::missing_field(self, "merchant_id"))?;

        let country = present(&self.country).unwrap_or(UNKNOWN_COUNTRY);
        let status = present(&self.status).unwrap_or(UNKNOWN_STATUS);

        let amount = Amount::from_str(amount).map_err(|error| RecordError::invalid_amount(self, error))?;

        let timestamp = match present(&self.timestamp) {
            Some(value) => parse_timestamp(value).map_err(|error| RecordError::invalid_timestamp(self, error))?,
            None => {
                let error = TimestampError::InvalidFormat("Value is missing".to_string());
                return Err(RecordError::invalid_timestamp(self, error))
            }
        };

        Ok(CleanRecord {
            transaction_id: transaction_id.to_string(),
            user_id: user_id.to_string(),
            merchant_id: merchant_id.to_string(),
            amount,
            timestamp,
            country: country.to_uppercase(),
            status: status.to_string()
        })
    }
}

impl From<&CleanRecord> for RawRecord {
    fn from(record: &CleanRecord) -> Self {
        Self {
            transaction_id: Some(record.transaction_id.clone()),
            user_id: Some(record.user_id.clone()),
            merchant_id: Some(record.merchant_id.clone()),
            amount: Some(record.amount.to_string()),
            timestamp: Some(format_timestamp(&record.timestamp)),
            country: Some(record.country.clone()),
            status: Some(record.status.clone())
        }
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.trim().is_empty())
}
