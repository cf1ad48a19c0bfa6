use crate::models::RawRecord;
use crate::types::{AmountError, TimestampError};
use thiserror::Error;

/// Why a raw record was rejected by the cleaner.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Record [{transaction_id}] is missing critical field [{field}]")]
    MissingField {
        transaction_id: String,
        field: &'static str
    },
    #[error("Record [{transaction_id}] has an invalid amount: {source}")]
    InvalidAmount {
        transaction_id: String,
        #[source]
        source: AmountError
    },
    #[error("Record [{transaction_id}] has an invalid timestamp: {source}")]
    InvalidTimestamp {
        transaction_id: String,
        #[source]
        source: TimestampError
    }
}

impl RecordError {
    pub fn missing_field(record: &RawRecord, field: &'static str) -> Self {
        Self::MissingField { transaction_id: describe(record), field }
    }

    pub fn invalid_amount(record: &RawRecord, source: AmountError) -> Self {
        Self::InvalidAmount { transaction_id: describe(record), source }
    }

    pub fn invalid_timestamp(record: &RawRecord, source: TimestampError) -> Self {
        Self::InvalidTimestamp { transaction_id: describe(record), source }
    }
}

fn describe(record: &RawRecord) -> String {
    record.transaction_id.clone().unwrap_or_else(|| "<missing>".to_string())
}
