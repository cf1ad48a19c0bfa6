use std::num::ParseFloatError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AmountError {
    #[error("Amount error: {0}")]
    InvalidFormat(String),
    #[error("Amount error: {0}")]
    ParseFloat(#[from] ParseFloatError),
    #[error("Amount error: Value [{0}] is not finite")]
    NotFinite(String)
}

#[derive(Debug, Error)]
pub enum TimestampError {
    #[error("Timestamp error: {0}")]
    InvalidFormat(String),
    #[error("Timestamp error: Value [{0}] does not match any supported layout")]
    UnsupportedLayout(String)
}
