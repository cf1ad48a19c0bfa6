mod amount;
mod errors;
#[cfg(test)]
mod tests;
mod timestamp;

pub use amount::Amount;
pub use errors::{AmountError, TimestampError};
pub use timestamp::{format_timestamp, parse_timestamp, Timestamp};
