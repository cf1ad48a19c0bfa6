mod batch;
mod errors;
mod record;
#[cfg(test)]
mod tests;

pub use batch::{BatchLabel, Destination};
pub use errors::RecordError;
pub use record::{CleanRecord, RawRecord};

/// Country assigned to records that arrive without one.
pub const UNKNOWN_COUNTRY: &str = "ZZ";
/// Status assigned to records that arrive without one.
pub const UNKNOWN_STATUS: &str = "UNKNOWN";
