use std::io::Read;

use csv::{ReaderBuilder, Trim, WriterBuilder};
use serde::Serialize;
use tracing::warn;

use crate::engine::PipelineError;
use crate::models::RawRecord;

/// Column order shared by raw and output files.
pub const HEADERS: [&str; 7] = ["transaction_id", "user_id", "merchant_id", "amount", "timestamp", "country", "status"];

/// Serializes records as comma-separated UTF-8 with a header row, even when `records` is empty.
pub fn encode_records<T: Serialize>(records: &[T]) -> Result<Vec<u8>, PipelineError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(HEADERS)?;

    for record in records {
        writer.serialize(record)?;
    }

    writer.into_inner().map_err(|error| PipelineError::Io(error.into_error()))
}

/// Reads raw records, skipping rows that cannot be deserialized.
///
/// Returns the records and the number of rows skipped.
pub fn decode_records<R: Read>(source: R) -> (Vec<RawRecord>, usize) {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(source);

    let mut records = Vec::new();
    let mut skipped = 0;

    for result in reader.deserialize::<RawRecord>() {
        match result {
            Ok(record) => records.push(record),
            Err(error) => {
                warn!("CSV deserialization error: {error}");
                skipped += 1;
            }
        }
    }

    (records, skipped)
}
