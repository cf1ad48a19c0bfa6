use std::collections::HashSet;

use tracing::{debug, info};

use crate::models::{CleanRecord, RawRecord, RecordError};

/// Exact, per-rule drop counts for one cleaning pass.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct CleaningReport {
    pub input: usize,
    pub duplicates: usize,
    pub missing_critical: usize,
    pub invalid_amount: usize,
    pub invalid_timestamp: usize,
    /// Records that only became identical to an earlier one after normalization.
    pub normalized_duplicates: usize,
    pub output: usize
}

impl CleaningReport {
    pub fn dropped(&self) -> usize {
        self.input - self.output
    }
}

/// Validates and normalizes raw batches.
///
/// Cleaning never fails: malformed records are dropped and counted, and the counts are logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cleaner;

impl Cleaner {
    pub fn new() -> Self {
        Self
    }

    /// Cleans a raw batch, preserving the order of surviving records.
    #[cfg(test)]
    pub fn clean(&self, batch: &[RawRecord]) -> Vec<CleanRecord> {
        self.clean_with_report(batch).0
    }

    /// Cleans a raw batch and returns the drop counts alongside the survivors.
    ///
    /// Exact duplicates are collapsed first (first occurrence wins), then every remaining record
    /// goes through `RawRecord::validate`. A final pass collapses records that normalization made
    /// identical, so the output never holds two equal clean records.
    pub fn clean_with_report(&self, batch: &[RawRecord]) -> (Vec<CleanRecord>, CleaningReport) {
        let mut report = CleaningReport { input: batch.len(), ..CleaningReport::default() };

        let mut seen_raw = HashSet::with_capacity(batch.len());
        let unique: Vec<&RawRecord> = batch.iter().filter(|record| seen_raw.insert(*record)).collect();
        report.duplicates = batch.len() - unique.len();

        let mut validated = Vec::with_capacity(unique.len());

        for record in unique {
            match record.validate() {
                Ok(clean) => validated.push(clean),
                Err(error) => {
                    debug!("Dropping record: {error}");

                    match error {
                        RecordError::MissingField { .. } => report.missing_critical += 1,
                        RecordError::InvalidAmount { .. } => report.invalid_amount += 1,
                        RecordError::InvalidTimestamp { .. } => report.invalid_timestamp += 1
                    }
                }
            }
        }

        let mut seen_clean = HashSet::with_capacity(validated.len());
        let mut cleaned = Vec::with_capacity(validated.len());

        for record in validated {
            if seen_clean.contains(&record) {
                report.normalized_duplicates += 1;
            } else {
                seen_clean.insert(record.clone());
                cleaned.push(record);
            }
        }

        report.output = cleaned.len();

        debug!(
            "Cleaning breakdown: duplicates [{}], missing critical [{}], invalid amount [{}], invalid timestamp [{}], normalized duplicates [{}]",
            report.duplicates,
            report.missing_critical,
            report.invalid_amount,
            report.invalid_timestamp,
            report.normalized_duplicates
        );
        info!("Cleaning finished. Rows dropped: {}", report.dropped());

        (cleaned, report)
    }
}
