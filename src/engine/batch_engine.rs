use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::classifier::{Classification, ClassificationReport, Classifier};
use crate::cleaner::{Cleaner, CleaningReport};
use crate::config::PipelineConfig;
use crate::engine::{PipelineError, Stage};
use crate::models::{BatchLabel, Destination};
use crate::source::RecordSource;
use crate::storage::BatchStore;

/// Outcome of one successfully processed batch.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub label: BatchLabel,
    pub raw: usize,
    pub cleaning: CleaningReport,
    pub classification: ClassificationReport,
    pub outputs: Vec<PathBuf>
}

/// Totals for a whole run. `batches` counts every batch started.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct RunSummary {
    pub batches: u64,
    pub succeeded: u64,
    pub skipped: u64,
    pub failed: u64
}

/// Drives Source -> Cleaner -> Classifier -> Store once per interval.
///
/// Batches run strictly one after another. A batch either completes or fails as a whole; the
/// failure is logged and the next interval fires as usual.
pub struct BatchEngine<S: RecordSource, B: BatchStore> {
    config: PipelineConfig,
    source: S,
    store: Arc<B>,
    cleaner: Cleaner,
    classifier: Classifier
}

impl<S: RecordSource, B: BatchStore> BatchEngine<S, B> {
    pub fn new(config: PipelineConfig, source: S, store: Arc<B>) -> Self {
        let classifier = Classifier::new(&config.detection);

        Self {
            config,
            source,
            store,
            cleaner: Cleaner::new(),
            classifier
        }
    }

    pub fn setup(&self) -> Result<(), PipelineError> {
        self.store.prepare()
    }

    /// Runs batches until `shutdown` changes or its sender goes away.
    ///
    /// The first batch starts immediately. The stop signal is only observed between batches, so a
    /// batch that has started always runs to completion or failure.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) -> RunSummary {
        let mut summary = RunSummary::default();

        info!("Starting continuous processing (every {:?})", self.config.interval);

        loop {
            if *shutdown.borrow() {
                break;
            }

            summary.batches += 1;
            let sequence = summary.batches;

            info!("BATCH #{sequence}");

            match self.process_batch(sequence) {
                Ok(report) => {
                    summary.succeeded += 1;
                    info!(
                        "Batch [{}] completed: {} raw, {} cleaned, {} normal, {} suspicious, {} file(s) written",
                        report.label.sequence,
                        report.raw,
                        report.cleaning.output,
                        report.classification.normal,
                        report.classification.suspicious,
                        report.outputs.len()
                    );
                }
                Err(error) if error.is_not_implemented() => {
                    summary.skipped += 1;
                    warn!("Skipping batch [{sequence}]: {error}");
                }
                Err(error) => {
                    summary.failed += 1;
                    error!(stage = ?error.stage(), "Error processing batch [{sequence}]: {error}");
                }
            }

            info!("Waiting {:?} until next batch...", self.config.interval);

            tokio::select! {
                _ = sleep(self.config.interval) => {}
                _ = shutdown.changed() => break
            }
        }

        info!(
            "Pipeline stopped after {} batch(es): {} succeeded, {} skipped, {} failed",
            summary.batches, summary.succeeded, summary.skipped, summary.failed
        );

        summary
    }

    /// Generates, stores, reloads, cleans, classifies and persists one batch.
    pub fn process_batch(&mut self, sequence: u64) -> Result<BatchReport, PipelineError> {
        let label = BatchLabel::new(sequence, Utc::now());

        info!("Generating {} transactions...", self.config.batch_size);
        let generated = self.source.generate(self.config.batch_size)
            .map_err(|error| error.during(Stage::Generate))?;
        let raw_location = self.store.store_raw(&generated, &label)
            .map_err(|error| error.during(Stage::Store))?;
        info!("Saved to: {}", raw_location.display());

        let raw = self.store.load_raw(&raw_location)
            .map_err(|error| error.during(Stage::Load))?;
        info!("Loaded {} transactions", raw.len());

        let (cleaned, cleaning) = self.cleaner.clean_with_report(&raw);
        info!("Cleaned {} transactions", cleaned.len());

        let classification = self.classifier.classify(cleaned);
        info!("Found {} suspicious transactions", classification.suspicious.len());
        info!("Found {} normal transactions", classification.normal.len());

        let outputs = self.persist(&classification, &label)?;

        Ok(BatchReport {
            label,
            raw: raw.len(),
            cleaning,
            classification: classification.report,
            outputs
        })
    }

    /// Writes the non-empty partitions. If a later write fails, earlier files of this batch are
    /// discarded so the batch leaves no partial output behind.
    fn persist(&self, classification: &Classification, label: &BatchLabel) -> Result<Vec<PathBuf>, PipelineError> {
        let partitions = [
            (&classification.normal, Destination::Normal),
            (&classification.suspicious, Destination::Suspicious),
        ];

        let mut written = Vec::new();

        for (records, destination) in partitions {
            if records.is_empty() {
                continue;
            }

            match self.store.write(records, destination, label) {
                Ok(location) => {
                    match destination {
                        Destination::Suspicious => warn!("Saved suspicious transactions to: {}", location.display()),
                        _ => info!("Saved normal transactions to: {}", location.display())
                    }

                    written.push(location);
                }
                Err(error) => {
                    for location in &written {
                        if let Err(discard_error) = self.store.discard(location) {
                            error!("Unable to discard partial output {}: {discard_error}", location.display());
                        }
                    }

                    return Err(error.during(Stage::Persist));
                }
            }
        }

        Ok(written)
    }
}
