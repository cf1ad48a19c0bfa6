mod generator;

use crate::engine::{PipelineError, Stage};
use crate::models::RawRecord;

pub use generator::TransactionGenerator;

/// Produces raw batches on request.
///
/// A source that has not wired up generation yet reports the stage as not implemented; the
/// engine skips such batches with a warning instead of treating them as failures.
pub trait RecordSource: Send {
    fn generate(&mut self, _count: usize) -> Result<Vec<RawRecord>, PipelineError> {
        Err(PipelineError::not_implemented(Stage::Generate))
    }
}
