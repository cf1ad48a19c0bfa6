mod codec;
mod csv_store;
#[cfg(test)]
mod memory_store;

use std::path::{Path, PathBuf};

use crate::engine::PipelineError;
use crate::models::{BatchLabel, CleanRecord, Destination, RawRecord};

pub use csv_store::CsvStore;
#[cfg(test)]
pub use memory_store::MemoryStore;

/// Persistence for raw batches and classified outputs.
///
/// Every file name is derived from the batch label, so no batch overwrites another.
pub trait BatchStore: Send + Sync + 'static {
    /// Makes sure every destination can be written to.
    fn prepare(&self) -> Result<(), PipelineError>;
    fn store_raw(&self, batch: &[RawRecord], label: &BatchLabel) -> Result<PathBuf, PipelineError>;
    fn load_raw(&self, location: &Path) -> Result<Vec<RawRecord>, PipelineError>;
    fn write(&self, batch: &[CleanRecord], destination: Destination, label: &BatchLabel) -> Result<PathBuf, PipelineError>;
    /// Removes a file written earlier in a batch that later failed.
    fn discard(&self, location: &Path) -> Result<(), PipelineError>;
}
