use std::io;
use std::path::{Path, PathBuf};

use dashmap::DashMap;

use crate::engine::PipelineError;
use crate::models::{BatchLabel, CleanRecord, Destination, RawRecord};
use crate::storage::codec::{decode_records, encode_records};
use crate::storage::BatchStore;

/// In-memory store with the same file naming and CSV encoding as `CsvStore`.
pub struct MemoryStore {
    files: DashMap<PathBuf, Vec<u8>>
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            files: DashMap::new()
        }
    }

    /// Locations currently held for a destination, sorted by name.
    pub fn locations(&self, destination: Destination) -> Vec<PathBuf> {
        let mut locations: Vec<PathBuf> = self.files.iter()
            .map(|entry| entry.key().clone())
            .filter(|location| location.starts_with(destination.prefix()))
            .collect();

        locations.sort();
        locations
    }

    /// Decodes a stored file back into raw records.
    pub fn read(&self, location: &Path) -> Option<Vec<RawRecord>> {
        self.files.get(location).map(|bytes| decode_records(bytes.as_slice()).0)
    }

    fn insert(&self, destination: Destination, label: &BatchLabel, bytes: Vec<u8>) -> PathBuf {
        let location = PathBuf::from(destination.prefix()).join(label.file_name(destination));
        self.files.insert(location.clone(), bytes);
        location
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchStore for MemoryStore {
    fn prepare(&self) -> Result<(), PipelineError> {
        Ok(())
    }

    fn store_raw(&self, batch: &[RawRecord], label: &BatchLabel) -> Result<PathBuf, PipelineError> {
        Ok(self.insert(Destination::Raw, label, encode_records(batch)?))
    }

    fn load_raw(&self, location: &Path) -> Result<Vec<RawRecord>, PipelineError> {
        self.read(location).ok_or_else(|| not_found(location))
    }

    fn write(&self, batch: &[CleanRecord], destination: Destination, label: &BatchLabel) -> Result<PathBuf, PipelineError> {
        Ok(self.insert(destination, label, encode_records(batch)?))
    }

    fn discard(&self, location: &Path) -> Result<(), PipelineError> {
        self.files.remove(location)
            .map(|_| ())
            .ok_or_else(|| not_found(location))
    }
}

fn not_found(location: &Path) -> PipelineError {
    PipelineError::Io(io::Error::new(io::ErrorKind::NotFound, format!("{} not found", location.display())))
}
