use std::fs::{create_dir_all, remove_file, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::engine::PipelineError;
use crate::models::{BatchLabel, CleanRecord, Destination, RawRecord};
use crate::storage::codec::{decode_records, encode_records};
use crate::storage::BatchStore;

/// Flat-file data lake: one CSV file per batch and destination.
pub struct CsvStore {
    raw_folder: PathBuf,
    processed_folder: PathBuf,
    suspicious_folder: PathBuf
}

impl CsvStore {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            raw_folder: config.raw_folder.clone(),
            processed_folder: config.processed_folder.clone(),
            suspicious_folder: config.suspicious_folder.clone()
        }
    }

    fn folder(&self, destination: Destination) -> &Path {
        match destination {
            Destination::Raw => &self.raw_folder,
            Destination::Normal => &self.processed_folder,
            Destination::Suspicious => &self.suspicious_folder
        }
    }

    /// Writes through a temp file in the target folder, then moves it into place without
    /// replacing an existing file.
    fn persist<T: Serialize>(&self, records: &[T], destination: Destination, label: &BatchLabel) -> Result<PathBuf, PipelineError> {
        let folder = self.folder(destination);
        let path = folder.join(label.file_name(destination));
        let bytes = encode_records(records)?;

        let mut file = NamedTempFile::new_in(folder)?;
        file.write_all(&bytes)?;
        file.flush()?;
        file.persist_noclobber(&path)?;

        Ok(path)
    }
}

impl BatchStore for CsvStore {
    fn prepare(&self) -> Result<(), PipelineError> {
        for destination in [Destination::Raw, Destination::Normal, Destination::Suspicious] {
            let folder = self.folder(destination);
            create_dir_all(folder)?;
            info!("Folder ready for [{}]: {}", destination.prefix(), folder.display());
        }

        Ok(())
    }

    fn store_raw(&self, batch: &[RawRecord], label: &BatchLabel) -> Result<PathBuf, PipelineError> {
        self.persist(batch, Destination::Raw, label)
    }

    fn load_raw(&self, location: &Path) -> Result<Vec<RawRecord>, PipelineError> {
        let file = File::open(location)?;
        let (records, skipped) = decode_records(BufReader::new(file));

        if skipped > 0 {
            warn!("Skipped {skipped} unreadable row(s) in {}", location.display());
        }

        Ok(records)
    }

    fn write(&self, batch: &[CleanRecord], destination: Destination, label: &BatchLabel) -> Result<PathBuf, PipelineError> {
        self.persist(batch, destination, label)
    }

    fn discard(&self, location: &Path) -> Result<(), PipelineError> {
        remove_file(location)?;
        Ok(())
    }
}
