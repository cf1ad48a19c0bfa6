use crate::types::Timestamp;

/// Where a batch file lives in the data lake.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Destination {
    Raw,
    Normal,
    Suspicious
}

impl Destination {
    pub fn prefix(self) -> &'static str {
        match self {
            Destination::Raw => "transactions",
            Destination::Normal => "processed",
            Destination::Suspicious => "suspicious"
        }
    }
}

/// Identifies one batch: its position in the run and its ingestion time.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct BatchLabel {
    pub sequence: u64,
    pub created_at: Timestamp
}

impl BatchLabel {
    pub fn new(sequence: u64, created_at: Timestamp) -> Self {
        Self { sequence, created_at }
    }

    /// File name for this batch at the given destination.
    ///
    /// The sequence number keeps names unique when two batches land within the same second.
    pub fn file_name(&self, destination: Destination) -> String {
        format!(
            "{}_{}_{:04}.csv",
            destination.prefix(),
            self.created_at.format("%Y%m%d_%H%M%S"),
            self.sequence
        )
    }
}
