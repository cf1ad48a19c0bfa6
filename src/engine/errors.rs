use std::fmt;
use std::fmt::{Display, Formatter};
use std::io;

use tempfile::PersistError;
use thiserror::Error;

/// A step of the batch pipeline.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Stage {
    Generate,
    Store,
    Load,
    Persist
}

impl Display for Stage {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Generate => "generate",
            Stage::Store => "store",
            Stage::Load => "load",
            Stage::Persist => "persist"
        };

        write!(formatter, "{name}")
    }
}

/// Failure of a whole batch. Never fatal to the run loop.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Stage [{stage}] is not implemented")]
    NotImplemented {
        stage: Stage
    },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Unable to persist batch file: {0}")]
    Persist(#[from] PersistError),
    #[error("Stage [{stage}] failed: {source}")]
    Failed {
        stage: Stage,
        source: Box<PipelineError>
    }
}

impl PipelineError {
    pub fn not_implemented(stage: Stage) -> Self {
        Self::NotImplemented { stage }
    }

    /// Tags an error with the stage it came from. Errors that already name a stage are kept.
    pub fn during(self, stage: Stage) -> Self {
        match self {
            Self::NotImplemented { .. } | Self::Failed { .. } => self,
            error => Self::Failed { stage, source: Box::new(error) }
        }
    }

    /// The stage this error was raised in, if known.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::NotImplemented { stage } | Self::Failed { stage, .. } => Some(*stage),
            _ => None
        }
    }

    /// Distinguishes a stage with no logic from a stage that failed.
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, Self::NotImplemented { .. })
    }
}
