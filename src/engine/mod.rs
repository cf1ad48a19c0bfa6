mod batch_engine;
mod errors;

pub use batch_engine::BatchEngine;
pub use errors::{PipelineError, Stage};
