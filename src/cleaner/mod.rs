mod cleaner;

pub use cleaner::{Cleaner, CleaningReport};
