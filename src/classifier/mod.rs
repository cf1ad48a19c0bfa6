mod classifier;
mod rules;

pub use classifier::{Classification, ClassificationReport, Classifier};
