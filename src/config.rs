use std::path::PathBuf;
use std::time::Duration;

/// Runtime settings for the pipeline, built once at startup and handed to the engine.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Records requested from the source per batch.
    pub batch_size: usize,
    /// Wait between the end of one batch and the start of the next.
    pub interval: Duration,
    /// Data lake folder for raw batches.
    pub raw_folder: PathBuf,
    /// Folder for records classified as normal.
    pub processed_folder: PathBuf,
    /// Folder for records classified as suspicious.
    pub suspicious_folder: PathBuf,
    pub detection: DetectionConfig
}

/// Parameters of the detection rules.
#[derive(Debug, Clone)]
pub struct DetectionConfig {
    /// Standard deviations above the batch mean before an amount is an outlier.
    pub outlier_sigma: f64,
    /// Status value counted by the repeated-decline rule.
    pub decline_status: String,
    /// Declines per user per batch that trigger the repeated-decline rule.
    pub decline_limit: usize,
    /// Home country; anything else is international.
    pub base_country: String,
    /// International amounts strictly above this are high risk.
    pub international_limit: f64
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            batch_size: 100,
            interval: Duration::from_secs(60),
            raw_folder: PathBuf::from("./transactions"),
            processed_folder: PathBuf::from("./processed"),
            suspicious_folder: PathBuf::from("./suspicious"),
            detection: DetectionConfig::default()
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            outlier_sigma: 2.0,
            decline_status: "declined".to_string(),
            decline_limit: 3,
            base_country: "PE".to_string(),
            international_limit: 1000.0
        }
    }
}
