use std::collections::{HashMap, HashSet};

use tracing::info;

use crate::models::CleanRecord;

/// A fraud-detection rule evaluated over a whole cleaned batch.
///
/// Rules only ever report matches; combining them into a flag is the classifier's job, so no
/// rule can clear a flag raised by another.
pub trait DetectionRule: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns one entry per record in `batch`, `true` where the record matches.
    fn evaluate(&self, batch: &[CleanRecord]) -> Vec<bool>;
}

/// Flags amounts strictly above `mean + sigma * stddev` of the batch.
///
/// The statistics are recomputed for every batch, so the same amount may be an outlier in one
/// batch and not in another.
#[derive(Debug, Clone)]
pub struct AmountOutlierRule {
    sigma: f64
}

impl AmountOutlierRule {
    pub fn new(sigma: f64) -> Self {
        Self { sigma }
    }

    /// Mean plus `sigma` sample standard deviations (N - 1 denominator).
    ///
    /// Batches with fewer than two records have no standard deviation and therefore no threshold.
    pub fn threshold(&self, batch: &[CleanRecord]) -> Option<f64> {
        if batch.len() < 2 {
            return None;
        }

        let count = batch.len() as f64;
        let mean = batch.iter().map(|record| record.amount.value()).sum::<f64>() / count;
        let variance = batch.iter()
            .map(|record| (record.amount.value() - mean).powi(2))
            .sum::<f64>() / (count - 1.0);

        Some(mean + self.sigma * variance.sqrt())
    }
}

impl DetectionRule for AmountOutlierRule {
    fn name(&self) -> &'static str {
        "amount_outlier"
    }

    fn evaluate(&self, batch: &[CleanRecord]) -> Vec<bool> {
        match self.threshold(batch) {
            Some(threshold) => {
                info!("Amount outlier threshold: {threshold:.2}");
                batch.iter().map(|record| record.amount.value() > threshold).collect()
            }
            None => {
                info!("Amount outlier threshold undefined for a batch of {} record(s)", batch.len());
                vec![false; batch.len()]
            }
        }
    }
}

/// Flags every record of a user who has at least `limit` records with the decline status in
/// the batch.
#[derive(Debug, Clone)]
pub struct RepeatedDeclineRule {
    status: String,
    limit: usize
}

impl RepeatedDeclineRule {
    pub fn new(status: impl Into<String>, limit: usize) -> Self {
        Self { status: status.into(), limit }
    }

    /// Users reaching the decline limit in this batch.
    pub fn offending_users<'a>(&self, batch: &'a [CleanRecord]) -> HashSet<&'a str> {
        let mut declines = HashMap::<&str, usize>::new();

        for record in batch.iter().filter(|record| record.status == self.status) {
            *declines.entry(record.user_id.as_str()).or_default() += 1;
        }

        declines.into_iter()
            .filter(|(_, count)| *count >= self.limit)
            .map(|(user_id, _)| user_id)
            .collect()
    }
}

impl DetectionRule for RepeatedDeclineRule {
    fn name(&self) -> &'static str {
        "repeated_decline"
    }

    fn evaluate(&self, batch: &[CleanRecord]) -> Vec<bool> {
        let users = self.offending_users(batch);

        batch.iter().map(|record| users.contains(record.user_id.as_str())).collect()
    }
}

/// Flags records from outside the base country whose amount exceeds a fixed limit.
#[derive(Debug, Clone)]
pub struct HighRiskInternationalRule {
    base_country: String,
    limit: f64
}

impl HighRiskInternationalRule {
    pub fn new(base_country: impl Into<String>, limit: f64) -> Self {
        Self { base_country: base_country.into(), limit }
    }

    pub fn matches(&self, record: &CleanRecord) -> bool {
        record.country != self.base_country && record.amount.value() > self.limit
    }
}

impl DetectionRule for HighRiskInternationalRule {
    fn name(&self) -> &'static str {
        "high_risk_international"
    }

    fn evaluate(&self, batch: &[CleanRecord]) -> Vec<bool> {
        batch.iter().map(|record| self.matches(record)).collect()
    }
}
