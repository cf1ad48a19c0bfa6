use tracing::info;

use crate::classifier::rules::{AmountOutlierRule, DetectionRule, HighRiskInternationalRule, RepeatedDeclineRule};
use crate::config::DetectionConfig;
use crate::models::CleanRecord;

/// Per-rule counts for one classification pass.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RuleReport {
    pub rule: &'static str,
    /// Records satisfying this rule's predicate, whether or not already flagged.
    pub matched: usize,
    /// Records flagged by this rule that no earlier rule had flagged.
    pub newly_flagged: usize
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ClassificationReport {
    pub rules: Vec<RuleReport>,
    pub normal: usize,
    pub suspicious: usize
}

/// The two disjoint outputs of a classification pass. Together they hold every input record.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    pub normal: Vec<CleanRecord>,
    pub suspicious: Vec<CleanRecord>,
    pub report: ClassificationReport
}

/// Runs the detection rules in order and partitions a cleaned batch.
pub struct Classifier {
    rules: Vec<Box<dyn DetectionRule>>
}

impl Classifier {
    /// Builds the standard rule chain: amount outlier, repeated decline, high-risk international.
    pub fn new(config: &DetectionConfig) -> Self {
        Self::with_rules(vec![
            Box::new(AmountOutlierRule::new(config.outlier_sigma)),
            Box::new(RepeatedDeclineRule::new(config.decline_status.clone(), config.decline_limit)),
            Box::new(HighRiskInternationalRule::new(config.base_country.clone(), config.international_limit)),
        ])
    }

    pub fn with_rules(rules: Vec<Box<dyn DetectionRule>>) -> Self {
        Self { rules }
    }

    /// Partitions `batch` into normal and suspicious records, keeping input order in each.
    ///
    /// Every rule sees the full batch; a record is suspicious if any rule matched it.
    pub fn classify(&self, batch: Vec<CleanRecord>) -> Classification {
        let mut flags = vec![false; batch.len()];
        let mut report = ClassificationReport::default();

        for rule in &self.rules {
            let matches = rule.evaluate(&batch);
            let mut rule_report = RuleReport { rule: rule.name(), matched: 0, newly_flagged: 0 };

            for (flag, matched) in flags.iter_mut().zip(matches) {
                if matched {
                    rule_report.matched += 1;

                    if !*flag {
                        *flag = true;
                        rule_report.newly_flagged += 1;
                    }
                }
            }

            info!(
                "Rule [{}]: {} matched, {} newly flagged",
                rule_report.rule, rule_report.matched, rule_report.newly_flagged
            );

            report.rules.push(rule_report);
        }

        let mut classification = Classification::default();

        for (record, flagged) in batch.into_iter().zip(flags) {
            if flagged {
                classification.suspicious.push(record);
            } else {
                classification.normal.push(record);
            }
        }

        report.normal = classification.normal.len();
        report.suspicious = classification.suspicious.len();
        classification.report = report;

        classification
    }
}
