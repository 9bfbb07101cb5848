//! The immutable aggregate root of one report run.

use tracing::debug;

use super::risk::{DangerLevel, RiskClassifier};
use super::stats::{Statistics, StatisticsAggregator};
use crate::model::{OutputChange, PlanHasher, ResourceChange};

/// A plan ready for reporting.
///
/// Statistics and the fingerprint are computed once at construction; the
/// summary exposes read-only views only. The classifier used for the
/// statistics is kept so every later danger lookup agrees with them.
#[derive(Debug, Clone)]
pub struct PlanSummary {
    /// Resource changes in ingestion order.
    resources: Vec<ResourceChange>,
    /// Output changes in ingestion order.
    outputs: Vec<OutputChange>,
    /// Derived statistics.
    statistics: Statistics,
    /// Plan fingerprint (hex SHA-256).
    fingerprint: String,
    /// Classifier the statistics were derived with.
    classifier: RiskClassifier,
}

impl PlanSummary {
    /// Builds a summary, deriving statistics with the given classifier.
    #[must_use]
    pub fn new(
        resources: Vec<ResourceChange>,
        outputs: Vec<OutputChange>,
        classifier: &RiskClassifier,
    ) -> Self {
        let statistics = StatisticsAggregator::new(classifier).aggregate(&resources);
        let fingerprint = PlanHasher::new().fingerprint(&resources, &outputs);

        debug!(
            "Built plan summary: {} resource change(s), {} output change(s)",
            resources.len(),
            outputs.len()
        );

        Self {
            resources,
            outputs,
            statistics,
            fingerprint,
            classifier: classifier.clone(),
        }
    }

    /// Resource changes in ingestion order.
    #[must_use]
    pub fn resources(&self) -> &[ResourceChange] {
        &self.resources
    }

    /// Output changes in ingestion order.
    #[must_use]
    pub fn outputs(&self) -> &[OutputChange] {
        &self.outputs
    }

    /// Classifier used for every danger level of this plan.
    #[must_use]
    pub const fn classifier(&self) -> &RiskClassifier {
        &self.classifier
    }

    /// Derived statistics.
    #[must_use]
    pub const fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Full plan fingerprint.
    #[must_use]
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// First eight characters of the fingerprint.
    #[must_use]
    pub fn short_fingerprint(&self) -> String {
        PlanHasher::new().short_hash(&self.fingerprint)
    }

    /// Returns true if the plan contains no changes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty() && self.outputs.is_empty()
    }

    /// Highest danger level among the resource changes.
    #[must_use]
    pub fn max_danger(&self) -> DangerLevel {
        self.resources
            .iter()
            .map(|r| self.classifier.classify(r).level)
            .max()
            .unwrap_or_default()
    }
}
