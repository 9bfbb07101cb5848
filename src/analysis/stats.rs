//! Summary counts over a plan's resource changes.

use serde::Serialize;

use super::risk::{DangerLevel, RiskClassifier};
use crate::model::{Action, ResourceChange};

/// Summary counts for a set of resource changes.
///
/// `added + removed + modified + replacements + unmodified == total`
/// always holds. `high_risk` is tallied independently of those categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    /// Number of resource changes.
    pub total: usize,
    /// Resources to create.
    pub added: usize,
    /// Resources to delete.
    pub removed: usize,
    /// Resources updated in place.
    pub modified: usize,
    /// Resources to replace.
    pub replacements: usize,
    /// Changes classified as high risk.
    pub high_risk: usize,
    /// Resources left unchanged.
    pub unmodified: usize,
}

impl Statistics {
    /// Returns true if the action categories add up to the total.
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        self.added + self.removed + self.modified + self.replacements + self.unmodified == self.total
    }

    /// Returns true if there are any changes.
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        self.total > self.unmodified
    }

    /// Returns the number of resources that change.
    #[must_use]
    pub const fn changed(&self) -> usize {
        self.total - self.unmodified
    }
}

impl std::fmt::Display for Statistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} to add, {} to change, {} to replace, {} to destroy ({} high risk)",
            self.added, self.modified, self.replacements, self.removed, self.high_risk
        )
    }
}

/// Reduces resource changes into [`Statistics`].
#[derive(Debug, Clone, Copy)]
pub struct StatisticsAggregator<'a> {
    /// Classifier used for the high-risk tally.
    classifier: &'a RiskClassifier,
}

impl<'a> StatisticsAggregator<'a> {
    /// Creates an aggregator using the given classifier.
    #[must_use]
    pub const fn new(classifier: &'a RiskClassifier) -> Self {
        Self { classifier }
    }

    /// Aggregates the given changes.
    #[must_use]
    pub fn aggregate(&self, changes: &[ResourceChange]) -> Statistics {
        let mut stats = Statistics {
            total: changes.len(),
            ..Statistics::default()
        };

        for change in changes {
            match change.effective_action() {
                Action::Create => stats.added += 1,
                Action::Delete => stats.removed += 1,
                Action::Update => stats.modified += 1,
                Action::Replace => stats.replacements += 1,
                Action::NoOp => stats.unmodified += 1,
            }

            if self.classifier.classify(change).level == DangerLevel::High {
                stats.high_risk += 1;
            }
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_plan_is_all_zero() {
        let classifier = RiskClassifier::new();
        let stats = StatisticsAggregator::new(&classifier).aggregate(&[]);
        assert_eq!(stats, Statistics::default());
        assert!(stats.is_consistent());
        assert!(!stats.has_changes());
    }

    #[test]
    fn test_categories_are_exclusive() {
        let classifier = RiskClassifier::new();
        let changes = vec![
            ResourceChange::new("aws_instance.a", Action::Create),
            ResourceChange::new("aws_instance.b", Action::Update),
            ResourceChange::new("aws_instance.c", Action::Update).with_replace_path("ami"),
            ResourceChange::new("aws_instance.d", Action::Replace),
            ResourceChange::new("aws_instance.e", Action::Delete),
            ResourceChange::new("aws_instance.f", Action::NoOp),
        ];

        let stats = StatisticsAggregator::new(&classifier).aggregate(&changes);
        assert_eq!(stats.total, 6);
        assert_eq!(stats.added, 1);
        assert_eq!(stats.modified, 1);
        assert_eq!(stats.replacements, 2);
        assert_eq!(stats.removed, 1);
        assert_eq!(stats.unmodified, 1);
        assert!(stats.is_consistent());
        assert_eq!(stats.changed(), 5);
    }

    #[test]
    fn test_high_risk_counted_independently() {
        let classifier = RiskClassifier::new();
        let changes = vec![
            ResourceChange::new("aws_s3_bucket.data", Action::Delete),
            ResourceChange::new("aws_dynamodb_table.users", Action::Delete),
            ResourceChange::new("aws_instance.web", Action::Delete),
        ];

        let stats = StatisticsAggregator::new(&classifier).aggregate(&changes);
        assert_eq!(stats.removed, 3);
        assert_eq!(stats.high_risk, 2);
    }

    #[test]
    fn test_display_summary_line() {
        let stats = Statistics {
            total: 3,
            added: 1,
            removed: 1,
            replacements: 1,
            high_risk: 1,
            ..Statistics::default()
        };
        assert_eq!(
            stats.to_string(),
            "1 to add, 0 to change, 1 to replace, 1 to destroy (1 high risk)"
        );
    }
}
