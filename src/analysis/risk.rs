//! Danger classification of resource changes.
//!
//! Rules are evaluated in order and the first match wins:
//!
//! 1. Deleting a stateful (data-bearing) resource is `High`.
//! 2. Any replacement is `Medium`; the reason lists the forcing attributes
//!    and notes sensitive attributes when the replacement also changes them.
//! 3. An update of a resource carrying sensitive attributes is `Medium`.
//! 4. A create is `None`.
//! 5. Everything else: no-ops are `None`, remaining updates and deletes get
//!    the configured low-impact level.
//!
//! Classification is a pure function of the action, the replacement paths,
//! the sensitive attribute set and the classifier's configuration. Attribute
//! values never influence it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::model::{Action, ResourceChange};

/// Resource types holding data that is lost when the resource is deleted.
pub const DEFAULT_STATEFUL_TYPES: &[&str] = &[
    "aws_db_instance",
    "aws_rds_cluster",
    "aws_rds_cluster_instance",
    "aws_dynamodb_table",
    "aws_s3_bucket",
    "aws_ebs_volume",
    "aws_efs_file_system",
    "aws_elasticache_cluster",
    "aws_elasticache_replication_group",
    "aws_elasticsearch_domain",
    "aws_opensearch_domain",
    "aws_kinesis_stream",
    "aws_kms_key",
    "aws_redshift_cluster",
    "aws_secretsmanager_secret",
    "aws_sqs_queue",
    "azurerm_cosmosdb_account",
    "azurerm_key_vault",
    "azurerm_managed_disk",
    "azurerm_mssql_database",
    "azurerm_mysql_flexible_server",
    "azurerm_postgresql_flexible_server",
    "azurerm_storage_account",
    "google_bigquery_dataset",
    "google_bigtable_instance",
    "google_compute_disk",
    "google_kms_crypto_key",
    "google_spanner_database",
    "google_sql_database_instance",
    "google_storage_bucket",
    "kubernetes_persistent_volume",
    "kubernetes_persistent_volume_claim",
];

/// Severity of a proposed change.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DangerLevel {
    /// No risk.
    #[default]
    None,
    /// Low-impact change.
    Low,
    /// Disruptive or sensitive change.
    Medium,
    /// Irreversible change.
    High,
}

impl DangerLevel {
    /// Lowercase label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for DangerLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for DangerLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!(
                "unknown danger level '{other}' (expected one of: none, low, medium, high)"
            )),
        }
    }
}

/// Result of classifying a single change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
    /// Danger level.
    pub level: DangerLevel,
    /// Human-readable reason.
    pub reason: String,
}

impl RiskAssessment {
    fn new(level: DangerLevel, reason: impl Into<String>) -> Self {
        Self {
            level,
            reason: reason.into(),
        }
    }
}

/// Classifier assigning a [`DangerLevel`] to each resource change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskClassifier {
    /// Resource types considered stateful.
    stateful_types: BTreeSet<String>,
    /// Level for updates and deletes no other rule matches.
    low_impact_level: DangerLevel,
}

impl Default for RiskClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskClassifier {
    /// Creates a classifier with the default stateful resource types.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stateful_types: DEFAULT_STATEFUL_TYPES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            low_impact_level: DangerLevel::Low,
        }
    }

    /// Marks an additional resource type as stateful.
    #[must_use]
    pub fn with_stateful_type(mut self, resource_type: impl Into<String>) -> Self {
        self.stateful_types.insert(resource_type.into());
        self
    }

    /// Sets the level used by the default rule.
    #[must_use]
    pub const fn with_low_impact_level(mut self, level: DangerLevel) -> Self {
        self.low_impact_level = level;
        self
    }

    /// Returns true if the resource type is stateful.
    #[must_use]
    pub fn is_stateful(&self, resource_type: &str) -> bool {
        self.stateful_types.contains(resource_type)
    }

    /// Classifies a single resource change.
    #[must_use]
    pub fn classify(&self, change: &ResourceChange) -> RiskAssessment {
        match change.effective_action() {
            Action::Delete if self.is_stateful(&change.resource_type) => RiskAssessment::new(
                DangerLevel::High,
                "irreversible deletion of stateful resource",
            ),
            Action::Replace => {
                let mut reason = if change.replace_paths.is_empty() {
                    String::from("resource must be replaced")
                } else {
                    let paths: Vec<&str> = change.replace_paths.iter().map(|p| p.as_str()).collect();
                    format!("replacement forced by: {}", paths.join(", "))
                };
                if Self::touches_sensitive(change) {
                    reason.push_str("; also modifies sensitive attribute(s)");
                }
                RiskAssessment::new(DangerLevel::Medium, reason)
            }
            Action::Update if Self::touches_sensitive(change) => {
                RiskAssessment::new(DangerLevel::Medium, "modifies sensitive attribute(s)")
            }
            Action::Create => RiskAssessment::new(DangerLevel::None, "creates new resource"),
            Action::NoOp => RiskAssessment::new(DangerLevel::None, "no changes"),
            Action::Update => RiskAssessment::new(self.low_impact_level, "in-place update"),
            Action::Delete => RiskAssessment::new(self.low_impact_level, "deletes stateless resource"),
        }
    }

    /// Returns true if the change carries any sensitive attribute.
    fn touches_sensitive(change: &ResourceChange) -> bool {
        !change.sensitive_attributes.is_empty()
    }
}
