//! Configuration types for report generation.
//!
//! These structs map to `planreport.yaml`. Every field has a default, so an
//! empty file (or no file at all) is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::analysis::{DangerLevel, RiskClassifier};
use crate::error::Result;
use crate::report::{
    DEFAULT_COLLAPSE_THRESHOLD, DEFAULT_PROPERTY_PREVIEW, DEFAULT_TITLE, RenderOptions,
    ReportFormat,
};

/// The root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReportConfig {
    /// Report presentation settings.
    pub report: ReportSettings,
    /// Risk classification settings.
    pub risk: RiskSettings,
}

/// Report presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReportSettings {
    /// Report title.
    pub title: String,
    /// Default format when none is requested.
    pub format: String,
    /// Keep high-danger changes expanded.
    pub auto_expand_dangerous: bool,
    /// List sensitive property lines (values stay masked).
    pub show_sensitive_properties: bool,
    /// Include unchanged resources and outputs.
    pub show_unchanged: bool,
    /// Rows shown before a section collapses.
    pub collapse_threshold: usize,
    /// Property lines shown before a row collapses.
    pub property_preview: usize,
    /// Maximum displayed value length; `0` disables truncation.
    pub max_value_length: usize,
    /// Emit ANSI colors in the table format.
    pub color: bool,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            format: ReportFormat::Table.name().to_string(),
            auto_expand_dangerous: true,
            show_sensitive_properties: true,
            show_unchanged: false,
            collapse_threshold: DEFAULT_COLLAPSE_THRESHOLD,
            property_preview: DEFAULT_PROPERTY_PREVIEW,
            max_value_length: crate::analysis::DEFAULT_MAX_VALUE_LENGTH,
            color: true,
        }
    }
}

/// Risk classification settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RiskSettings {
    /// Extra data-bearing resource types, on top of the built-in list.
    pub stateful_types: Vec<String>,
    /// Danger level for in-place updates and stateless deletions.
    pub low_impact_level: LowImpactLevel,
}

/// Allowed danger levels for low-impact changes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LowImpactLevel {
    /// Treat low-impact changes as harmless.
    None,
    /// Flag low-impact changes as low risk.
    #[default]
    Low,
}

impl From<LowImpactLevel> for DangerLevel {
    fn from(level: LowImpactLevel) -> Self {
        match level {
            LowImpactLevel::None => Self::None,
            LowImpactLevel::Low => Self::Low,
        }
    }
}

impl ReportConfig {
    /// Parses the configured default format.
    ///
    /// # Errors
    ///
    /// Returns an error listing the valid formats if the name is unknown.
    pub fn default_format(&self) -> Result<ReportFormat> {
        Ok(self.report.format.parse::<ReportFormat>()?)
    }

    /// Builds the risk classifier described by this configuration.
    #[must_use]
    pub fn classifier(&self) -> RiskClassifier {
        self.risk
            .stateful_types
            .iter()
            .fold(RiskClassifier::new(), |classifier, ty| {
                classifier.with_stateful_type(ty.clone())
            })
            .with_low_impact_level(self.risk.low_impact_level.into())
    }

    /// Builds render options from this configuration.
    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        let report = &self.report;
        RenderOptions::default()
            .with_title(report.title.clone())
            .with_auto_expand_dangerous(report.auto_expand_dangerous)
            .with_show_sensitive_properties(report.show_sensitive_properties)
            .with_show_unchanged(report.show_unchanged)
            .with_collapse_threshold(report.collapse_threshold)
            .with_property_preview(report.property_preview)
            .with_max_value_length(report.max_value_length)
            .with_color(report.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Action, ResourceChange};

    #[test]
    fn test_defaults() {
        let config = ReportConfig::default();
        assert_eq!(config.report.title, DEFAULT_TITLE);
        assert_eq!(config.default_format().unwrap(), ReportFormat::Table);
        assert_eq!(config.report.collapse_threshold, 20);
        assert_eq!(config.report.property_preview, 5);
        assert_eq!(config.report.max_value_length, 80);
        assert!(config.report.auto_expand_dangerous);
        assert_eq!(config.risk.low_impact_level, LowImpactLevel::Low);
    }

    #[test]
    fn test_classifier_includes_extra_stateful_types() {
        let mut config = ReportConfig::default();
        config.risk.stateful_types.push("custom_volume".to_string());
        config.risk.low_impact_level = LowImpactLevel::None;

        let classifier = config.classifier();
        assert!(classifier.is_stateful("custom_volume"));
        assert!(classifier.is_stateful("aws_db_instance"));

        let update = ResourceChange::new("aws_instance.web", Action::Update);
        assert_eq!(classifier.classify(&update).level, DangerLevel::None);
    }

    #[test]
    fn test_render_options_mirror_settings() {
        let mut config = ReportConfig::default();
        config.report.title = "Nightly".to_string();
        config.report.show_unchanged = true;
        config.report.max_value_length = 0;

        let options = config.render_options();
        assert_eq!(options.title, "Nightly");
        assert!(options.show_unchanged);
        assert_eq!(options.max_value_length, 0);
        assert!(options.color);
    }
}
