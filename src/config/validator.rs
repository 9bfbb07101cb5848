//! Configuration validation.
//!
//! Collects every problem in one pass; the first error aborts the run,
//! warnings are reported but never fatal.

use crate::error::{ConfigError, PlanReportError, Result};
use tracing::debug;

use super::spec::{ReportConfig, ReportSettings, RiskSettings};
use crate::report::ReportFormat;

/// Smallest `max_value_length` that leaves room for text and the ellipsis.
pub const MIN_VALUE_LENGTH: usize = 8;

/// Validation result containing all errors found.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of warnings (non-fatal issues).
    pub warnings: Vec<String>,
}

/// A single validation error.
#[derive(Debug)]
pub struct ValidationError {
    /// The field path that failed validation.
    pub field: String,
    /// The error message.
    pub message: String,
}

/// Validator for report configurations.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigValidator;

impl ConfigValidator {
    /// Creates a new validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates a report configuration.
    ///
    /// # Errors
    ///
    /// Returns the first validation error if any check fails.
    pub fn validate(&self, config: &ReportConfig) -> Result<ValidationResult> {
        let result = self.check(config);

        if let Some(first_error) = result.errors.first() {
            return Err(PlanReportError::Config(ConfigError::ValidationError {
                message: first_error.message.clone(),
                field: Some(first_error.field.clone()),
            }));
        }

        debug!("Configuration validation passed");
        Ok(result)
    }

    /// Runs every check and returns all findings without failing.
    #[must_use]
    pub fn check(&self, config: &ReportConfig) -> ValidationResult {
        let mut result = ValidationResult::default();
        Self::validate_report(&config.report, &mut result);
        Self::validate_risk(&config.risk, &mut result);
        result
    }

    fn validate_report(report: &ReportSettings, result: &mut ValidationResult) {
        if report.title.trim().is_empty() {
            result.errors.push(ValidationError {
                field: String::from("report.title"),
                message: String::from("Report title cannot be empty"),
            });
        }

        if let Err(e) = report.format.parse::<ReportFormat>() {
            result.errors.push(ValidationError {
                field: String::from("report.format"),
                message: e.to_string(),
            });
        }

        if report.collapse_threshold == 0 {
            result.errors.push(ValidationError {
                field: String::from("report.collapse_threshold"),
                message: String::from("Collapse threshold must be at least 1"),
            });
        }

        if report.property_preview == 0 {
            result.errors.push(ValidationError {
                field: String::from("report.property_preview"),
                message: String::from("Property preview must be at least 1"),
            });
        }

        if report.max_value_length != 0 && report.max_value_length < MIN_VALUE_LENGTH {
            result.errors.push(ValidationError {
                field: String::from("report.max_value_length"),
                message: format!(
                    "Maximum value length must be 0 (unlimited) or at least {MIN_VALUE_LENGTH}, got {}",
                    report.max_value_length
                ),
            });
        }

        if !report.auto_expand_dangerous {
            result.warnings.push(String::from(
                "auto_expand_dangerous is disabled; high-risk changes may start collapsed",
            ));
        }
    }

    fn validate_risk(risk: &RiskSettings, result: &mut ValidationResult) {
        for (i, ty) in risk.stateful_types.iter().enumerate() {
            if !is_valid_type_name(ty) {
                result.errors.push(ValidationError {
                    field: format!("risk.stateful_types[{i}]"),
                    message: format!(
                        "Resource type '{ty}' is invalid. Must be lowercase alphanumeric with underscores."
                    ),
                });
            }
        }
    }
}

/// Checks if a resource type name is valid (lowercase alphanumeric with underscores).
fn is_valid_type_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let result = ConfigValidator::new().validate(&ReportConfig::default()).unwrap();
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_unknown_format() {
        let mut config = ReportConfig::default();
        config.report.format = "xml".to_string();

        let err = ConfigValidator::new().validate(&config).unwrap_err();
        match err {
            PlanReportError::Config(ConfigError::ValidationError { message, field }) => {
                assert_eq!(field.as_deref(), Some("report.format"));
                assert!(message.contains("table, json, html, markdown, csv"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ReportConfig::default();
        config.report.title = "  ".to_string();
        config.report.collapse_threshold = 0;
        config.report.property_preview = 0;
        config.report.max_value_length = 4;
        config.risk.stateful_types = vec!["Bad-Type".to_string(), "good_type".to_string()];

        let result = ConfigValidator::new().check(&config);
        let fields: Vec<&str> = result.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "report.title",
                "report.collapse_threshold",
                "report.property_preview",
                "report.max_value_length",
                "risk.stateful_types[0]",
            ]
        );
    }

    #[test]
    fn test_unlimited_value_length_allowed() {
        let mut config = ReportConfig::default();
        config.report.max_value_length = 0;
        assert!(ConfigValidator::new().validate(&config).is_ok());
    }

    #[test]
    fn test_warning_when_auto_expand_disabled() {
        let mut config = ReportConfig::default();
        config.report.auto_expand_dangerous = false;

        let result = ConfigValidator::new().validate(&config).unwrap();
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_type_name_validation() {
        assert!(is_valid_type_name("aws_db_instance"));
        assert!(is_valid_type_name("google_sql_database_instance2"));
        assert!(!is_valid_type_name(""));
        assert!(!is_valid_type_name("AWS_DB"));
        assert!(!is_valid_type_name("aws-db"));
    }
}
