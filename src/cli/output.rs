//! Output formatting for CLI commands.
//!
//! Reports themselves come from [`crate::report`]; this module formats the
//! command-level messages around them and writes finished artifacts.

use colored::Colorize;
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::Path;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing::info;

use crate::analysis::{DangerLevel, PlanSummary};
use crate::config::ValidationResult;
use crate::error::Result;
use crate::report::ReportFormat;

/// Output formatter for CLI.
#[derive(Debug, Default, Clone, Copy)]
pub struct OutputFormatter;

/// Format row for table display.
#[derive(Tabled)]
struct FormatRow {
    #[tabled(rename = "Format")]
    name: String,
    #[tabled(rename = "Extension")]
    extension: String,
    #[tabled(rename = "Headers")]
    headers: String,
    #[tabled(rename = "Collapsible")]
    collapsible: String,
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Formats the list of supported report formats.
    #[must_use]
    pub fn format_formats(&self) -> String {
        let rows: Vec<FormatRow> = ReportFormat::ALL
            .iter()
            .map(|format| FormatRow {
                name: format.name().to_string(),
                extension: format!(".{}", format.extension()),
                headers: format!("{:?}", format.header_case()).to_lowercase(),
                collapsible: if format.supports_collapsing() { "yes" } else { "no" }.to_string(),
            })
            .collect();

        let mut table = Table::new(rows);
        table.with(Style::rounded());
        format!("{table}\n")
    }

    /// Formats a configuration validation result.
    #[must_use]
    pub fn format_validation(&self, result: &ValidationResult, show_warnings: bool) -> String {
        let mut output = String::new();

        if result.errors.is_empty() {
            let _ = writeln!(output, "{} Configuration is valid", "✓".green());
        } else {
            let _ = writeln!(output, "{} Configuration is invalid:", "✗".red());
            for error in &result.errors {
                let _ = writeln!(output, "   - {}: {}", error.field.bold(), error.message);
            }
        }

        if show_warnings && !result.warnings.is_empty() {
            let _ = write!(output, "\n{} Warnings:\n", "⚠".yellow());
            for warning in &result.warnings {
                let _ = writeln!(output, "   - {warning}");
            }
        }

        output
    }

    /// Formats the one-line summary printed after a report is written to a file.
    #[must_use]
    pub fn format_written(
        &self,
        summary: &PlanSummary,
        max_danger: DangerLevel,
        format: ReportFormat,
        path: &Path,
    ) -> String {
        let danger = match max_danger {
            DangerLevel::High => max_danger.label().red().bold().to_string(),
            DangerLevel::Medium => max_danger.label().yellow().to_string(),
            DangerLevel::Low | DangerLevel::None => max_danger.label().green().to_string(),
        };

        format!(
            "{} Wrote {format} report to {} ({}; max danger: {danger})\n",
            "✓".green(),
            path.display(),
            summary.statistics()
        )
    }

    /// Formats the message shown when the danger gate trips.
    #[must_use]
    pub fn format_gate_failure(&self, max_danger: DangerLevel, threshold: DangerLevel) -> String {
        format!(
            "{} Plan contains {} risk changes (fail-on threshold: {threshold})\n",
            "✗".red(),
            max_danger.label().red().bold()
        )
    }
}

/// Writes a rendered report to `path`, or to stdout when no path is given.
///
/// # Errors
///
/// Returns an error if the file or stdout cannot be written.
pub fn write_artifact(content: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)?;
            info!("Report written to: {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                handle.write_all(b"\n")?;
            }
            handle.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationError;

    #[test]
    fn test_format_formats_lists_every_format() {
        colored::control::set_override(false);
        let output = OutputFormatter::new().format_formats();
        for name in ReportFormat::names() {
            assert!(output.contains(name), "missing {name}");
        }
        assert!(output.contains(".md"));
        assert!(output.contains("upper"));
    }

    #[test]
    fn test_format_validation() {
        colored::control::set_override(false);
        let result = ValidationResult {
            errors: vec![ValidationError {
                field: "report.format".to_string(),
                message: "unknown".to_string(),
            }],
            warnings: vec!["careful".to_string()],
        };

        let output = OutputFormatter::new().format_validation(&result, false);
        assert!(output.contains("Configuration is invalid"));
        assert!(output.contains("report.format: unknown"));
        assert!(!output.contains("careful"));

        let output = OutputFormatter::new().format_validation(&result, true);
        assert!(output.contains("careful"));
    }

    #[test]
    fn test_write_artifact_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report.md");
        write_artifact("# Report\n", Some(&path)).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Report\n");
    }
}
