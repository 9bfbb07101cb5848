//! Comma-separated values.
//!
//! One block per section: a Title-Case header row followed by one row per
//! entry. Blocks are separated by a blank line. Quoting follows RFC 4180.

use super::escape::csv_field;
use super::format::ReportFormat;
use super::options::RenderOptions;
use super::view::{ReportView, SectionBody};
use super::Reporter;

/// Separator between property change lines inside one field.
const CHANGE_SEPARATOR: &str = "; ";

/// Renders reports as CSV blocks.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvReporter;

impl CsvReporter {
    /// Creates a new CSV reporter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn record<I, S>(output: &mut String, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let line = fields
            .into_iter()
            .map(|field| csv_field(field.as_ref()))
            .collect::<Vec<_>>()
            .join(",");
        output.push_str(&line);
        output.push_str("\r\n");
    }
}

impl Reporter for CsvReporter {
    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }

    fn render(&self, view: &ReportView, _options: &RenderOptions) -> String {
        let mut output = String::new();

        for (i, section) in view.sections.iter().enumerate() {
            if i > 0 {
                output.push_str("\r\n");
            }

            Self::record(&mut output, section.schema.headers());
            match &section.body {
                SectionBody::Unchanged(message) => Self::record(&mut output, [*message]),
                SectionBody::Rows(rows) => {
                    for row in rows {
                        Self::record(
                            &mut output,
                            row.cells.iter().map(|cell| cell.plain(CHANGE_SEPARATOR)),
                        );
                    }
                }
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{PlanSummary, RiskClassifier};
    use crate::model::{Action, OutputChange, ResourceChange};
    use serde_json::json;

    fn render(summary: &PlanSummary) -> String {
        let options = RenderOptions::default();
        let view = ReportView::build(summary, ReportFormat::Csv, &options);
        CsvReporter::new().render(&view, &options)
    }

    #[test]
    fn test_blocks_and_headers() {
        let classifier = RiskClassifier::new();
        let summary = PlanSummary::new(
            vec![ResourceChange::new("aws_instance.web", Action::Create)],
            vec![],
            &classifier,
        );
        let output = render(&summary);
        let lines: Vec<&str> = output.split("\r\n").collect();

        assert_eq!(
            lines[0],
            "Total Changes,Added,Removed,Modified,Replacements,High Risk,Unmodified"
        );
        assert_eq!(lines[1], "1,1,0,0,0,0,0");
        assert_eq!(lines[2], "");
        assert_eq!(
            lines[3],
            "Action,Resource,Type,Id,Replacement,Module,Danger,Property Changes"
        );
        assert!(lines[4].starts_with("create,aws_instance.web,aws_instance,"));
    }

    #[test]
    fn test_placeholders_are_literal() {
        let classifier = RiskClassifier::new();
        let summary = PlanSummary::new(
            vec![],
            vec![
                OutputChange::new("password", Action::Update)
                    .with_sensitive(true)
                    .with_before(json!("secret123"))
                    .with_after(json!("secret456")),
                OutputChange::new("arn", Action::Create).with_after_unknown(true),
            ],
            &classifier,
        );
        let output = render(&summary);

        assert!(output.contains("password,update,(sensitive value),(sensitive value),Yes"));
        assert!(output.contains("arn,create,-,(known after apply),No"));
        assert!(!output.contains("secret"));
    }

    #[test]
    fn test_fields_are_quoted() {
        let classifier = RiskClassifier::new();
        let change = ResourceChange::new("aws_instance.web", Action::Update)
            .with_before(json!({"tags": "a,b", "size": 1}))
            .with_after(json!({"tags": "c,d", "size": 2}));
        let summary = PlanSummary::new(vec![change], vec![], &classifier);

        let output = render(&summary);
        assert!(output.contains("\"size: 1 -> 2; tags: a,b -> c,d\""));
        assert!(output.contains("low: in-place update"));
    }
}
