//! JSON document with Title-Case keys.

use serde_json::{Map, Value, json};

use super::format::ReportFormat;
use super::options::RenderOptions;
use super::schema::{HeaderCase, RenderSchema, Section};
use super::view::{Cell, ReportMeta, ReportView, Row, SectionBody};
use super::Reporter;

/// Renders reports as pretty-printed JSON.
///
/// Keys are the Title-Case headers of the section schemas. The statistics
/// section is an object; the other sections are arrays of row objects, or
/// the unchanged message string.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonReporter;

impl JsonReporter {
    /// Creates a new JSON reporter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn meta(meta: &ReportMeta) -> Value {
        let case = HeaderCase::Title;
        let mut object = Map::new();
        object.insert(case.apply("title"), Value::String(meta.title.clone()));
        object.insert(case.apply("fingerprint"), Value::String(meta.fingerprint.clone()));
        if let Some(at) = meta.generated_at {
            object.insert(case.apply("generatedAt"), Value::String(at.to_rfc3339()));
        }
        if let Some(version) = &meta.tool_version {
            object.insert(case.apply("version"), Value::String(version.clone()));
        }
        Value::Object(object)
    }

    fn cell(cell: &Cell) -> Value {
        match cell {
            Cell::Text(text) => Value::String(text.clone()),
            Cell::Count(n) => json!(n),
            Cell::Flag(flag) => Value::Bool(*flag),
            Cell::Action(action) => Value::String(action.label().to_string()),
            Cell::Danger(assessment) => json!({
                "Level": assessment.level.label(),
                "Reason": assessment.reason,
            }),
            Cell::Changes(lines) => Value::Array(lines.iter().cloned().map(Value::String).collect()),
        }
    }

    fn row(schema: &RenderSchema, row: &Row) -> Value {
        let object = schema
            .columns
            .iter()
            .zip(&row.cells)
            .map(|(column, cell)| (column.header.clone(), Self::cell(cell)))
            .collect();
        Value::Object(object)
    }
}

impl Reporter for JsonReporter {
    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }

    fn render(&self, view: &ReportView, _options: &RenderOptions) -> String {
        let mut document = Map::new();
        document.insert(HeaderCase::Title.apply("report"), Self::meta(&view.meta));

        for section in &view.sections {
            let value = match &section.body {
                SectionBody::Unchanged(message) => Value::String((*message).to_string()),
                SectionBody::Rows(rows) if section.section() == Section::Statistics => rows
                    .first()
                    .map_or(Value::Null, |row| Self::row(&section.schema, row)),
                SectionBody::Rows(rows) => Value::Array(
                    rows.iter()
                        .map(|row| Self::row(&section.schema, row))
                        .collect(),
                ),
            };
            document.insert(section.schema.title(), value);
        }

        serde_json::to_string_pretty(&Value::Object(document)).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{PlanSummary, RiskClassifier};
    use crate::model::{Action, OutputChange, ResourceChange};

    fn render(summary: &PlanSummary) -> Value {
        let options = RenderOptions::default();
        let view = ReportView::build(summary, ReportFormat::Json, &options);
        serde_json::from_str(&JsonReporter::new().render(&view, &options)).unwrap()
    }

    #[test]
    fn test_document_shape() {
        let classifier = RiskClassifier::new();
        let summary = PlanSummary::new(
            vec![ResourceChange::new("aws_db_instance.main", Action::Delete)],
            vec![OutputChange::new("endpoint", Action::Create).with_after(json!("db.example.com"))],
            &classifier,
        );
        let doc = render(&summary);

        assert_eq!(doc["Report"]["Title"], "Infrastructure Change Report");
        assert_eq!(doc["Report"]["Fingerprint"], summary.fingerprint());
        assert_eq!(doc["Statistics"]["Total Changes"], 1);
        assert_eq!(doc["Statistics"]["High Risk"], 1);

        let resource = &doc["Resources"][0];
        assert_eq!(resource["Action"], "delete");
        assert_eq!(resource["Resource"], "aws_db_instance.main");
        assert_eq!(resource["Replacement"], false);
        assert_eq!(resource["Danger"]["Level"], "high");
        assert_eq!(resource["Property Changes"], json!([]));

        assert_eq!(doc["Outputs"][0]["Planned"], "db.example.com");
        assert_eq!(doc["Outputs"][0]["Current"], "-");
    }

    #[test]
    fn test_key_order_follows_schema() {
        let classifier = RiskClassifier::new();
        let summary = PlanSummary::new(vec![], vec![], &classifier);
        let doc = render(&summary);

        let keys: Vec<&String> = doc.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["Report", "Statistics"]);

        let stats: Vec<&String> = doc["Statistics"].as_object().unwrap().keys().collect();
        assert_eq!(
            stats,
            vec!["Total Changes", "Added", "Removed", "Modified", "Replacements", "High Risk", "Unmodified"]
        );
    }

    #[test]
    fn test_unchanged_section_is_message() {
        let classifier = RiskClassifier::new();
        let summary = PlanSummary::new(
            vec![],
            vec![OutputChange::new("ip", Action::NoOp)],
            &classifier,
        );
        let doc = render(&summary);
        assert_eq!(doc["Outputs"], "All outputs unchanged");
        assert!(doc.get("Resources").is_none());
    }
}
