//! Format-neutral view of a report.
//!
//! A [`ReportView`] holds every section already sorted, filtered and turned
//! into typed cells keyed by the section schema. Renderers only decide how
//! cells look; they never inspect the plan again.

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::debug;

use super::format::ReportFormat;
use super::options::RenderOptions;
use super::schema::{FieldKey, OutputField, RenderSchema, ResourceField, SchemaBuilder, Section, StatisticsField};
use crate::analysis::{
    ChangeSorter, DangerLevel, PlanSummary, PropertyChange, RiskAssessment, RiskClassifier,
    Statistics, ValueFormatter, property_changes,
};
use crate::model::{Action, AttributePath, OutputChange, ResourceChange};

/// Module column value for resources in the root module.
pub const ROOT_MODULE: &str = "root";

/// A typed cell value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Display-ready text.
    Text(String),
    /// Non-negative count.
    Count(usize),
    /// Yes/no flag.
    Flag(bool),
    /// Change action.
    Action(Action),
    /// Danger assessment.
    Danger(RiskAssessment),
    /// Property change lines.
    Changes(Vec<String>),
}

impl Cell {
    /// Plain-text rendering, joining change lines with `separator`.
    #[must_use]
    pub fn plain(&self, separator: &str) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Count(n) => n.to_string(),
            Self::Flag(true) => "Yes".to_string(),
            Self::Flag(false) => "No".to_string(),
            Self::Action(action) => action.label().to_string(),
            Self::Danger(assessment) => danger_text(assessment),
            Self::Changes(lines) => lines.join(separator),
        }
    }
}

/// `none`, or `<level>: <reason>` for anything above none.
#[must_use]
pub fn danger_text(assessment: &RiskAssessment) -> String {
    if assessment.level == DangerLevel::None {
        assessment.level.label().to_string()
    } else {
        format!("{}: {}", assessment.level, assessment.reason)
    }
}

/// One row of a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Cells in schema column order.
    pub cells: Vec<Cell>,
    /// Danger level of the underlying change.
    pub danger: DangerLevel,
}

impl Row {
    /// Number of property change lines in the row.
    #[must_use]
    pub fn detail_len(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| match cell {
                Cell::Changes(lines) => lines.len(),
                _ => 0,
            })
            .sum()
    }
}

/// Content of a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionBody {
    /// Rows to render.
    Rows(Vec<Row>),
    /// Every entry is unchanged; render this message instead of a table.
    Unchanged(&'static str),
}

/// A section ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    /// Column schema.
    pub schema: RenderSchema,
    /// Rows or the unchanged message.
    pub body: SectionBody,
}

impl SectionView {
    /// Section kind.
    #[must_use]
    pub const fn section(&self) -> Section {
        self.schema.section
    }

    /// Rows, empty for an unchanged section.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        match &self.body {
            SectionBody::Rows(rows) => rows,
            SectionBody::Unchanged(_) => &[],
        }
    }
}

/// Report header data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportMeta {
    /// Report title.
    pub title: String,
    /// Full plan fingerprint.
    pub fingerprint: String,
    /// Generation timestamp, if any.
    pub generated_at: Option<DateTime<Utc>>,
    /// Producing tool version, if any.
    pub tool_version: Option<String>,
}

/// A complete, format-neutral report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportView {
    /// Target format.
    pub format: ReportFormat,
    /// Header data.
    pub meta: ReportMeta,
    /// Statistics of the plan.
    pub statistics: Statistics,
    /// Sections in rendering order; empty sections are omitted.
    pub sections: Vec<SectionView>,
}

impl ReportView {
    /// Builds the view of `summary` for `format`.
    ///
    /// Rows are classified with the summary's own classifier, so the danger
    /// column always agrees with the high-risk count.
    #[must_use]
    pub fn build(summary: &PlanSummary, format: ReportFormat, options: &RenderOptions) -> Self {
        let builder = ViewBuilder {
            classifier: summary.classifier(),
            formatter: ValueFormatter::new(options.max_value_length),
            sorter: ChangeSorter::new(),
            schemas: SchemaBuilder::new(),
            format,
            options,
        };

        let mut sections = vec![builder.statistics_section(summary.statistics())];
        sections.extend(builder.resources_section(summary.resources()));
        sections.extend(builder.outputs_section(summary.outputs()));

        Self {
            format,
            meta: ReportMeta {
                title: options.title.clone(),
                fingerprint: summary.fingerprint().to_string(),
                generated_at: options.generated_at,
                tool_version: options.tool_version.clone(),
            },
            statistics: *summary.statistics(),
            sections,
        }
    }

    /// Looks up a section.
    #[must_use]
    pub fn section(&self, section: Section) -> Option<&SectionView> {
        self.sections.iter().find(|s| s.section() == section)
    }

    /// First eight characters of the fingerprint.
    #[must_use]
    pub fn short_fingerprint(&self) -> &str {
        self.meta
            .fingerprint
            .get(..8)
            .unwrap_or(self.meta.fingerprint.as_str())
    }
}

struct ViewBuilder<'a> {
    classifier: &'a RiskClassifier,
    formatter: ValueFormatter,
    sorter: ChangeSorter,
    schemas: SchemaBuilder,
    format: ReportFormat,
    options: &'a RenderOptions,
}

impl ViewBuilder<'_> {
    fn statistics_section(&self, stats: &Statistics) -> SectionView {
        let schema = self.schemas.build(Section::Statistics, self.format);
        let cells = schema
            .columns
            .iter()
            .filter_map(|c| match c.key {
                FieldKey::Statistics(field) => Some(Cell::Count(statistic(stats, field))),
                _ => None,
            })
            .collect();

        SectionView {
            schema,
            body: SectionBody::Rows(vec![Row {
                cells,
                danger: DangerLevel::None,
            }]),
        }
    }

    fn resources_section(&self, resources: &[ResourceChange]) -> Option<SectionView> {
        if resources.is_empty() {
            debug!("No resource changes; omitting resources section");
            return None;
        }

        let schema = self.schemas.build(Section::Resources, self.format);
        let ordered = self.sorter.sort(resources);

        if ordered.iter().all(|r| r.effective_action() == Action::NoOp) {
            return Some(SectionView {
                schema,
                body: SectionBody::Unchanged(Section::Resources.unchanged_message()),
            });
        }

        let rows = ordered
            .into_iter()
            .filter(|r| self.options.show_unchanged || r.effective_action() != Action::NoOp)
            .map(|r| self.resource_row(&schema, r))
            .collect();

        Some(SectionView {
            schema,
            body: SectionBody::Rows(rows),
        })
    }

    fn outputs_section(&self, outputs: &[OutputChange]) -> Option<SectionView> {
        if outputs.is_empty() {
            debug!("No output changes; omitting outputs section");
            return None;
        }

        let schema = self.schemas.build(Section::Outputs, self.format);
        let ordered = self.sorter.sort(outputs);

        if ordered.iter().all(|o| o.action == Action::NoOp) {
            return Some(SectionView {
                schema,
                body: SectionBody::Unchanged(Section::Outputs.unchanged_message()),
            });
        }

        let rows = ordered
            .into_iter()
            .filter(|o| self.options.show_unchanged || o.action != Action::NoOp)
            .map(|o| self.output_row(&schema, o))
            .collect();

        Some(SectionView {
            schema,
            body: SectionBody::Rows(rows),
        })
    }

    fn resource_row(&self, schema: &RenderSchema, change: &ResourceChange) -> Row {
        let assessment = self.classifier.classify(change);
        let danger = assessment.level;

        let cells = schema
            .columns
            .iter()
            .filter_map(|c| match c.key {
                FieldKey::Resource(field) => Some(match field {
                    ResourceField::Action => Cell::Action(change.effective_action()),
                    ResourceField::Resource => Cell::Text(change.address.clone()),
                    ResourceField::Type => Cell::Text(change.resource_type.clone()),
                    ResourceField::Id => Cell::Text(self.resource_id(change)),
                    ResourceField::Replacement => Cell::Flag(change.is_replacement()),
                    ResourceField::Module => Cell::Text(if change.module.is_empty() {
                        ROOT_MODULE.to_string()
                    } else {
                        change.module.clone()
                    }),
                    ResourceField::Danger => Cell::Danger(assessment.clone()),
                    ResourceField::PropertyChanges => Cell::Changes(self.property_lines(change)),
                }),
                _ => None,
            })
            .collect();

        Row { cells, danger }
    }

    fn output_row(&self, schema: &RenderSchema, change: &OutputChange) -> Row {
        let cells = schema
            .columns
            .iter()
            .filter_map(|c| match c.key {
                FieldKey::Output(field) => Some(match field {
                    OutputField::Name => Cell::Text(change.name.clone()),
                    OutputField::Action => Cell::Action(change.action),
                    OutputField::Current => Cell::Text(self.formatter.format(
                        change.before.as_ref(),
                        change.sensitive,
                        false,
                    )),
                    OutputField::Planned => Cell::Text(self.formatter.format(
                        change.after.as_ref(),
                        change.sensitive,
                        change.after_unknown,
                    )),
                    OutputField::Sensitive => Cell::Flag(change.sensitive),
                }),
                _ => None,
            })
            .collect();

        Row {
            cells,
            danger: DangerLevel::None,
        }
    }

    /// Existing id for changes to existing resources, planned id otherwise.
    fn resource_id(&self, change: &ResourceChange) -> String {
        let path = AttributePath::new("id");
        let sensitive = change.is_sensitive(&path);

        let existing = if change.action == Action::Create {
            None
        } else {
            id_of(change.before.as_ref())
        };

        match existing {
            Some(id) => self.formatter.format(Some(id), sensitive, false),
            None => self.formatter.format(
                id_of(change.after.as_ref()),
                sensitive,
                change.is_unknown(&path),
            ),
        }
    }

    fn property_lines(&self, change: &ResourceChange) -> Vec<String> {
        let properties = property_changes(change);
        let mut hidden = 0usize;
        let mut lines = Vec::with_capacity(properties.len());

        for property in &properties {
            if property.sensitive && !self.options.show_sensitive_properties {
                hidden += 1;
                continue;
            }
            lines.push(self.property_line(property));
        }

        if hidden > 0 {
            lines.push(format!("({hidden} sensitive attribute(s) hidden)"));
        }
        lines
    }

    fn property_line(&self, property: &PropertyChange) -> String {
        let path = if property.path.is_root() {
            "(resource)"
        } else {
            property.path.as_str()
        };
        let before = self.formatter.format(
            property.before.as_ref().filter(|v| !v.is_null()),
            property.sensitive,
            false,
        );
        let after = self.formatter.format(
            property.after.as_ref().filter(|v| !v.is_null()),
            property.sensitive,
            property.unknown,
        );

        if property.forces_replacement {
            format!("{path}: {before} -> {after} # forces replacement")
        } else {
            format!("{path}: {before} -> {after}")
        }
    }
}

fn id_of(value: Option<&Value>) -> Option<&Value> {
    value.and_then(|v| v.get("id")).filter(|id| !id.is_null())
}

const fn statistic(stats: &Statistics, field: StatisticsField) -> usize {
    match field {
        StatisticsField::TotalChanges => stats.total,
        StatisticsField::Added => stats.added,
        StatisticsField::Removed => stats.removed,
        StatisticsField::Modified => stats.modified,
        StatisticsField::Replacements => stats.replacements,
        StatisticsField::HighRisk => stats.high_risk,
        StatisticsField::Unmodified => stats.unmodified,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{SENSITIVE_PLACEHOLDER, UNKNOWN_PLACEHOLDER};
    use serde_json::json;

    fn build(resources: Vec<ResourceChange>, outputs: Vec<OutputChange>, options: &RenderOptions) -> ReportView {
        let classifier = RiskClassifier::new();
        let summary = PlanSummary::new(resources, outputs, &classifier);
        ReportView::build(&summary, ReportFormat::Json, options)
    }

    fn column(view: &ReportView, section: Section, key: &str) -> Vec<Cell> {
        let section = view.section(section).unwrap();
        let index = section.schema.keys().iter().position(|k| *k == key).unwrap();
        section.rows().iter().map(|r| r.cells[index].clone()).collect()
    }

    #[test]
    fn test_empty_plan_only_has_statistics() {
        let view = build(vec![], vec![], &RenderOptions::default());
        assert_eq!(view.sections.len(), 1);
        assert_eq!(view.sections[0].section(), Section::Statistics);
        assert!(view.sections[0].rows()[0].cells.iter().all(|c| *c == Cell::Count(0)));
    }

    #[test]
    fn test_all_noop_uses_unchanged_message() {
        let view = build(
            vec![ResourceChange::new("aws_instance.web", Action::NoOp)],
            vec![OutputChange::new("ip", Action::NoOp)],
            &RenderOptions::default(),
        );
        assert_eq!(
            view.section(Section::Resources).unwrap().body,
            SectionBody::Unchanged("All resources unchanged")
        );
        assert_eq!(
            view.section(Section::Outputs).unwrap().body,
            SectionBody::Unchanged("All outputs unchanged")
        );
    }

    #[test]
    fn test_noop_rows_hidden_unless_requested() {
        let resources = vec![
            ResourceChange::new("aws_instance.a", Action::NoOp),
            ResourceChange::new("aws_instance.b", Action::Create),
        ];

        let view = build(resources.clone(), vec![], &RenderOptions::default());
        assert_eq!(view.section(Section::Resources).unwrap().rows().len(), 1);

        let view = build(resources, vec![], &RenderOptions::default().with_show_unchanged(true));
        assert_eq!(view.section(Section::Resources).unwrap().rows().len(), 2);
    }

    #[test]
    fn test_rows_are_sorted() {
        let view = build(
            vec![
                ResourceChange::new("aws_instance.c", Action::Create),
                ResourceChange::new("aws_instance.a", Action::Update),
                ResourceChange::new("aws_instance.b", Action::Delete),
            ],
            vec![],
            &RenderOptions::default(),
        );
        assert_eq!(
            column(&view, Section::Resources, "resource"),
            vec![
                Cell::Text("aws_instance.b".into()),
                Cell::Text("aws_instance.a".into()),
                Cell::Text("aws_instance.c".into()),
            ]
        );
    }

    #[test]
    fn test_resource_id_column() {
        let view = build(
            vec![
                ResourceChange::new("aws_instance.new", Action::Create)
                    .with_after(json!({"ami": "ami-1"}))
                    .with_unknown("id"),
                ResourceChange::new("aws_instance.old", Action::Update)
                    .with_before(json!({"id": "i-123"}))
                    .with_after(json!({"id": "i-123"})),
            ],
            vec![],
            &RenderOptions::default(),
        );
        assert_eq!(
            column(&view, Section::Resources, "id"),
            vec![
                Cell::Text("i-123".into()),
                Cell::Text(UNKNOWN_PLACEHOLDER.into()),
            ]
        );
    }

    #[test]
    fn test_property_lines() {
        let change = ResourceChange::new("aws_instance.web", Action::Update)
            .with_before(json!({"ami": "ami-1", "size": "small"}))
            .with_after(json!({"ami": "ami-2", "size": "large"}))
            .with_replace_path("ami");

        let view = build(vec![change], vec![], &RenderOptions::default());
        assert_eq!(
            column(&view, Section::Resources, "propertyChanges"),
            vec![Cell::Changes(vec![
                "ami: ami-1 -> ami-2 # forces replacement".into(),
                "size: small -> large".into(),
            ])]
        );
    }

    #[test]
    fn test_sensitive_properties_masked_or_hidden() {
        let change = ResourceChange::new("aws_db_instance.main", Action::Update)
            .with_before(json!({"password": "old", "size": 10}))
            .with_after(json!({"password": "new", "size": 20}))
            .with_sensitive("password");

        let shown = build(vec![change.clone()], vec![], &RenderOptions::default());
        let cells = column(&shown, Section::Resources, "propertyChanges");
        let Cell::Changes(lines) = &cells[0] else {
            panic!("expected change lines");
        };
        assert_eq!(
            lines[0],
            format!("password: {SENSITIVE_PLACEHOLDER} -> {SENSITIVE_PLACEHOLDER}")
        );
        assert!(!lines.iter().any(|l| l.contains("old") || l.contains("new")));

        let hidden = build(
            vec![change],
            vec![],
            &RenderOptions::default().with_show_sensitive_properties(false),
        );
        assert_eq!(
            column(&hidden, Section::Resources, "propertyChanges"),
            vec![Cell::Changes(vec![
                "size: 10 -> 20".into(),
                "(1 sensitive attribute(s) hidden)".into(),
            ])]
        );
    }

    #[test]
    fn test_sensitive_output_masked() {
        let view = build(
            vec![],
            vec![OutputChange::new("db_password", Action::Update)
                .with_sensitive(true)
                .with_before(json!("secret123"))
                .with_after(json!("secret456"))],
            &RenderOptions::default(),
        );
        assert_eq!(
            column(&view, Section::Outputs, "current"),
            vec![Cell::Text(SENSITIVE_PLACEHOLDER.into())]
        );
        assert_eq!(
            column(&view, Section::Outputs, "planned"),
            vec![Cell::Text(SENSITIVE_PLACEHOLDER.into())]
        );
    }

    #[test]
    fn test_row_danger_and_module() {
        let view = build(
            vec![ResourceChange::new("module.db.aws_db_instance.main", Action::Delete)],
            vec![],
            &RenderOptions::default(),
        );
        let rows = view.section(Section::Resources).unwrap().rows();
        assert_eq!(rows[0].danger, DangerLevel::High);
        assert_eq!(
            column(&view, Section::Resources, "module"),
            vec![Cell::Text("module.db".into())]
        );
    }

    #[test]
    fn test_cell_plain_text() {
        assert_eq!(Cell::Flag(true).plain(", "), "Yes");
        assert_eq!(Cell::Count(3).plain(", "), "3");
        assert_eq!(Cell::Action(Action::NoOp).plain(", "), "no-op");
        assert_eq!(
            Cell::Changes(vec!["a".into(), "b".into()]).plain("; "),
            "a; b"
        );
        assert_eq!(
            Cell::Danger(RiskAssessment {
                level: DangerLevel::High,
                reason: "irreversible".into(),
            })
            .plain(""),
            "high: irreversible"
        );
    }
}
