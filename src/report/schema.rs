//! Column schemas for each report section.
//!
//! Every section has a fixed, enumerated set of field keys. A schema is the
//! ordered list of columns for one `(section, format)` pair, with headers
//! cased for that format. Renderers look columns up by key, never by header
//! text, so the same key set drives every format.

use serde::Serialize;

use super::format::ReportFormat;

/// Report sections, in rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Section {
    /// Summary counts.
    Statistics,
    /// Resource changes.
    Resources,
    /// Output changes.
    Outputs,
}

impl Section {
    /// All sections in the order they are rendered.
    pub const ALL: [Self; 3] = [Self::Statistics, Self::Resources, Self::Outputs];

    /// Section title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Statistics => "Statistics",
            Self::Resources => "Resources",
            Self::Outputs => "Outputs",
        }
    }

    /// Message shown when every entry in the section is unchanged.
    #[must_use]
    pub const fn unchanged_message(self) -> &'static str {
        match self {
            Self::Statistics => "No changes",
            Self::Resources => "All resources unchanged",
            Self::Outputs => "All outputs unchanged",
        }
    }
}

/// How column headers are cased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderCase {
    /// `PROPERTY CHANGES`
    Upper,
    /// `Property Changes`
    Title,
}

impl HeaderCase {
    /// Renders a camelCase field key as a header.
    #[must_use]
    pub fn apply(self, key: &str) -> String {
        let title = title_case(key);
        match self {
            Self::Upper => title.to_uppercase(),
            Self::Title => title,
        }
    }
}

/// Splits a camelCase key into capitalized words.
fn title_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, ch) in key.chars().enumerate() {
        if i == 0 {
            out.extend(ch.to_uppercase());
        } else if ch.is_uppercase() {
            out.push(' ');
            out.push(ch);
        } else {
            out.push(ch);
        }
    }
    out
}

/// Horizontal alignment of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnAlign {
    /// Flush left.
    Left,
    /// Centered.
    Center,
    /// Flush right.
    Right,
}

/// How a column's cells are rendered.
///
/// Reporters read the kind from the schema to lay out a column before they
/// look at any cell in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Free text.
    Text,
    /// Non-negative count.
    Count,
    /// Yes/no flag.
    Flag,
    /// Change action.
    Action,
    /// Danger level with a reason.
    Danger,
    /// List of property change lines.
    Changes,
}

impl CellKind {
    /// Alignment of columns of this kind.
    #[must_use]
    pub const fn align(self) -> ColumnAlign {
        match self {
            Self::Count => ColumnAlign::Right,
            Self::Flag => ColumnAlign::Center,
            Self::Text | Self::Action | Self::Danger | Self::Changes => ColumnAlign::Left,
        }
    }
}

/// Fields of the statistics section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatisticsField {
    /// Number of resource changes.
    TotalChanges,
    /// Resources to create.
    Added,
    /// Resources to delete.
    Removed,
    /// Resources updated in place.
    Modified,
    /// Resources to replace.
    Replacements,
    /// High-risk changes.
    HighRisk,
    /// Unchanged resources.
    Unmodified,
}

impl StatisticsField {
    /// Fields in column order.
    pub const ALL: [Self; 7] = [
        Self::TotalChanges,
        Self::Added,
        Self::Removed,
        Self::Modified,
        Self::Replacements,
        Self::HighRisk,
        Self::Unmodified,
    ];

    /// Canonical camelCase key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::TotalChanges => "totalChanges",
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Modified => "modified",
            Self::Replacements => "replacements",
            Self::HighRisk => "highRisk",
            Self::Unmodified => "unmodified",
        }
    }
}

/// Fields of the resources section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceField {
    /// Effective action.
    Action,
    /// Resource address.
    Resource,
    /// Resource type.
    Type,
    /// Provider-assigned identifier.
    Id,
    /// Whether the change is a replacement.
    Replacement,
    /// Owning module.
    Module,
    /// Danger level and reason.
    Danger,
    /// Changed attribute lines.
    PropertyChanges,
}

impl ResourceField {
    /// Fields in column order.
    pub const ALL: [Self; 8] = [
        Self::Action,
        Self::Resource,
        Self::Type,
        Self::Id,
        Self::Replacement,
        Self::Module,
        Self::Danger,
        Self::PropertyChanges,
    ];

    /// Canonical camelCase key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Action => "action",
            Self::Resource => "resource",
            Self::Type => "type",
            Self::Id => "id",
            Self::Replacement => "replacement",
            Self::Module => "module",
            Self::Danger => "danger",
            Self::PropertyChanges => "propertyChanges",
        }
    }

    const fn kind(self) -> CellKind {
        match self {
            Self::Action => CellKind::Action,
            Self::Replacement => CellKind::Flag,
            Self::Danger => CellKind::Danger,
            Self::PropertyChanges => CellKind::Changes,
            Self::Resource | Self::Type | Self::Id | Self::Module => CellKind::Text,
        }
    }
}

/// Fields of the outputs section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputField {
    /// Output name.
    Name,
    /// Change action.
    Action,
    /// Current value.
    Current,
    /// Planned value.
    Planned,
    /// Whether the output is sensitive.
    Sensitive,
}

impl OutputField {
    /// Fields in column order.
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Action,
        Self::Current,
        Self::Planned,
        Self::Sensitive,
    ];

    /// Canonical camelCase key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Action => "action",
            Self::Current => "current",
            Self::Planned => "planned",
            Self::Sensitive => "sensitive",
        }
    }

    const fn kind(self) -> CellKind {
        match self {
            Self::Action => CellKind::Action,
            Self::Sensitive => CellKind::Flag,
            Self::Name | Self::Current | Self::Planned => CellKind::Text,
        }
    }
}

/// A field key belonging to one of the sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    /// Statistics column.
    Statistics(StatisticsField),
    /// Resources column.
    Resource(ResourceField),
    /// Outputs column.
    Output(OutputField),
}

impl FieldKey {
    /// Canonical camelCase key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Statistics(f) => f.key(),
            Self::Resource(f) => f.key(),
            Self::Output(f) => f.key(),
        }
    }

    /// Cell kind for this field.
    #[must_use]
    pub const fn kind(self) -> CellKind {
        match self {
            Self::Statistics(_) => CellKind::Count,
            Self::Resource(f) => f.kind(),
            Self::Output(f) => f.kind(),
        }
    }

    /// Section the field belongs to.
    #[must_use]
    pub const fn section(self) -> Section {
        match self {
            Self::Statistics(_) => Section::Statistics,
            Self::Resource(_) => Section::Resources,
            Self::Output(_) => Section::Outputs,
        }
    }
}

/// One column of a rendered section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Field key.
    pub key: FieldKey,
    /// Header text, cased for the target format.
    pub header: String,
    /// Cell kind.
    pub kind: CellKind,
}

/// Ordered columns of one section for one format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSchema {
    /// Section described.
    pub section: Section,
    /// Header casing applied.
    pub header_case: HeaderCase,
    /// Columns in display order.
    pub columns: Vec<Column>,
}

impl RenderSchema {
    /// Header texts in column order.
    #[must_use]
    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.header.as_str()).collect()
    }

    /// Column alignments in column order.
    #[must_use]
    pub fn alignments(&self) -> Vec<ColumnAlign> {
        self.columns.iter().map(|c| c.kind.align()).collect()
    }

    /// Canonical keys in column order.
    #[must_use]
    pub fn keys(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.key.key()).collect()
    }

    /// Section title cased like the headers.
    #[must_use]
    pub fn title(&self) -> String {
        match self.header_case {
            HeaderCase::Upper => self.section.title().to_uppercase(),
            HeaderCase::Title => self.section.title().to_string(),
        }
    }
}

/// Builds [`RenderSchema`]s.
///
/// Building is pure: the same `(section, format)` always yields an equal
/// schema, so callers may build once per render and reuse it.
#[derive(Debug, Default, Clone, Copy)]
pub struct SchemaBuilder;

impl SchemaBuilder {
    /// Creates a new builder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Builds the schema of `section` for `format`.
    #[must_use]
    pub fn build(&self, section: Section, format: ReportFormat) -> RenderSchema {
        let header_case = format.header_case();
        let keys: Vec<FieldKey> = match section {
            Section::Statistics => StatisticsField::ALL.into_iter().map(FieldKey::Statistics).collect(),
            Section::Resources => ResourceField::ALL.into_iter().map(FieldKey::Resource).collect(),
            Section::Outputs => OutputField::ALL.into_iter().map(FieldKey::Output).collect(),
        };

        let columns = keys
            .into_iter()
            .map(|key| Column {
                key,
                header: header_case.apply(key.key()),
                kind: key.kind(),
            })
            .collect();

        RenderSchema {
            section,
            header_case,
            columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_case_apply() {
        assert_eq!(HeaderCase::Title.apply("propertyChanges"), "Property Changes");
        assert_eq!(HeaderCase::Upper.apply("propertyChanges"), "PROPERTY CHANGES");
        assert_eq!(HeaderCase::Title.apply("id"), "Id");
        assert_eq!(HeaderCase::Title.apply("totalChanges"), "Total Changes");
    }

    #[test]
    fn test_resource_headers_per_format() {
        let builder = SchemaBuilder::new();
        let table = builder.build(Section::Resources, ReportFormat::Table);
        let html = builder.build(Section::Resources, ReportFormat::Html);

        assert_eq!(
            table.headers(),
            vec!["ACTION", "RESOURCE", "TYPE", "ID", "REPLACEMENT", "MODULE", "DANGER", "PROPERTY CHANGES"]
        );
        assert_eq!(
            html.headers(),
            vec!["Action", "Resource", "Type", "Id", "Replacement", "Module", "Danger", "Property Changes"]
        );
        assert_eq!(table.keys(), html.keys());
    }

    #[test]
    fn test_key_sets_identical_across_formats() {
        let builder = SchemaBuilder::new();
        for section in Section::ALL {
            let reference = builder.build(section, ReportFormat::Table).keys();
            for format in ReportFormat::ALL {
                let schema = builder.build(section, format);
                assert_eq!(schema.keys(), reference);
                assert!(schema.columns.iter().all(|c| c.key.section() == section));
            }
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let builder = SchemaBuilder::new();
        assert_eq!(
            builder.build(Section::Outputs, ReportFormat::Markdown),
            builder.build(Section::Outputs, ReportFormat::Markdown)
        );
    }

    #[test]
    fn test_statistics_columns_are_counts() {
        let schema = SchemaBuilder::new().build(Section::Statistics, ReportFormat::Json);
        assert_eq!(schema.columns.len(), 7);
        assert!(schema.columns.iter().all(|c| c.kind == CellKind::Count));
        assert_eq!(schema.headers()[5], "High Risk");
    }

    #[test]
    fn test_alignment_follows_cell_kind() {
        let builder = SchemaBuilder::new();
        let resources = builder.build(Section::Resources, ReportFormat::Markdown);
        let aligns = resources.alignments();
        assert_eq!(aligns[0], ColumnAlign::Left);
        assert_eq!(aligns[4], ColumnAlign::Center);
        assert_eq!(resources.columns[4].kind, CellKind::Flag);

        let stats = builder.build(Section::Statistics, ReportFormat::Html);
        assert!(stats.alignments().iter().all(|a| *a == ColumnAlign::Right));
    }

    #[test]
    fn test_schema_title_casing() {
        let builder = SchemaBuilder::new();
        assert_eq!(builder.build(Section::Outputs, ReportFormat::Table).title(), "OUTPUTS");
        assert_eq!(builder.build(Section::Outputs, ReportFormat::Csv).title(), "Outputs");
    }
}
