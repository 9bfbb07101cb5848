//! GitHub-flavored Markdown.

use std::fmt::Write;

use super::collapse::CollapsePolicy;
use super::escape;
use super::format::ReportFormat;
use super::schema::ColumnAlign;
use super::options::RenderOptions;
use super::view::{Cell, ReportView, Row, SectionBody, SectionView};
use super::Reporter;
use crate::analysis::DangerLevel;

/// Renders reports as Markdown tables, suitable for pull request comments.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Creates a new Markdown reporter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn cell(cell: &Cell, row: &Row, policy: &CollapsePolicy) -> String {
        match cell {
            Cell::Text(text) => escape::markdown_cell(text),
            Cell::Count(n) => n.to_string(),
            Cell::Flag(true) => "Yes".to_string(),
            Cell::Flag(false) => "No".to_string(),
            Cell::Action(action) => {
                escape::markdown_cell(format!("{} {}", action.symbol(), action.label()).trim())
            }
            Cell::Danger(assessment) => match assessment.level {
                DangerLevel::None => assessment.level.label().to_string(),
                DangerLevel::High => format!(
                    "**{}**: {}",
                    assessment.level,
                    escape::markdown_cell(&assessment.reason)
                ),
                DangerLevel::Low | DangerLevel::Medium => format!(
                    "{}: {}",
                    assessment.level,
                    escape::markdown_cell(&assessment.reason)
                ),
            },
            Cell::Changes(lines) if lines.is_empty() => "-".to_string(),
            Cell::Changes(lines) => {
                let joined = lines
                    .iter()
                    .map(|line| escape::markdown_cell(line))
                    .collect::<Vec<_>>()
                    .join("<br>");
                if policy.row_expanded(row) {
                    joined
                } else {
                    format!(
                        "<details><summary>{} change(s)</summary>{joined}</details>",
                        lines.len()
                    )
                }
            }
        }
    }

    fn table(output: &mut String, section: &SectionView, rows: &[Row], policy: &CollapsePolicy) {
        let headers = section.schema.headers();
        let _ = writeln!(output, "| {} |", headers.join(" | "));
        let separator: String = section
            .schema
            .alignments()
            .into_iter()
            .map(|align| match align {
                ColumnAlign::Left => " --- |",
                ColumnAlign::Center => " :---: |",
                ColumnAlign::Right => " ---: |",
            })
            .collect();
        let _ = writeln!(output, "|{separator}");
        for row in rows {
            let cells: Vec<String> = row
                .cells
                .iter()
                .map(|cell| Self::cell(cell, row, policy))
                .collect();
            let _ = writeln!(output, "| {} |", cells.join(" | "));
        }
    }

    fn section(output: &mut String, section: &SectionView, policy: &CollapsePolicy) {
        let _ = writeln!(output, "## {}\n", section.schema.title());

        match &section.body {
            SectionBody::Unchanged(message) => {
                let _ = writeln!(output, "_{message}_\n");
            }
            SectionBody::Rows(rows) if policy.section_expanded(rows) => {
                Self::table(output, section, rows, policy);
                output.push('\n');
            }
            SectionBody::Rows(rows) => {
                let _ = writeln!(
                    output,
                    "<details>\n<summary>Show {} change(s)</summary>\n",
                    rows.len()
                );
                Self::table(output, section, rows, policy);
                output.push_str("\n</details>\n\n");
            }
        }
    }
}

impl Reporter for MarkdownReporter {
    fn format(&self) -> ReportFormat {
        ReportFormat::Markdown
    }

    fn render(&self, view: &ReportView, options: &RenderOptions) -> String {
        let policy = CollapsePolicy::for_format(ReportFormat::Markdown, options);
        let mut output = String::new();

        let _ = writeln!(output, "# {}\n", view.meta.title);
        let _ = write!(output, "Plan fingerprint: `{}`", view.short_fingerprint());
        if let Some(at) = view.meta.generated_at {
            let _ = write!(output, " · Generated {}", at.to_rfc3339());
        }
        if let Some(version) = &view.meta.tool_version {
            let _ = write!(output, " · Version {version}");
        }
        output.push_str("\n\n");

        for section in &view.sections {
            Self::section(&mut output, section, &policy);
        }

        let _ = writeln!(output, "**Plan:** {}", view.statistics);
        output
    }
}
