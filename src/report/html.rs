//! Standalone HTML page.

use std::fmt::Write;

use super::collapse::CollapsePolicy;
use super::escape;
use super::format::ReportFormat;
use super::options::RenderOptions;
use super::schema::{ColumnAlign, Section};
use super::view::{Cell, ReportView, Row, SectionBody, SectionView};
use super::Reporter;
use crate::analysis::DangerLevel;

/// Renders reports as a self-contained HTML document.
///
/// Sections and long property lists are wrapped in `<details>` elements
/// according to the collapse policy.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlReporter;

const STYLES: &str = r"
<style>
    body {
        font-family: 'Monaco', 'Menlo', 'Ubuntu Mono', monospace;
        background-color: #1e1e1e;
        color: #d4d4d4;
        padding: 20px;
        line-height: 1.5;
    }
    h1 { color: #ffffff; margin-bottom: 4px; }
    .meta { color: #808080; margin-bottom: 20px; }
    .section {
        background-color: #2d2d2d;
        padding: 15px;
        border-radius: 5px;
        margin-bottom: 15px;
    }
    .section > summary, .section > h2 {
        font-weight: bold;
        color: #ffffff;
        font-size: 1.2em;
        cursor: pointer;
        margin: 0 0 10px 0;
    }
    table { border-collapse: collapse; width: 100%; }
    th, td { text-align: left; padding: 4px 8px; border-bottom: 1px solid #3c3c3c; vertical-align: top; }
    th { color: #9cdcfe; }
    tr.danger-high { border-left: 4px solid rgb(255, 160, 160); }
    tr.danger-medium { border-left: 4px solid rgb(255, 230, 160); }
    tr.danger-low { border-left: 4px solid rgb(160, 200, 255); }
    .action.create { color: rgb(152, 225, 152); }
    .action.update { color: rgb(255, 230, 160); }
    .action.delete { color: rgb(255, 160, 160); }
    .action.replace { color: rgb(181, 174, 254); }
    .action.no-op { color: rgb(160, 160, 160); }
    .danger.high { color: rgb(255, 160, 160); font-weight: bold; }
    .danger.medium { color: rgb(255, 230, 160); }
    .danger.low { color: rgb(160, 200, 255); }
    .danger.none { color: rgb(160, 160, 160); }
    .reason { color: #808080; }
    .changes { margin: 0; padding-left: 16px; }
    .unchanged { color: rgb(160, 160, 160); }
    .collapsed-tail { color: #808080; font-style: italic; }
    th.align-center, td.align-center { text-align: center; }
    th.align-right, td.align-right { text-align: right; }
</style>
";

impl HtmlReporter {
    /// Creates a new HTML reporter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn change_list(lines: &[String]) -> String {
        let mut out = String::from("<ul class=\"changes\">");
        for line in lines {
            let _ = write!(out, "<li>{}</li>", escape::html(line));
        }
        out.push_str("</ul>");
        out
    }

    fn cell(cell: &Cell, row: &Row, policy: &CollapsePolicy) -> String {
        match cell {
            Cell::Text(text) => escape::html(text),
            Cell::Count(n) => n.to_string(),
            Cell::Flag(true) => "Yes".to_string(),
            Cell::Flag(false) => "No".to_string(),
            Cell::Action(action) => format!(
                "<span class=\"action {}\">{} {}</span>",
                action.label(),
                escape::html(action.symbol().trim()),
                action.label()
            ),
            Cell::Danger(assessment) => {
                let level = assessment.level.label();
                if assessment.level == DangerLevel::None {
                    format!("<span class=\"danger {level}\">{level}</span>")
                } else {
                    format!(
                        "<span class=\"danger {level}\">{level}</span><br><span class=\"reason\">{}</span>",
                        escape::html(&assessment.reason)
                    )
                }
            }
            Cell::Changes(lines) if lines.is_empty() => "-".to_string(),
            Cell::Changes(lines) => {
                if policy.row_expanded(row) {
                    Self::change_list(lines)
                } else {
                    format!(
                        "<details><summary>{} change(s)</summary>{}</details>",
                        lines.len(),
                        Self::change_list(lines)
                    )
                }
            }
        }
    }

    const fn align_class(align: ColumnAlign) -> &'static str {
        match align {
            ColumnAlign::Left => "",
            ColumnAlign::Center => " class=\"align-center\"",
            ColumnAlign::Right => " class=\"align-right\"",
        }
    }

    fn body(output: &mut String, section: &SectionView, policy: &CollapsePolicy) {
        match &section.body {
            SectionBody::Unchanged(message) => {
                let _ = writeln!(output, "<p class=\"unchanged\">{}</p>", escape::html(message));
            }
            SectionBody::Rows(rows) => {
                let aligns = section.schema.alignments();
                output.push_str("<table>\n<thead><tr>");
                for (header, align) in section.schema.headers().into_iter().zip(&aligns) {
                    let _ = write!(
                        output,
                        "<th{}>{}</th>",
                        Self::align_class(*align),
                        escape::html(header)
                    );
                }
                output.push_str("</tr></thead>\n<tbody>\n");

                for row in rows {
                    let _ = write!(output, "<tr class=\"danger-{}\">", row.danger.label());
                    for (cell, align) in row.cells.iter().zip(&aligns) {
                        let _ = write!(
                            output,
                            "<td{}>{}</td>",
                            Self::align_class(*align),
                            Self::cell(cell, row, policy)
                        );
                    }
                    output.push_str("</tr>\n");
                }
                output.push_str("</tbody>\n</table>\n");
            }
        }
    }

    fn section(output: &mut String, section: &SectionView, policy: &CollapsePolicy) {
        let title = escape::html(&section.schema.title());

        if !policy.is_enabled() {
            let _ = writeln!(output, "<section class=\"section\">\n<h2>{title}</h2>");
            Self::body(output, section, policy);
            output.push_str("</section>\n\n");
            return;
        }

        let open = if policy.section_expanded(section.rows()) {
            " open"
        } else {
            ""
        };
        let label = match (&section.body, section.section()) {
            (SectionBody::Rows(rows), Section::Resources | Section::Outputs) => {
                format!("{title} ({})", rows.len())
            }
            _ => title,
        };

        let _ = writeln!(
            output,
            "<details class=\"section\"{open}>\n<summary>{label}</summary>"
        );
        Self::body(output, section, policy);
        output.push_str("</details>\n\n");
    }
}

impl Reporter for HtmlReporter {
    fn format(&self) -> ReportFormat {
        ReportFormat::Html
    }

    fn render(&self, view: &ReportView, options: &RenderOptions) -> String {
        let policy = CollapsePolicy::for_format(ReportFormat::Html, options);
        let title = escape::html(&view.meta.title);
        let mut output = String::new();

        output.push_str("<!DOCTYPE html>\n");
        output.push_str("<html lang=\"en\">\n");
        output.push_str("<head>\n");
        output.push_str("  <meta charset=\"UTF-8\">\n");
        output.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
        let _ = writeln!(output, "  <title>{title}</title>");
        output.push_str(STYLES);
        output.push_str("</head>\n");
        output.push_str("<body>\n\n");

        let _ = writeln!(output, "<h1>{title}</h1>");
        let _ = write!(
            output,
            "<div class=\"meta\">Plan fingerprint: <code>{}</code>",
            escape::html(view.short_fingerprint())
        );
        if let Some(at) = view.meta.generated_at {
            let _ = write!(output, " &middot; Generated {}", at.to_rfc3339());
        }
        if let Some(version) = &view.meta.tool_version {
            let _ = write!(output, " &middot; Version {}", escape::html(version));
        }
        output.push_str("</div>\n\n");

        for section in &view.sections {
            Self::section(&mut output, section, &policy);
        }

        output.push_str("</body>\n");
        output.push_str("</html>\n");
        output
    }
}
