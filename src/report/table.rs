//! Interactive terminal table.

use colored::{ColoredString, Colorize};
use std::fmt::Write;
use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};

use super::collapse::CollapsePolicy;
use super::format::ReportFormat;
use super::schema::ColumnAlign;
use super::options::RenderOptions;
use super::view::{Cell, ReportView, Row, SectionBody, SectionView};
use super::Reporter;
use crate::analysis::DangerLevel;
use crate::model::Action;

/// Renders reports as terminal tables with uppercase headers.
#[derive(Debug, Default, Clone, Copy)]
pub struct TableReporter;

impl TableReporter {
    /// Creates a new table reporter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Applies colors only when enabled.
#[derive(Debug, Clone, Copy)]
struct Painter {
    color: bool,
}

impl Painter {
    fn paint(self, text: &str, style: fn(&str) -> ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn action(self, action: Action) -> String {
        let text = format!("{} {}", action.symbol(), action.label());
        let text = text.trim_start();
        match action {
            Action::Create => self.paint(text, |s| s.green()),
            Action::Update => self.paint(text, |s| s.yellow()),
            Action::Delete => self.paint(text, |s| s.red()),
            Action::Replace => self.paint(text, |s| s.magenta()),
            Action::NoOp => self.paint(text, |s| s.dimmed()),
        }
    }

    fn danger(self, level: DangerLevel) -> String {
        let text = level.label().to_uppercase();
        match level {
            DangerLevel::High => self.paint(&text, |s| s.red().bold()),
            DangerLevel::Medium => self.paint(&text, |s| s.yellow()),
            DangerLevel::Low => self.paint(&text, |s| s.blue()),
            DangerLevel::None => self.paint(&text, |s| s.dimmed()),
        }
    }
}

impl TableReporter {
    fn cell(cell: &Cell, row: &Row, policy: &CollapsePolicy, painter: Painter) -> String {
        match cell {
            Cell::Text(text) => text.clone(),
            Cell::Count(n) => n.to_string(),
            Cell::Flag(true) => "yes".to_string(),
            Cell::Flag(false) => "no".to_string(),
            Cell::Action(action) => painter.action(*action),
            Cell::Danger(assessment) => {
                if assessment.level == DangerLevel::None {
                    painter.danger(assessment.level)
                } else {
                    format!("{}\n{}", painter.danger(assessment.level), assessment.reason)
                }
            }
            Cell::Changes(lines) if lines.is_empty() => "-".to_string(),
            Cell::Changes(lines) => {
                if policy.row_expanded(row) {
                    lines.join("\n")
                } else {
                    let preview = policy.preview_len();
                    let mut shown: Vec<&str> = lines.iter().take(preview).map(String::as_str).collect();
                    let more = format!("... {} more", lines.len() - shown.len());
                    shown.push(&more);
                    shown.join("\n")
                }
            }
        }
    }

    fn section(output: &mut String, section: &SectionView, policy: &CollapsePolicy, painter: Painter) {
        let _ = writeln!(output, "\n{}", painter.paint(&section.schema.title(), |s| s.bold()));

        match &section.body {
            SectionBody::Unchanged(message) => {
                let _ = writeln!(output, "{} {message}", painter.paint("✓", |s| s.green()));
            }
            SectionBody::Rows(rows) => {
                let (visible, hidden) = policy.visible_rows(rows);

                let mut builder = Builder::default();
                builder.push_record(section.schema.headers().into_iter().map(String::from));
                for row in visible {
                    builder.push_record(
                        row.cells
                            .iter()
                            .map(|cell| Self::cell(cell, row, policy, painter)),
                    );
                }

                let mut table = builder.build();
                table.with(Style::rounded());
                for (index, align) in section.schema.alignments().into_iter().enumerate() {
                    match align {
                        ColumnAlign::Left => {}
                        ColumnAlign::Center => {
                            table.modify(Columns::single(index), Alignment::center());
                        }
                        ColumnAlign::Right => {
                            table.modify(Columns::single(index), Alignment::right());
                        }
                    }
                }
                let _ = writeln!(output, "{table}");

                if hidden > 0 {
                    let _ = writeln!(
                        output,
                        "... {hidden} more change(s) collapsed (use --expand to show all)"
                    );
                }
            }
        }
    }
}

impl Reporter for TableReporter {
    fn format(&self) -> ReportFormat {
        ReportFormat::Table
    }

    fn render(&self, view: &ReportView, options: &RenderOptions) -> String {
        let policy = CollapsePolicy::for_format(ReportFormat::Table, options);
        let painter = Painter {
            color: options.color,
        };
        let mut output = String::new();

        let _ = writeln!(output, "\n{}", painter.paint(&view.meta.title, |s| s.bold()));
        let _ = writeln!(output, "   Plan fingerprint: {}", view.short_fingerprint());
        if let Some(at) = view.meta.generated_at {
            let _ = writeln!(output, "   Generated: {}", at.to_rfc3339());
        }
        if let Some(version) = &view.meta.tool_version {
            let _ = writeln!(output, "   Version: {version}");
        }

        for section in &view.sections {
            Self::section(&mut output, section, &policy, painter);
        }

        let _ = writeln!(output, "\nPlan: {}", view.statistics);
        output
    }
}
