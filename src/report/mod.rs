//! Multi-format report rendering.
//!
//! A [`PlanSummary`] is first turned into a format-neutral [`ReportView`]
//! using the section schemas, then handed to the [`Reporter`] for the
//! requested [`ReportFormat`]. Reporters only decide presentation: header
//! casing comes from the schema, masking from the value formatter and
//! ordering from the change sorter.

mod collapse;
mod csv;
mod escape;
mod format;
mod html;
mod json;
mod markdown;
mod options;
mod schema;
mod table;
mod view;

pub use collapse::CollapsePolicy;
pub use csv::CsvReporter;
pub use format::ReportFormat;
pub use html::HtmlReporter;
pub use json::JsonReporter;
pub use markdown::MarkdownReporter;
pub use options::{
    DEFAULT_COLLAPSE_THRESHOLD, DEFAULT_PROPERTY_PREVIEW, DEFAULT_TITLE, RenderOptions,
};
pub use schema::{
    CellKind, Column, ColumnAlign, FieldKey, HeaderCase, OutputField, RenderSchema, ResourceField,
    SchemaBuilder, Section, StatisticsField,
};
pub use table::TableReporter;
pub use view::{Cell, ReportMeta, ReportView, Row, SectionBody, SectionView};

use std::io::Write;
use tracing::debug;

use crate::analysis::PlanSummary;
use crate::error::Result;

/// Renders a [`ReportView`] in one format.
pub trait Reporter {
    /// Format produced by this reporter.
    fn format(&self) -> ReportFormat;

    /// Renders the view to a string.
    fn render(&self, view: &ReportView, options: &RenderOptions) -> String;

    /// Renders the view into a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_report(
        &self,
        view: &ReportView,
        options: &RenderOptions,
        writer: &mut dyn Write,
    ) -> Result<()> {
        let report = self.render(view, options);
        writer.write_all(report.as_bytes())?;
        Ok(())
    }
}

/// Creates the reporter for a format.
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn Reporter> {
    match format {
        ReportFormat::Table => Box::new(TableReporter::new()),
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Html => Box::new(HtmlReporter::new()),
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
        ReportFormat::Csv => Box::new(CsvReporter::new()),
    }
}

/// Entry point for rendering a plan summary.
///
/// Danger levels come from the classifier stored on the [`PlanSummary`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportRenderer;

impl ReportRenderer {
    /// Creates a renderer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Builds the format-neutral view of `summary`.
    #[must_use]
    pub fn view(
        &self,
        summary: &PlanSummary,
        format: ReportFormat,
        options: &RenderOptions,
    ) -> ReportView {
        ReportView::build(summary, format, options)
    }

    /// Renders `summary` in `format`.
    #[must_use]
    pub fn render(
        &self,
        summary: &PlanSummary,
        format: ReportFormat,
        options: &RenderOptions,
    ) -> String {
        debug!("Rendering {} report", format);
        let view = self.view(summary, format, options);
        create_reporter(format).render(&view, options)
    }

    /// Renders `summary` in the format named `format`.
    ///
    /// # Errors
    ///
    /// Returns an error listing the valid formats if `format` is unknown.
    /// Nothing is rendered in that case.
    pub fn render_named(
        &self,
        summary: &PlanSummary,
        format: &str,
        options: &RenderOptions,
    ) -> Result<String> {
        let format: ReportFormat = format.parse()?;
        Ok(self.render(summary, format, options))
    }
}
