//! Progressive disclosure for formats that support it.

use super::format::ReportFormat;
use super::options::RenderOptions;
use super::view::Row;
use crate::analysis::DangerLevel;

/// Decides which sections, rows and detail lines start expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollapsePolicy {
    enabled: bool,
    threshold: usize,
    property_preview: usize,
    auto_expand_dangerous: bool,
}

impl CollapsePolicy {
    /// Policy for `format` under `options`.
    ///
    /// Formats without collapsing support, or `expand_all`, disable it.
    #[must_use]
    pub const fn for_format(format: ReportFormat, options: &RenderOptions) -> Self {
        Self {
            enabled: format.supports_collapsing() && !options.expand_all,
            threshold: options.collapse_threshold,
            property_preview: options.property_preview,
            auto_expand_dangerous: options.auto_expand_dangerous,
        }
    }

    /// A policy that never collapses anything.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            threshold: usize::MAX,
            property_preview: usize::MAX,
            auto_expand_dangerous: true,
        }
    }

    /// Whether collapsing is active.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn keeps_open(&self, row: &Row) -> bool {
        self.auto_expand_dangerous && row.danger == DangerLevel::High
    }

    /// Whether a section with these rows starts expanded.
    #[must_use]
    pub fn section_expanded(&self, rows: &[Row]) -> bool {
        !self.enabled || rows.len() <= self.threshold || rows.iter().any(|r| self.keeps_open(r))
    }

    /// Whether a row's property lines are shown in full.
    #[must_use]
    pub fn row_expanded(&self, row: &Row) -> bool {
        !self.enabled || row.detail_len() <= self.property_preview || self.keeps_open(row)
    }

    /// Number of detail lines shown for a collapsed row.
    #[must_use]
    pub const fn preview_len(&self) -> usize {
        self.property_preview
    }

    /// Rows shown when a section is rendered inline, and the number hidden.
    ///
    /// An expanded section shows every row, including sections held open
    /// by a high-risk change.
    #[must_use]
    pub fn visible_rows<'a>(&self, rows: &'a [Row]) -> (Vec<&'a Row>, usize) {
        if self.section_expanded(rows) {
            return (rows.iter().collect(), 0);
        }

        let shown = self.threshold.min(rows.len());
        (rows[..shown].iter().collect(), rows.len() - shown)
    }
}
