//! Per-render options.

use chrono::{DateTime, Utc};

use crate::analysis::DEFAULT_MAX_VALUE_LENGTH;

/// Default report title.
pub const DEFAULT_TITLE: &str = "Infrastructure Change Report";

/// Default number of visible rows before a section collapses.
pub const DEFAULT_COLLAPSE_THRESHOLD: usize = 20;

/// Default number of property lines shown before a row collapses.
pub const DEFAULT_PROPERTY_PREVIEW: usize = 5;

/// Options controlling how a report is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Report title.
    pub title: String,
    /// Version string of the producing tool, if it should be shown.
    pub tool_version: Option<String>,
    /// Generation timestamp, if it should be shown.
    pub generated_at: Option<DateTime<Utc>>,
    /// Keep high-danger rows and their sections expanded.
    pub auto_expand_dangerous: bool,
    /// List sensitive property lines (their values stay masked).
    pub show_sensitive_properties: bool,
    /// Include no-op rows.
    pub show_unchanged: bool,
    /// Disable all collapsing.
    pub expand_all: bool,
    /// Rows shown before a section collapses.
    pub collapse_threshold: usize,
    /// Property lines shown before a row collapses.
    pub property_preview: usize,
    /// Maximum displayed value length; `0` disables truncation.
    pub max_value_length: usize,
    /// Emit ANSI colors in the table format.
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            tool_version: None,
            generated_at: None,
            auto_expand_dangerous: true,
            show_sensitive_properties: true,
            show_unchanged: false,
            expand_all: false,
            collapse_threshold: DEFAULT_COLLAPSE_THRESHOLD,
            property_preview: DEFAULT_PROPERTY_PREVIEW,
            max_value_length: DEFAULT_MAX_VALUE_LENGTH,
            color: false,
        }
    }
}

impl RenderOptions {
    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the tool version shown in the report header.
    #[must_use]
    pub fn with_tool_version(mut self, version: impl Into<String>) -> Self {
        self.tool_version = Some(version.into());
        self
    }

    /// Sets the generation timestamp.
    #[must_use]
    pub const fn with_generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }

    /// Sets whether dangerous rows stay expanded.
    #[must_use]
    pub const fn with_auto_expand_dangerous(mut self, enabled: bool) -> Self {
        self.auto_expand_dangerous = enabled;
        self
    }

    /// Sets whether sensitive property lines are listed.
    #[must_use]
    pub const fn with_show_sensitive_properties(mut self, enabled: bool) -> Self {
        self.show_sensitive_properties = enabled;
        self
    }

    /// Sets whether no-op rows are listed.
    #[must_use]
    pub const fn with_show_unchanged(mut self, enabled: bool) -> Self {
        self.show_unchanged = enabled;
        self
    }

    /// Disables all collapsing.
    #[must_use]
    pub const fn with_expand_all(mut self, enabled: bool) -> Self {
        self.expand_all = enabled;
        self
    }

    /// Sets the section collapse threshold.
    #[must_use]
    pub const fn with_collapse_threshold(mut self, threshold: usize) -> Self {
        self.collapse_threshold = threshold;
        self
    }

    /// Sets the property preview length.
    #[must_use]
    pub const fn with_property_preview(mut self, preview: usize) -> Self {
        self.property_preview = preview;
        self
    }

    /// Sets the maximum displayed value length.
    #[must_use]
    pub const fn with_max_value_length(mut self, length: usize) -> Self {
        self.max_value_length = length;
        self
    }

    /// Enables or disables ANSI colors.
    #[must_use]
    pub const fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}
