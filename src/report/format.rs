//! Supported report formats and their per-format traits.
//!
//! This is the single place where format-specific decisions live: header
//! casing and whether a format supports collapsible sections.

use serde::{Deserialize, Serialize};

use super::schema::HeaderCase;
use crate::error::RenderError;

/// Output encoding of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Interactive terminal table.
    #[default]
    Table,
    /// JSON document.
    Json,
    /// Standalone HTML page.
    Html,
    /// GitHub-flavored Markdown.
    Markdown,
    /// Comma-separated values.
    Csv,
}

impl ReportFormat {
    /// Every supported format.
    pub const ALL: [Self; 5] = [Self::Table, Self::Json, Self::Html, Self::Markdown, Self::Csv];

    /// Canonical name, as accepted on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Html => "html",
            Self::Markdown => "markdown",
            Self::Csv => "csv",
        }
    }

    /// Canonical names of every supported format.
    #[must_use]
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|f| f.name()).collect()
    }

    /// Conventional file extension.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Table => "txt",
            Self::Json => "json",
            Self::Html => "html",
            Self::Markdown => "md",
            Self::Csv => "csv",
        }
    }

    /// Header casing: uppercase for the interactive table, Title Case elsewhere.
    #[must_use]
    pub const fn header_case(self) -> HeaderCase {
        match self {
            Self::Table => HeaderCase::Upper,
            Self::Json | Self::Html | Self::Markdown | Self::Csv => HeaderCase::Title,
        }
    }

    /// Whether the format supports progressive disclosure.
    #[must_use]
    pub const fn supports_collapsing(self) -> bool {
        matches!(self, Self::Table | Self::Html | Self::Markdown)
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" | "interactive" | "text" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "html" | "htm" => Ok(Self::Html),
            "markdown" | "md" => Ok(Self::Markdown),
            "csv" => Ok(Self::Csv),
            _ => Err(RenderError::unsupported_format(s, &Self::names())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names_and_aliases() {
        assert_eq!("table".parse::<ReportFormat>().unwrap(), ReportFormat::Table);
        assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert_eq!("md".parse::<ReportFormat>().unwrap(), ReportFormat::Markdown);
        assert_eq!(" csv ".parse::<ReportFormat>().unwrap(), ReportFormat::Csv);
    }

    #[test]
    fn test_unknown_format_enumerates_valid_set() {
        let err = "xml".parse::<ReportFormat>().unwrap_err();
        let RenderError::UnsupportedFormat { requested, supported } = err;
        assert_eq!(requested, "xml");
        assert_eq!(supported, vec!["table", "json", "html", "markdown", "csv"]);
    }

    #[test]
    fn test_header_case_split() {
        assert_eq!(ReportFormat::Table.header_case(), HeaderCase::Upper);
        for format in [ReportFormat::Json, ReportFormat::Html, ReportFormat::Markdown, ReportFormat::Csv] {
            assert_eq!(format.header_case(), HeaderCase::Title);
        }
    }

    #[test]
    fn test_collapsing_support() {
        assert!(ReportFormat::Table.supports_collapsing());
        assert!(ReportFormat::Html.supports_collapsing());
        assert!(!ReportFormat::Json.supports_collapsing());
        assert!(!ReportFormat::Csv.supports_collapsing());
    }
}
