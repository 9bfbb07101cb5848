//! CLI command definitions.
//!
//! This module defines all CLI commands and their arguments using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::analysis::DangerLevel;

/// planreport - Risk-annotated change reports for infrastructure plans.
#[derive(Parser, Debug)]
#[command(name = "planreport")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true, env = "PLANREPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log line format on stderr.
    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = LogFormat::Text,
        env = "PLANREPORT_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Encoding of diagnostic log lines.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a report from a `terraform show -json` plan.
    Render(RenderArgs),

    /// List the supported report formats.
    Formats,

    /// Validate the report configuration.
    Validate {
        /// Show all warnings, not just errors.
        #[arg(short, long)]
        warnings: bool,
    },

    /// Write a default configuration file.
    Init {
        /// Directory to initialize (defaults to current directory).
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Force overwrite existing files.
        #[arg(short, long)]
        force: bool,
    },
}

/// Arguments of the `render` command.
#[derive(clap::Args, Debug, Clone)]
pub struct RenderArgs {
    /// Plan JSON file produced by `terraform show -json` or `tofu show -json`.
    pub plan: PathBuf,

    /// Report format (table, json, html, markdown, csv).
    #[arg(short, long)]
    pub format: Option<String>,

    /// Write the report to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Report title.
    #[arg(long)]
    pub title: Option<String>,

    /// Expand every section and row.
    #[arg(long)]
    pub expand: bool,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    /// Include unchanged resources and outputs.
    #[arg(long)]
    pub show_unchanged: bool,

    /// Omit sensitive property lines (their values are masked either way).
    #[arg(long)]
    pub hide_sensitive: bool,

    /// Add a generation timestamp to the report header.
    #[arg(long)]
    pub timestamp: bool,

    /// Exit with status 2 if any change is at or above this danger level.
    #[arg(long, value_name = "LEVEL")]
    pub fail_on: Option<DangerLevel>,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render() {
        let cli = Cli::try_parse_from([
            "planreport",
            "render",
            "plan.json",
            "--format",
            "html",
            "--output",
            "report.html",
            "--fail-on",
            "high",
            "--expand",
        ])
        .unwrap();

        let Commands::Render(args) = cli.command else {
            panic!("expected render command");
        };
        assert_eq!(args.plan, PathBuf::from("plan.json"));
        assert_eq!(args.format.as_deref(), Some("html"));
        assert_eq!(args.output, Some(PathBuf::from("report.html")));
        assert_eq!(args.fail_on, Some(DangerLevel::High));
        assert!(args.expand);
        assert!(!args.no_color);
    }

    #[test]
    fn test_unknown_format_name_is_accepted_by_parser() {
        let cli = Cli::try_parse_from(["planreport", "render", "plan.json", "-f", "xml"]).unwrap();
        let Commands::Render(args) = cli.command else {
            panic!("expected render command");
        };
        assert_eq!(args.format.as_deref(), Some("xml"));
    }

    #[test]
    fn test_invalid_fail_on_level() {
        assert!(Cli::try_parse_from(["planreport", "render", "plan.json", "--fail-on", "severe"]).is_err());
    }

    #[test]
    fn test_log_format() {
        let cli = Cli::try_parse_from(["planreport", "formats"]).unwrap();
        assert_eq!(cli.log_format, LogFormat::Text);

        let cli = Cli::try_parse_from(["planreport", "formats", "--log-format", "json"]).unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);

        assert!(Cli::try_parse_from(["planreport", "formats", "--log-format", "xml"]).is_err());
    }

    #[test]
    fn test_parse_init() {
        let cli = Cli::try_parse_from(["planreport", "init", "--force"]).unwrap();
        match cli.command {
            Commands::Init { path, force } => {
                assert_eq!(path, PathBuf::from("."));
                assert!(force);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
