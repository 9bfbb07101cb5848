//! planreport CLI entrypoint.
//!
//! This is the main entrypoint for the planreport command-line tool.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use planreport::cli::{Cli, Commands, LogFormat, OutputFormatter, RenderArgs, write_artifact};
use planreport::config::{
    ConfigParser, ConfigValidator, DEFAULT_CONFIG_FILES, DEFAULT_CONFIG_TEMPLATE, ReportConfig,
    find_config_file,
};
use planreport::error::Result;
use planreport::ingest::TerraformPlanParser;
use planreport::report::{ReportFormat, ReportRenderer};

use chrono::Utc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Exit status when the plan trips the `--fail-on` gate.
const GATE_EXIT_CODE: u8 = 2;

/// Main entrypoint.
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    init_logging(cli.verbose, cli.log_format);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system.
fn init_logging(verbose: bool, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// Dispatches the parsed command.
fn run(cli: Cli) -> Result<ExitCode> {
    let formatter = OutputFormatter::new();

    match cli.command {
        Commands::Render(args) => cmd_render(cli.config.as_ref(), &args, &formatter),
        Commands::Formats => {
            write_artifact(&formatter.format_formats(), None)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Validate { warnings } => cmd_validate(cli.config.as_ref(), warnings, &formatter),
        Commands::Init { path, force } => cmd_init(&path, force),
    }
}

/// Render a report from a plan file.
fn cmd_render(
    config_path: Option<&PathBuf>,
    args: &RenderArgs,
    formatter: &OutputFormatter,
) -> Result<ExitCode> {
    let config = load_config(config_path)?;
    ConfigValidator::new().validate(&config)?;

    // Resolve the format before touching the plan or the output file.
    let format: ReportFormat = match args.format.as_deref() {
        Some(name) => name.parse()?,
        None => config.default_format()?,
    };
    debug!("Selected report format: {format}");

    if args.no_color {
        colored::control::set_override(false);
    }

    let classifier = config.classifier();
    let summary = TerraformPlanParser::new()
        .load_file(&args.plan)?
        .into_summary(&classifier);

    let color = config.report.color
        && !args.no_color
        && args.output.is_none()
        && std::io::stdout().is_terminal();

    let mut options = config
        .render_options()
        .with_tool_version(env!("CARGO_PKG_VERSION"))
        .with_expand_all(args.expand)
        .with_color(color);
    if let Some(title) = &args.title {
        options = options.with_title(title.clone());
    }
    if args.show_unchanged {
        options = options.with_show_unchanged(true);
    }
    if args.hide_sensitive {
        options = options.with_show_sensitive_properties(false);
    }
    if args.timestamp {
        options = options.with_generated_at(Utc::now());
    }

    let report = ReportRenderer::new().render(&summary, format, &options);
    write_artifact(&report, args.output.as_deref())?;

    let max_danger = summary.max_danger();
    if let Some(path) = &args.output {
        eprint!(
            "{}",
            formatter.format_written(&summary, max_danger, format, path)
        );
    }

    match args.fail_on {
        Some(threshold) if summary.statistics().total > 0 && max_danger >= threshold => {
            eprint!("{}", formatter.format_gate_failure(max_danger, threshold));
            Ok(ExitCode::from(GATE_EXIT_CODE))
        }
        _ => Ok(ExitCode::SUCCESS),
    }
}

/// Validate configuration.
fn cmd_validate(
    config_path: Option<&PathBuf>,
    show_warnings: bool,
    formatter: &OutputFormatter,
) -> Result<ExitCode> {
    let config = load_config(config_path)?;
    let result = ConfigValidator::new().check(&config);

    eprint!("{}", formatter.format_validation(&result, show_warnings));

    if !result.errors.is_empty() {
        return Ok(ExitCode::FAILURE);
    }

    eprintln!("\nConfiguration summary:");
    eprintln!("  Title: {}", config.report.title);
    eprintln!("  Default format: {}", config.report.format);
    eprintln!("  Collapse threshold: {}", config.report.collapse_threshold);
    eprintln!(
        "  Extra stateful types: {}",
        config.risk.stateful_types.len()
    );

    Ok(ExitCode::SUCCESS)
}

/// Write a default configuration file.
fn cmd_init(path: &Path, force: bool) -> Result<ExitCode> {
    info!("Initializing planreport configuration in: {}", path.display());

    let config_path = path.join(DEFAULT_CONFIG_FILES[0]);

    if !force && config_path.exists() {
        eprintln!("Configuration file already exists: {}", config_path.display());
        eprintln!("Use --force to overwrite.");
        return Ok(ExitCode::SUCCESS);
    }

    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }

    std::fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE)?;
    eprintln!("Created: {}", config_path.display());

    eprintln!("\nNext steps:");
    eprintln!("  1. Edit {} to taste", DEFAULT_CONFIG_FILES[0]);
    eprintln!("  2. Run 'planreport validate' to check it");
    eprintln!("  3. Run 'terraform show -json plan.out > plan.json'");
    eprintln!("  4. Run 'planreport render plan.json --format html -o report.html'");

    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Loads the configuration: the explicit file, else the nearest discovered
/// file, else defaults. Environment overrides always apply.
fn load_config(config_path: Option<&PathBuf>) -> Result<ReportConfig> {
    let config_file = match config_path {
        Some(path) => Some(path.clone()),
        None => find_config_file(".").ok(),
    };

    let mut config = match &config_file {
        Some(file) => {
            let parser = ConfigParser::new()
                .with_base_path(file.parent().unwrap_or_else(|| Path::new(".")));
            parser.load_dotenv()?;
            parser.load_file(file)?
        }
        None => {
            debug!("No configuration file found, using defaults");
            ConfigParser::new().load_dotenv()?;
            ReportConfig::default()
        }
    };

    ConfigParser::apply_env_overrides(&mut config)?;
    Ok(config)
}
