//! Configuration parser for loading report configuration.
//!
//! Configuration is read from a YAML file and then overridden by
//! `PLANREPORT_*` environment variables.

use crate::error::{ConfigError, PlanReportError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::spec::ReportConfig;

/// Default configuration file names to search for.
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    "planreport.yaml",
    "planreport.yml",
    ".planreport.yaml",
    ".planreport.yml",
];

/// Configuration parser for loading report configuration.
#[derive(Debug, Default)]
pub struct ConfigParser {
    /// Base path for resolving the `.env` file.
    base_path: Option<PathBuf>,
}

impl ConfigParser {
    /// Creates a new configuration parser.
    #[must_use]
    pub const fn new() -> Self {
        Self { base_path: None }
    }

    /// Sets the base path for resolving the `.env` file.
    #[must_use]
    pub fn with_base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<ReportConfig> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        if !path.exists() {
            return Err(PlanReportError::Config(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            }));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            PlanReportError::Config(ConfigError::ParseError {
                message: format!("Failed to read file: {e}"),
                location: Some(path.display().to_string()),
            })
        })?;

        self.parse_yaml(&content, Some(path))
    }

    /// Parses configuration from a YAML string.
    ///
    /// An empty document yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn parse_yaml(&self, content: &str, source: Option<&Path>) -> Result<ReportConfig> {
        debug!("Parsing YAML configuration");

        if content.trim().is_empty() {
            return Ok(ReportConfig::default());
        }

        let config: ReportConfig = serde_yaml::from_str(content).map_err(|e| {
            let location = source.map(|p| p.display().to_string());
            PlanReportError::Config(ConfigError::ParseError {
                message: format!("YAML parse error: {e}"),
                location,
            })
        })?;

        debug!("Parsed configuration with default format: {}", config.report.format);
        Ok(config)
    }

    /// Applies `PLANREPORT_*` overrides from the process environment
    /// (e.g. `PLANREPORT_FORMAT`).
    ///
    /// # Errors
    ///
    /// Returns an error if an override has an invalid value.
    pub fn apply_env_overrides(config: &mut ReportConfig) -> Result<()> {
        Self::apply_env_overrides_from(config, |name| std::env::var(name).ok())
    }

    /// Applies `PLANREPORT_*` overrides using `lookup` to read variables.
    ///
    /// # Errors
    ///
    /// Returns an error if an override has an invalid value.
    pub fn apply_env_overrides_from<F>(config: &mut ReportConfig, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(format) = lookup("PLANREPORT_FORMAT") {
            debug!("Overriding report.format from environment");
            config.report.format = format;
        }

        if let Some(title) = lookup("PLANREPORT_TITLE") {
            debug!("Overriding report.title from environment");
            config.report.title = title;
        }

        if let Some(value) = lookup("PLANREPORT_AUTO_EXPAND_DANGEROUS") {
            debug!("Overriding report.auto_expand_dangerous from environment");
            config.report.auto_expand_dangerous =
                parse_bool("PLANREPORT_AUTO_EXPAND_DANGEROUS", &value)?;
        }

        if let Some(value) = lookup("PLANREPORT_COLOR") {
            debug!("Overriding report.color from environment");
            config.report.color = parse_bool("PLANREPORT_COLOR", &value)?;
        }

        if let Some(value) = lookup("PLANREPORT_MAX_VALUE_LENGTH") {
            debug!("Overriding report.max_value_length from environment");
            config.report.max_value_length = value.trim().parse().map_err(|_| {
                PlanReportError::Config(ConfigError::validation(
                    format!("Expected a non-negative integer, got '{value}'"),
                    "PLANREPORT_MAX_VALUE_LENGTH",
                ))
            })?;
        }

        Ok(())
    }

    /// Loads the .env file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the .env file exists but cannot be loaded.
    pub fn load_dotenv(&self) -> Result<()> {
        let env_path = self
            .base_path
            .as_ref()
            .map_or_else(|| PathBuf::from(".env"), |p| p.join(".env"));

        if env_path.exists() {
            info!("Loading environment from: {}", env_path.display());
            dotenvy::from_path(&env_path).map_err(|e| {
                PlanReportError::Config(ConfigError::ParseError {
                    message: format!("Failed to load .env file: {e}"),
                    location: Some(env_path.display().to_string()),
                })
            })?;
        } else {
            debug!(".env file not found at: {}", env_path.display());
        }

        Ok(())
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(PlanReportError::Config(ConfigError::validation(
            format!("Expected a boolean, got '{value}'"),
            name,
        ))),
    }
}

/// Returns the per-user configuration file path, if a config directory exists.
#[must_use]
pub fn user_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("planreport").join("config.yaml"))
}

/// Finds the configuration file in `start_dir` or its parents, falling back
/// to the per-user configuration file.
///
/// # Errors
///
/// Returns an error if no configuration file is found.
pub fn find_config_file(start_dir: impl AsRef<Path>) -> Result<PathBuf> {
    let start = start_dir.as_ref();
    let mut current = start.to_path_buf();

    loop {
        for filename in DEFAULT_CONFIG_FILES {
            let config_path = current.join(filename);
            if config_path.exists() {
                info!("Found configuration file: {}", config_path.display());
                return Ok(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    if let Some(user) = user_config_file().filter(|p| p.exists()) {
        info!("Found user configuration file: {}", user.display());
        return Ok(user);
    }

    Err(PlanReportError::Config(ConfigError::FileNotFound {
        path: start.join(DEFAULT_CONFIG_FILES[0]),
    }))
}
