//! Configuration module for the plan report tool.
//!
//! This module handles all configuration-related functionality:
//! - Parsing and deserializing `planreport.yaml`
//! - Environment variable overrides
//! - Validation of configuration values

mod parser;
mod spec;
mod validator;

pub use parser::{ConfigParser, DEFAULT_CONFIG_FILES, find_config_file, user_config_file};
pub use spec::{LowImpactLevel, ReportConfig, ReportSettings, RiskSettings};
pub use validator::{ConfigValidator, MIN_VALUE_LENGTH, ValidationError, ValidationResult};

/// Default configuration written by `planreport init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("../../templates/planreport.yaml");
