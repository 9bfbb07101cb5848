// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(warnings)]                    // All warnings are treated as errors
#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::module_inception)]    // Module with same name as crate warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::too_many_arguments)]  // Limit function arguments
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # planreport
//!
//! Risk-annotated change reports for infrastructure plans.
//!
//! ## Overview
//!
//! planreport reads the JSON plan produced by `terraform show -json` (or
//! `tofu show -json`) and renders it as an interactive terminal table, a
//! JSON document, a standalone HTML page, GitHub-flavored Markdown or CSV.
//!
//! Every resource change is classified by danger level, so destructive
//! changes to data-bearing resources stand out regardless of the format.
//!
//! ## Architecture
//!
//! 1. **Ingest**: the plan file becomes ordered [`model::ResourceChange`]s
//!    and [`model::OutputChange`]s.
//! 2. **Analyze**: [`analysis::PlanSummary`] derives statistics and a
//!    fingerprint; [`analysis::RiskClassifier`] assigns danger levels.
//! 3. **Render**: [`report::ReportRenderer`] builds a format-neutral view
//!    from the section schemas and hands it to the reporter for the
//!    requested [`report::ReportFormat`].
//!
//! ## Modules
//!
//! - [`model`]: Canonical change model and plan fingerprint
//! - [`analysis`]: Value formatting, risk, statistics and ordering
//! - [`report`]: Schemas and the five output formats
//! - [`ingest`]: Terraform/OpenTofu plan ingestion
//! - [`config`]: Configuration parsing and validation
//! - [`cli`]: Command-line interface
//!
//! ## Example
//!
//! ```yaml
//! report:
//!   title: "Production changes"
//!   format: markdown
//!   collapse_threshold: 10
//! risk:
//!   stateful_types:
//!     - custom_volume
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod ingest;
pub mod model;
pub mod report;

// ============================================================================
// Re-exports
// ============================================================================

pub use analysis::{DangerLevel, PlanSummary, RiskClassifier, Statistics, ValueFormatter};
pub use cli::{Cli, Commands, OutputFormatter};
pub use config::{ConfigParser, ConfigValidator, ReportConfig};
pub use error::{PlanReportError, Result};
pub use ingest::TerraformPlanParser;
pub use model::{Action, OutputChange, ResourceChange};
pub use report::{RenderOptions, ReportFormat, ReportRenderer, Reporter, create_reporter};
