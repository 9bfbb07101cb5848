//! Plan ingestion.
//!
//! Converts the JSON plans emitted by `terraform show -json` and
//! `tofu show -json` into the canonical change model.

mod terraform;

pub use terraform::{ParsedPlan, SUPPORTED_FORMAT_MAJOR, TerraformPlanParser};
