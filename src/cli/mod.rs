//! CLI module for the plan report tool.
//!
//! This module provides the command-line interface for rendering
//! change reports from infrastructure plans.

mod commands;
mod output;

pub use commands::{Cli, Commands, LogFormat, RenderArgs};
pub use output::{OutputFormatter, write_artifact};
