//! Canonical change model.
//!
//! This module defines the shape the ingestion layer hands to the analysis
//! and rendering engine: ordered resource changes and ordered output changes.

mod change;
mod hash;

pub use change::{Action, AttributePath, OutputChange, ResourceChange};
pub use hash::PlanHasher;
