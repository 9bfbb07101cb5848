//! Format-agnostic analysis of a plan.
//!
//! This module classifies risk, formats values, aggregates statistics and
//! orders changes. Nothing in here knows about output formats.

mod properties;
mod risk;
mod sort;
mod stats;
mod summary;
mod value;

pub use properties::{PropertyChange, property_changes};
pub use risk::{DEFAULT_STATEFUL_TYPES, DangerLevel, RiskAssessment, RiskClassifier};
pub use sort::{ChangeSorter, SortableChange};
pub use stats::{Statistics, StatisticsAggregator};
pub use summary::PlanSummary;
pub use value::{
    ABSENT_PLACEHOLDER, DEFAULT_MAX_VALUE_LENGTH, SENSITIVE_PLACEHOLDER, UNKNOWN_PLACEHOLDER,
    ValueFormatter,
};
