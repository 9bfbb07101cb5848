//! Reader for `terraform show -json` / `tofu show -json` plan documents.

use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::analysis::{PlanSummary, RiskClassifier};
use crate::error::{IngestError, PlanReportError, Result};
use crate::model::{Action, AttributePath, OutputChange, ResourceChange};

/// Plan schema major version this reader understands.
pub const SUPPORTED_FORMAT_MAJOR: &str = "1";

#[derive(Debug, Deserialize)]
struct RawPlan {
    #[serde(default)]
    format_version: Option<String>,
    #[serde(default)]
    terraform_version: Option<String>,
    #[serde(default)]
    resource_changes: Vec<RawResourceChange>,
    #[serde(default)]
    output_changes: BTreeMap<String, RawChange>,
}

#[derive(Debug, Deserialize)]
struct RawResourceChange {
    address: String,
    #[serde(default)]
    module_address: Option<String>,
    #[serde(default)]
    mode: Option<String>,
    #[serde(rename = "type", default)]
    resource_type: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    provider_name: Option<String>,
    change: RawChange,
}

#[derive(Debug, Deserialize)]
struct RawChange {
    #[serde(default)]
    actions: Vec<String>,
    #[serde(default)]
    before: Option<Value>,
    #[serde(default)]
    after: Option<Value>,
    #[serde(default)]
    after_unknown: Option<Value>,
    #[serde(default)]
    before_sensitive: Option<Value>,
    #[serde(default)]
    after_sensitive: Option<Value>,
    #[serde(default)]
    replace_paths: Vec<Vec<Value>>,
}

/// Changes read from a plan document.
#[derive(Debug, Clone, Default)]
pub struct ParsedPlan {
    /// Plan schema version, if declared.
    pub format_version: Option<String>,
    /// Version of the tool that produced the plan.
    pub terraform_version: Option<String>,
    /// Managed resource changes.
    pub resources: Vec<ResourceChange>,
    /// Output changes.
    pub outputs: Vec<OutputChange>,
}

impl ParsedPlan {
    /// Builds the report summary of this plan.
    #[must_use]
    pub fn into_summary(self, classifier: &RiskClassifier) -> PlanSummary {
        PlanSummary::new(self.resources, self.outputs, classifier)
    }
}

/// Parser for Terraform/OpenTofu JSON plans.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerraformPlanParser;

impl TerraformPlanParser {
    /// Creates a new parser.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Loads a plan from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable or not a valid plan.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<ParsedPlan> {
        let path = path.as_ref();
        info!("Loading plan from: {}", path.display());

        if !path.exists() {
            return Err(PlanReportError::Ingest(IngestError::FileNotFound {
                path: path.to_path_buf(),
            }));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            PlanReportError::Ingest(IngestError::Parse {
                message: format!("Failed to read file: {e}"),
                location: Some(path.display().to_string()),
            })
        })?;

        self.parse_str(&content, Some(path))
    }

    /// Parses a plan from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid, the schema version is not
    /// supported, or a change entry is malformed.
    pub fn parse_str(&self, content: &str, source: Option<&Path>) -> Result<ParsedPlan> {
        debug!("Parsing JSON plan");

        let raw: RawPlan = serde_json::from_str(content).map_err(|e| {
            PlanReportError::Ingest(IngestError::Parse {
                message: format!("JSON parse error: {e}"),
                location: source.map(|p| p.display().to_string()),
            })
        })?;

        if let Some(version) = &raw.format_version {
            let major = version.split('.').next().unwrap_or_default();
            if major != SUPPORTED_FORMAT_MAJOR {
                return Err(PlanReportError::Ingest(IngestError::UnsupportedVersion {
                    found: version.clone(),
                }));
            }
        }

        let mut resources = Vec::with_capacity(raw.resource_changes.len());
        for entry in raw.resource_changes {
            if entry.mode.as_deref() == Some("data") {
                debug!("Skipping data source {}", entry.address);
                continue;
            }
            resources.push(Self::resource(entry)?);
        }

        let mut outputs = Vec::with_capacity(raw.output_changes.len());
        for (name, entry) in raw.output_changes {
            outputs.push(Self::output(&name, entry)?);
        }

        debug!(
            "Parsed plan: {} resource change(s), {} output change(s)",
            resources.len(),
            outputs.len()
        );

        Ok(ParsedPlan {
            format_version: raw.format_version,
            terraform_version: raw.terraform_version,
            resources,
            outputs,
        })
    }

    fn resource(entry: RawResourceChange) -> Result<ResourceChange> {
        let action = map_actions(&entry.address, &entry.change.actions)?;
        let change = entry.change;

        let mut resource = ResourceChange::new(&entry.address, action);
        if let Some(resource_type) = entry.resource_type {
            resource = resource.with_type(resource_type);
        }
        if let Some(name) = entry.name {
            resource.name = name;
        }
        if let Some(provider) = entry.provider_name {
            resource = resource.with_provider(provider);
        }
        if let Some(module) = entry.module_address {
            resource = resource.with_module(module);
        }
        if let Some(before) = change.before {
            resource = resource.with_before(before);
        }
        if let Some(after) = change.after {
            resource = resource.with_after(after);
        }

        match &change.after_unknown {
            Some(Value::Bool(true)) => resource = resource.with_after_unknown(true),
            Some(markers) => resource.unknown_attributes = marker_paths(markers),
            None => {}
        }

        for markers in [&change.before_sensitive, &change.after_sensitive]
            .into_iter()
            .flatten()
        {
            resource.sensitive_attributes.extend(marker_paths(markers));
        }

        for steps in &change.replace_paths {
            resource.replace_paths.insert(path_from_steps(steps));
        }

        Ok(resource)
    }

    fn output(name: &str, change: RawChange) -> Result<OutputChange> {
        let action = map_actions(name, &change.actions)?;
        let sensitive = [&change.before_sensitive, &change.after_sensitive]
            .into_iter()
            .flatten()
            .any(|marker| marker.as_bool() == Some(true));
        let unknown = matches!(change.after_unknown, Some(Value::Bool(true)));

        let mut output = OutputChange::new(name, action)
            .with_sensitive(sensitive)
            .with_after_unknown(unknown);
        if let Some(before) = change.before {
            output = output.with_before(before);
        }
        if let Some(after) = change.after {
            output = output.with_after(after);
        }
        Ok(output)
    }
}

/// Maps a plan action list to a single [`Action`].
fn map_actions(address: &str, actions: &[String]) -> Result<Action> {
    if actions.is_empty() {
        return Err(PlanReportError::Ingest(IngestError::invalid_change(
            address,
            "change has no actions",
        )));
    }

    let has = |name: &str| actions.iter().any(|a| a == name);
    let action = if has("delete") && has("create") {
        Action::Replace
    } else if has("delete") {
        Action::Delete
    } else if has("create") {
        Action::Create
    } else if has("update") {
        Action::Update
    } else if has("no-op") || has("read") {
        Action::NoOp
    } else {
        warn!("Unrecognized actions {:?} for {}; treating as no-op", actions, address);
        Action::NoOp
    };
    Ok(action)
}

/// Flattens a nested boolean marker tree into the paths marked `true`.
fn marker_paths(markers: &Value) -> BTreeSet<AttributePath> {
    let mut paths = BTreeSet::new();
    collect_markers(markers, &AttributePath::root(), &mut paths);
    paths
}

fn collect_markers(value: &Value, path: &AttributePath, out: &mut BTreeSet<AttributePath>) {
    match value {
        Value::Bool(true) => {
            out.insert(path.clone());
        }
        Value::Object(map) => {
            for (key, child) in map {
                collect_markers(child, &path.child(key), out);
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                collect_markers(child, &path.index(i), out);
            }
        }
        _ => {}
    }
}

/// Builds a path from `replace_paths` steps (keys and list indexes).
fn path_from_steps(steps: &[Value]) -> AttributePath {
    steps.iter().fold(AttributePath::root(), |path, step| match step {
        Value::String(key) => path.child(key),
        Value::Number(n) => n
            .as_u64()
            .and_then(|i| usize::try_from(i).ok())
            .map_or_else(|| path.child(&n.to_string()), |i| path.index(i)),
        other => path.child(&other.to_string()),
    })
}
