//! Canonical change types handed over by the ingestion layer.
//!
//! These types are plain data: nothing here classifies, sorts or renders.
//! Derived information such as danger levels is computed on demand by the
//! [`analysis`](crate::analysis) module and never stored on a change.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// The kind of mutation a plan proposes for a resource or output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    /// Resource will be created.
    Create,
    /// Resource will be updated in place.
    Update,
    /// Resource will be destroyed.
    Delete,
    /// Resource will be destroyed and recreated.
    Replace,
    /// Nothing changes.
    NoOp,
}

impl Action {
    /// Every action, in display priority order (most impactful first).
    pub const ALL: [Self; 5] = [
        Self::Delete,
        Self::Replace,
        Self::Update,
        Self::Create,
        Self::NoOp,
    ];

    /// Sort priority: lower values are more impactful and listed first.
    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            Self::Delete => 0,
            Self::Replace => 1,
            Self::Update => 2,
            Self::Create => 3,
            Self::NoOp => 4,
        }
    }

    /// Short symbol used by terminal renderers.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Create => "+",
            Self::Update => "~",
            Self::Delete => "-",
            Self::Replace => "-/+",
            Self::NoOp => " ",
        }
    }

    /// Lowercase label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Replace => "replace",
            Self::NoOp => "no-op",
        }
    }

    /// Returns true if the action changes anything.
    #[must_use]
    pub const fn is_change(self) -> bool {
        !matches!(self, Self::NoOp)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A dotted path to an attribute inside a resource value.
///
/// Object keys are joined with `.`, list indices are written as `[n]`,
/// e.g. `ingress[0].cidr_blocks`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributePath(String);

impl AttributePath {
    /// Creates a path from its textual form.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The root path (empty string), meaning "the whole value".
    #[must_use]
    pub const fn root() -> Self {
        Self(String::new())
    }

    /// Returns the textual form of the path.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this is the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends an object key.
    #[must_use]
    pub fn child(&self, key: &str) -> Self {
        if self.0.is_empty() {
            Self(key.to_string())
        } else {
            Self(format!("{}.{key}", self.0))
        }
    }

    /// Appends a list index.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{index}]", self.0))
    }

    /// Returns true if `self` equals `other` or is one of its ancestors.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        if self.is_root() || self.0 == other.0 {
            return true;
        }
        other
            .0
            .strip_prefix(self.0.as_str())
            .is_some_and(|rest| rest.starts_with('.') || rest.starts_with('['))
    }

    /// Returns true if either path contains the other.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.contains(other) || other.contains(self)
    }
}

impl std::fmt::Display for AttributePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AttributePath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// One planned mutation to an infrastructure resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceChange {
    /// Full resource address, unique within a plan.
    pub address: String,
    /// Resource type (e.g., `aws_db_instance`).
    pub resource_type: String,
    /// Resource name within its module.
    pub name: String,
    /// Provider name; may be empty.
    #[serde(default)]
    pub provider: String,
    /// Module address; empty for the root module.
    #[serde(default)]
    pub module: String,
    /// Planned action.
    pub action: Action,
    /// Value before the change, if the resource exists.
    #[serde(default)]
    pub before: Option<Value>,
    /// Value after the change, if the resource will exist.
    #[serde(default)]
    pub after: Option<Value>,
    /// True if the entire `after` value is unknown until apply.
    #[serde(default)]
    pub after_unknown: bool,
    /// Attributes whose planned values are unknown until apply.
    #[serde(default)]
    pub unknown_attributes: BTreeSet<AttributePath>,
    /// Attributes forcing replacement.
    #[serde(default)]
    pub replace_paths: BTreeSet<AttributePath>,
    /// Attributes whose values must be masked.
    #[serde(default)]
    pub sensitive_attributes: BTreeSet<AttributePath>,
}

impl ResourceChange {
    /// Creates a resource change with empty values.
    ///
    /// The resource type and name are derived from the address when it has
    /// the usual `[module.x.]type.name` shape.
    #[must_use]
    pub fn new(address: &str, action: Action) -> Self {
        let (module, resource_type, name) = Self::split_address(address);
        Self {
            address: address.to_string(),
            resource_type,
            name,
            provider: String::new(),
            module,
            action,
            before: None,
            after: None,
            after_unknown: false,
            unknown_attributes: BTreeSet::new(),
            replace_paths: BTreeSet::new(),
            sensitive_attributes: BTreeSet::new(),
        }
    }

    /// Sets the resource type.
    #[must_use]
    pub fn with_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = resource_type.into();
        self
    }

    /// Sets the provider name.
    #[must_use]
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    /// Sets the module address.
    #[must_use]
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = module.into();
        self
    }

    /// Sets the before value.
    #[must_use]
    pub fn with_before(mut self, value: Value) -> Self {
        self.before = Some(value);
        self
    }

    /// Sets the after value.
    #[must_use]
    pub fn with_after(mut self, value: Value) -> Self {
        self.after = Some(value);
        self
    }

    /// Marks the whole after value as unknown until apply.
    #[must_use]
    pub const fn with_after_unknown(mut self, unknown: bool) -> Self {
        self.after_unknown = unknown;
        self
    }

    /// Marks an attribute as unknown until apply.
    #[must_use]
    pub fn with_unknown(mut self, path: impl Into<AttributePath>) -> Self {
        self.unknown_attributes.insert(path.into());
        self
    }

    /// Adds an attribute that forces replacement.
    #[must_use]
    pub fn with_replace_path(mut self, path: impl Into<AttributePath>) -> Self {
        self.replace_paths.insert(path.into());
        self
    }

    /// Adds an attribute whose value must be masked.
    #[must_use]
    pub fn with_sensitive(mut self, path: impl Into<AttributePath>) -> Self {
        self.sensitive_attributes.insert(path.into());
        self
    }

    /// The action used for counting and ordering.
    ///
    /// An update that carries replacement paths is a replacement.
    #[must_use]
    pub fn effective_action(&self) -> Action {
        if self.action == Action::Update && !self.replace_paths.is_empty() {
            Action::Replace
        } else {
            self.action
        }
    }

    /// Returns true if the change destroys and recreates the resource.
    #[must_use]
    pub fn is_replacement(&self) -> bool {
        self.effective_action() == Action::Replace
    }

    /// Returns true if the attribute at `path` must be masked.
    #[must_use]
    pub fn is_sensitive(&self, path: &AttributePath) -> bool {
        self.sensitive_attributes.iter().any(|s| s.overlaps(path))
    }

    /// Returns true if the planned value at `path` is unknown until apply.
    #[must_use]
    pub fn is_unknown(&self, path: &AttributePath) -> bool {
        self.after_unknown || self.unknown_attributes.iter().any(|u| u.contains(path))
    }

    /// Returns true if `path` forces replacement.
    #[must_use]
    pub fn forces_replacement(&self, path: &AttributePath) -> bool {
        self.replace_paths.iter().any(|r| r.overlaps(path))
    }

    /// Splits an address into (module, type, name).
    fn split_address(address: &str) -> (String, String, String) {
        let parts: Vec<&str> = address.split('.').collect();

        // Skip module.<name> pairs to find the resource part
        let mut i = 0;
        while i + 1 < parts.len() && parts[i] == "module" {
            i += 2;
        }

        let module = if i > 0 { parts[..i].join(".") } else { String::new() };
        let resource_type = parts.get(i).map_or_else(String::new, |s| (*s).to_string());
        let name = if parts.len() > i + 1 {
            parts[i + 1..].join(".")
        } else {
            String::new()
        };

        (module, resource_type, name)
    }
}

/// One planned mutation to a named output value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputChange {
    /// Output name, unique within a plan.
    pub name: String,
    /// Planned action. Outputs are never replaced.
    pub action: Action,
    /// Whether the output is sensitive.
    #[serde(default)]
    pub sensitive: bool,
    /// Value before the change.
    #[serde(default)]
    pub before: Option<Value>,
    /// Value after the change.
    #[serde(default)]
    pub after: Option<Value>,
    /// True if the after value is unknown until apply.
    #[serde(default)]
    pub after_unknown: bool,
}

impl OutputChange {
    /// Creates an output change with empty values.
    ///
    /// A `Replace` action is recorded as `Update`.
    #[must_use]
    pub fn new(name: &str, action: Action) -> Self {
        let action = if action == Action::Replace {
            Action::Update
        } else {
            action
        };
        Self {
            name: name.to_string(),
            action,
            sensitive: false,
            before: None,
            after: None,
            after_unknown: false,
        }
    }

    /// Marks the output as sensitive.
    #[must_use]
    pub const fn with_sensitive(mut self, sensitive: bool) -> Self {
        self.sensitive = sensitive;
        self
    }

    /// Sets the before value.
    #[must_use]
    pub fn with_before(mut self, value: Value) -> Self {
        self.before = Some(value);
        self
    }

    /// Sets the after value.
    #[must_use]
    pub fn with_after(mut self, value: Value) -> Self {
        self.after = Some(value);
        self
    }

    /// Marks the after value as unknown until apply.
    #[must_use]
    pub const fn with_after_unknown(mut self, unknown: bool) -> Self {
        self.after_unknown = unknown;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_split_root_address() {
        let change = ResourceChange::new("aws_instance.web", Action::Create);
        assert_eq!(change.module, "");
        assert_eq!(change.resource_type, "aws_instance");
        assert_eq!(change.name, "web");
    }

    #[test]
    fn test_split_nested_module_address() {
        let change = ResourceChange::new("module.vpc.module.subnets.aws_subnet.private[0]", Action::Create);
        assert_eq!(change.module, "module.vpc.module.subnets");
        assert_eq!(change.resource_type, "aws_subnet");
        assert_eq!(change.name, "private[0]");
    }

    #[test]
    fn test_update_with_replace_paths_is_replacement() {
        let change = ResourceChange::new("aws_instance.web", Action::Update).with_replace_path("ami");
        assert_eq!(change.effective_action(), Action::Replace);
        assert!(change.is_replacement());

        let plain = ResourceChange::new("aws_instance.web", Action::Update);
        assert_eq!(plain.effective_action(), Action::Update);
    }

    #[test]
    fn test_path_containment() {
        let parent = AttributePath::new("tags");
        assert!(parent.contains(&AttributePath::new("tags.Name")));
        assert!(parent.contains(&AttributePath::new("tags")));
        assert!(!parent.contains(&AttributePath::new("tags_all")));
        assert!(AttributePath::new("ingress").contains(&AttributePath::new("ingress[0].cidr")));
        assert!(AttributePath::root().contains(&parent));
    }

    #[test]
    fn test_path_builders() {
        let path = AttributePath::root().child("ingress").index(0).child("cidr_blocks");
        assert_eq!(path.as_str(), "ingress[0].cidr_blocks");
    }

    #[test]
    fn test_sensitivity_covers_descendants() {
        let change = ResourceChange::new("aws_db_instance.main", Action::Update)
            .with_sensitive("password")
            .with_after(json!({"password": "x"}));
        assert!(change.is_sensitive(&AttributePath::new("password")));
        assert!(!change.is_sensitive(&AttributePath::new("username")));
    }

    #[test]
    fn test_output_never_replaced() {
        let output = OutputChange::new("endpoint", Action::Replace);
        assert_eq!(output.action, Action::Update);
    }

    #[test]
    fn test_action_priority_order() {
        let mut actions = vec![Action::Create, Action::NoOp, Action::Delete, Action::Update, Action::Replace];
        actions.sort_by_key(|a| a.priority());
        assert_eq!(actions, Action::ALL.to_vec());
    }
}
