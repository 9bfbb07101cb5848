//! Attribute-level diff of a resource change.
//!
//! Values are flattened to their leaves (objects are walked, lists are
//! compared whole) and every leaf whose before and after differ, or whose
//! planned value is unknown, becomes a [`PropertyChange`].

use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

use crate::model::{Action, AttributePath, ResourceChange};

/// A single attribute that changes within a resource.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyChange {
    /// Attribute path; the root path stands for the whole resource value.
    pub path: AttributePath,
    /// Value before the change.
    pub before: Option<Value>,
    /// Value after the change.
    pub after: Option<Value>,
    /// Whether the attribute must be masked.
    pub sensitive: bool,
    /// Whether the planned value is unknown until apply.
    pub unknown: bool,
    /// Whether this attribute forces replacement.
    pub forces_replacement: bool,
}

/// Computes the attribute-level changes of a resource.
///
/// Deleted and unchanged resources have no property changes.
#[must_use]
pub fn property_changes(change: &ResourceChange) -> Vec<PropertyChange> {
    diff(change)
        .into_iter()
        .map(|(path, before, after)| PropertyChange {
            sensitive: change.is_sensitive(&path),
            unknown: change.is_unknown(&path),
            forces_replacement: change.forces_replacement(&path),
            before: before.cloned(),
            after: after.cloned(),
            path,
        })
        .collect()
}

type Diffed<'a> = (AttributePath, Option<&'a Value>, Option<&'a Value>);

fn diff(change: &ResourceChange) -> Vec<Diffed<'_>> {
    if matches!(change.action, Action::Delete | Action::NoOp) {
        return Vec::new();
    }

    if change.after_unknown {
        return vec![(AttributePath::root(), change.before.as_ref(), None)];
    }

    let before = Flattened::from_value(change.before.as_ref());
    let after = Flattened::from_value(change.after.as_ref());

    let mut candidates: BTreeSet<&AttributePath> = BTreeSet::new();
    candidates.extend(before.leaves.iter());
    candidates.extend(after.leaves.iter());
    candidates.extend(change.unknown_attributes.iter());

    let mut out = Vec::new();
    for path in candidates {
        // An unknown ancestor already represents this leaf
        let shadowed = change
            .unknown_attributes
            .iter()
            .any(|u| u != path && u.contains(path));
        if shadowed {
            continue;
        }

        let unknown = change.unknown_attributes.contains(path);
        let old = before.nodes.get(path).copied();
        let new = if unknown { None } else { after.nodes.get(path).copied() };

        if unknown || old != new {
            out.push((path.clone(), old, new));
        }
    }
    out
}

/// Every node of a value keyed by path, plus the set of non-null leaves.
struct Flattened<'a> {
    nodes: BTreeMap<AttributePath, &'a Value>,
    leaves: BTreeSet<AttributePath>,
}

impl<'a> Flattened<'a> {
    fn from_value(value: Option<&'a Value>) -> Self {
        let mut flat = Self {
            nodes: BTreeMap::new(),
            leaves: BTreeSet::new(),
        };
        if let Some(value) = value {
            flat.walk(AttributePath::root(), value);
        }
        flat
    }

    fn walk(&mut self, path: AttributePath, value: &'a Value) {
        match value {
            Value::Object(map) if !map.is_empty() => {
                for (key, child) in map {
                    self.walk(path.child(key), child);
                }
            }
            // An empty root object has no attributes at all
            Value::Object(_) if path.is_root() => {}
            Value::Null => {}
            _ => {
                self.leaves.insert(path.clone());
            }
        }
        self.nodes.insert(path, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_lists_only_changed_leaves() {
        let change = ResourceChange::new("aws_instance.web", Action::Update)
            .with_before(json!({"instance_type": "t2.micro", "ami": "ami-1", "tags": {"Name": "web"}}))
            .with_after(json!({"instance_type": "t3.micro", "ami": "ami-1", "tags": {"Name": "web"}}));

        let props = property_changes(&change);
        assert_eq!(props.len(), 1);
        assert_eq!(props[0].path.as_str(), "instance_type");
        assert_eq!(props[0].before, Some(json!("t2.micro")));
        assert_eq!(props[0].after, Some(json!("t3.micro")));
    }

    #[test]
    fn test_nested_keys_are_flattened() {
        let change = ResourceChange::new("aws_instance.web", Action::Update)
            .with_before(json!({"tags": {"Name": "web", "Env": "dev"}}))
            .with_after(json!({"tags": {"Name": "web", "Env": "prod"}}));

        let paths: Vec<AttributePath> = property_changes(&change).into_iter().map(|p| p.path).collect();
        assert_eq!(paths, vec![AttributePath::new("tags.Env")]);
    }

    #[test]
    fn test_lists_compared_whole() {
        let change = ResourceChange::new("aws_security_group.sg", Action::Update)
            .with_before(json!({"cidrs": ["10.0.0.0/8"]}))
            .with_after(json!({"cidrs": ["10.0.0.0/8", "192.168.0.0/16"]}));

        let props = property_changes(&change);
        assert_eq!(props.len(), 1);
        assert_eq!(props[0].path.as_str(), "cidrs");
    }

    #[test]
    fn test_create_lists_non_null_attributes_and_unknowns() {
        let change = ResourceChange::new("aws_instance.web", Action::Create)
            .with_after(json!({"ami": "ami-1", "user_data": null}))
            .with_unknown("id");

        let props = property_changes(&change);
        let paths: Vec<&str> = props.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(paths, vec!["ami", "id"]);
        assert!(props[1].unknown);
        assert_eq!(props[1].after, None);
    }

    #[test]
    fn test_unknown_ancestor_shadows_leaves() {
        let change = ResourceChange::new("aws_instance.web", Action::Update)
            .with_before(json!({"tags": {"Name": "web"}}))
            .with_after(json!({}))
            .with_unknown("tags");

        let props = property_changes(&change);
        assert_eq!(props.len(), 1);
        assert_eq!(props[0].path.as_str(), "tags");
        assert_eq!(props[0].before, Some(json!({"Name": "web"})));
        assert!(props[0].unknown);
    }

    #[test]
    fn test_delete_has_no_property_changes() {
        let change = ResourceChange::new("aws_instance.web", Action::Delete)
            .with_before(json!({"ami": "ami-1"}));
        assert!(property_changes(&change).is_empty());
    }

    #[test]
    fn test_flags_are_attached() {
        let change = ResourceChange::new("aws_db_instance.main", Action::Replace)
            .with_before(json!({"engine": "postgres", "password": "a"}))
            .with_after(json!({"engine": "mysql", "password": "b"}))
            .with_replace_path("engine")
            .with_sensitive("password");

        let props = property_changes(&change);
        assert_eq!(props.len(), 2);
        assert!(props[0].forces_replacement);
        assert!(!props[0].sensitive);
        assert!(props[1].sensitive);
        assert!(!props[1].forces_replacement);
    }
}
