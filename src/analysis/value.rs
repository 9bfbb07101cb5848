//! Display formatting for individual before/after values.
//!
//! Every value that reaches a report goes through [`ValueFormatter`], which
//! is where masking and "known after apply" markers are applied. Renderers
//! only escape the resulting strings for their target encoding.

use serde_json::Value;

/// Placeholder shown instead of any sensitive value.
pub const SENSITIVE_PLACEHOLDER: &str = "(sensitive value)";

/// Placeholder shown for values that are unknown until apply.
pub const UNKNOWN_PLACEHOLDER: &str = "(known after apply)";

/// Placeholder shown when a value is absent (e.g. `before` of a create).
pub const ABSENT_PLACEHOLDER: &str = "-";

/// Default maximum display length, in characters.
pub const DEFAULT_MAX_VALUE_LENGTH: usize = 80;

/// Suffix appended to truncated values.
const ELLIPSIS: &str = "...";

/// Formatter turning plan values into display strings.
///
/// Length policy: a serialized value longer than `max_length` characters is
/// cut to `max_length - 3` characters followed by `...`. Limits of three or
/// less leave no room for the ellipsis, so the value is cut to exactly
/// `max_length` characters instead. A `max_length` of zero disables
/// truncation. Placeholders are never truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueFormatter {
    /// Maximum display length in characters; zero means unlimited.
    max_length: usize,
}

impl Default for ValueFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_VALUE_LENGTH)
    }
}

impl ValueFormatter {
    /// Creates a formatter with the given length limit.
    #[must_use]
    pub const fn new(max_length: usize) -> Self {
        Self { max_length }
    }

    /// Creates a formatter that never truncates.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self { max_length: 0 }
    }

    /// Returns the configured length limit.
    #[must_use]
    pub const fn max_length(&self) -> usize {
        self.max_length
    }

    /// Formats a single value.
    ///
    /// Sensitivity wins over everything else, then unknown-until-apply,
    /// then the serialized value itself.
    #[must_use]
    pub fn format(&self, value: Option<&Value>, is_sensitive: bool, is_unknown: bool) -> String {
        if is_sensitive {
            return SENSITIVE_PLACEHOLDER.to_string();
        }
        if is_unknown {
            return UNKNOWN_PLACEHOLDER.to_string();
        }
        match value {
            None => ABSENT_PLACEHOLDER.to_string(),
            Some(v) => self.truncate(&Self::serialize(v)),
        }
    }

    /// Serializes a value: strings verbatim, scalars via `Display`,
    /// collections as compact JSON.
    fn serialize(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            Value::Null => String::from("null"),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Array(_) | Value::Object(_) => {
                serde_json::to_string(value).unwrap_or_else(|_| value.to_string())
            }
        }
    }

    /// Applies the length policy on a character boundary.
    fn truncate(&self, s: &str) -> String {
        if self.max_length == 0 || s.chars().count() <= self.max_length {
            return s.to_string();
        }
        if self.max_length <= ELLIPSIS.len() {
            return s.chars().take(self.max_length).collect();
        }
        let keep = self.max_length - ELLIPSIS.len();
        let mut out: String = s.chars().take(keep).collect();
        out.push_str(ELLIPSIS);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sensitive_always_masked() {
        let formatter = ValueFormatter::default();
        for value in [
            Some(json!("secret123")),
            Some(json!({"nested": ["a", {"b": 1}]})),
            Some(json!("")),
            Some(Value::Null),
            None,
        ] {
            assert_eq!(formatter.format(value.as_ref(), true, false), SENSITIVE_PLACEHOLDER);
            assert_eq!(formatter.format(value.as_ref(), true, true), SENSITIVE_PLACEHOLDER);
        }
    }

    #[test]
    fn test_unknown_marker() {
        let formatter = ValueFormatter::default();
        assert_eq!(formatter.format(None, false, true), UNKNOWN_PLACEHOLDER);
        assert_eq!(formatter.format(Some(&json!("x")), false, true), UNKNOWN_PLACEHOLDER);
    }

    #[test]
    fn test_scalar_serialization() {
        let formatter = ValueFormatter::default();
        assert_eq!(formatter.format(Some(&json!("t3.micro")), false, false), "t3.micro");
        assert_eq!(formatter.format(Some(&json!(42)), false, false), "42");
        assert_eq!(formatter.format(Some(&json!(true)), false, false), "true");
        assert_eq!(formatter.format(Some(&Value::Null), false, false), "null");
        assert_eq!(formatter.format(None, false, false), ABSENT_PLACEHOLDER);
    }

    #[test]
    fn test_collection_serialization() {
        let formatter = ValueFormatter::default();
        assert_eq!(
            formatter.format(Some(&json!(["a", "b"])), false, false),
            r#"["a","b"]"#
        );
        assert_eq!(
            formatter.format(Some(&json!({"Name": "web"})), false, false),
            r#"{"Name":"web"}"#
        );
    }

    #[test]
    fn test_truncation_policy() {
        let formatter = ValueFormatter::new(10);
        assert_eq!(formatter.format(Some(&json!("abcdefghij")), false, false), "abcdefghij");
        assert_eq!(formatter.format(Some(&json!("abcdefghijk")), false, false), "abcdefg...");
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let formatter = ValueFormatter::new(5);
        assert_eq!(formatter.format(Some(&json!("ééééééé")), false, false), "éé...");
    }

    #[test]
    fn test_tiny_limits_never_exceed_limit() {
        for limit in 1..=3 {
            let formatter = ValueFormatter::new(limit);
            let out = formatter.format(Some(&json!("abcdefgh")), false, false);
            assert_eq!(out, "abcdefgh"[..limit]);
        }
        assert_eq!(ValueFormatter::new(4).format(Some(&json!("abcdefgh")), false, false), "a...");
    }

    #[test]
    fn test_unlimited_never_truncates() {
        let formatter = ValueFormatter::unlimited();
        let long = "x".repeat(500);
        assert_eq!(formatter.format(Some(&json!(long.clone())), false, false), long);
    }
}
