//! Core types for the attribute reconciler
//!
//! This module defines the error type shared by every reconciliation step and
//! the small helpers used to interpret bound values. Bound values themselves are
//! plain `serde_json::Value`s supplied by the surrounding framework.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Result type for reconciler operations
pub type Result<T> = std::result::Result<T, BindError>;

/// A keyed mapping (multi binding, style map, class flag-map)
///
/// Keys keep their insertion order, so iterating a map is deterministic.
pub type KeyedMap = Map<String, Value>;

/// Errors that can occur while reconciling a single key
///
/// None of these reach the framework that calls `Reconciler::update`; they are
/// turned into diagnostics and the offending key is skipped.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BindError {
    #[error("unsupported value shape for `{key}`: expected {expected}")]
    UnsupportedShape { key: String, expected: &'static str },

    #[error("v-bind for style must be a type of Object")]
    InvalidStyleValue,

    #[error("invalid value for style property `{0}`")]
    InvalidStyleProperty(String),

    #[error("invalid value for attribute `{0}`")]
    InvalidAttributeValue(String),

    #[error("v-bind without an argument must be bound to an Object")]
    InvalidMultiValue,

    #[error("invalid binding directive: {0}")]
    InvalidDescriptor(String),
}

/// The kind of attribute a key refers to
///
/// Dispatch is purely by key identity: `class` and `style` get their own
/// patchers, everything else is a plain attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeKind {
    Class,
    Style,
    Attribute(String),
}

impl AttributeKind {
    /// Classify a binding key
    pub fn of(key: &str) -> Self {
        match key {
            "class" => AttributeKind::Class,
            "style" => AttributeKind::Style,
            other => AttributeKind::Attribute(other.to_string()),
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeKind::Class => write!(f, "class"),
            AttributeKind::Style => write!(f, "style"),
            AttributeKind::Attribute(name) => write!(f, "{}", name),
        }
    }
}

/// Template-language truthiness of a bound value
///
/// `false`, `null`, `0`, `NaN` and the empty string are falsy; everything
/// else (including empty maps and sequences) is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render a scalar value the way it is written into the element
///
/// Returns `None` for values that have no attribute/style text form.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attribute_kind_of() {
        assert_eq!(AttributeKind::of("class"), AttributeKind::Class);
        assert_eq!(AttributeKind::of("style"), AttributeKind::Style);
        assert_eq!(AttributeKind::of("title"), AttributeKind::Attribute("title".into()));
        // Dispatch is case-sensitive, like attribute names in templates
        assert_eq!(AttributeKind::of("Class"), AttributeKind::Attribute("Class".into()));
    }

    #[test]
    fn test_truthiness() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("yes")));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!([])));

        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&Value::Null));
    }

    #[test]
    fn test_scalar_text() {
        assert_eq!(scalar_text(&json!("hi")), Some("hi".to_string()));
        assert_eq!(scalar_text(&json!(12)), Some("12".to_string()));
        assert_eq!(scalar_text(&json!(1.5)), Some("1.5".to_string()));
        assert_eq!(scalar_text(&json!(false)), Some("false".to_string()));
        assert_eq!(scalar_text(&Value::Null), None);
        assert_eq!(scalar_text(&json!({"a": 1})), None);
    }
}
