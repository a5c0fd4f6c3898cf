//! Bound value classification
//!
//! Every value handed to the reconciler is classified into one of a closed set
//! of shapes before any patcher looks at it. Patchers match on [`Shape`]
//! exhaustively, so a new shape cannot silently fall through.

use crate::types::{BindError, KeyedMap, Result};
use serde_json::Value;

/// The shape of a bound value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape<'a> {
    /// A string (for `class`: whitespace-separated tokens)
    Text(&'a str),
    /// A sequence whose entries are all strings
    List(&'a [Value]),
    /// An object: a flag-map for `class`, a keyed map for `style` and multi bindings
    Map(&'a KeyedMap),
    /// A number or boolean
    Plain(&'a Value),
}

impl<'a> Shape<'a> {
    /// Short description used in diagnostics
    pub fn describe(&self) -> &'static str {
        match self {
            Shape::Text(_) => "string",
            Shape::List(_) => "sequence of strings",
            Shape::Map(_) => "object",
            Shape::Plain(_) => "plain value",
        }
    }

    /// The map behind a `Map` shape
    pub fn as_map(&self) -> Option<&'a KeyedMap> {
        match self {
            Shape::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Iterate the strings of a `List` shape
    ///
    /// Classification guarantees every entry is a string; other shapes yield nothing.
    pub fn list_entries(&self) -> impl Iterator<Item = &'a str> {
        let entries: &'a [Value] = match self {
            Shape::List(entries) => entries,
            _ => &[],
        };
        entries.iter().filter_map(Value::as_str)
    }
}

/// Classify a bound value
///
/// `key` only names the binding in the returned error. Null and sequences with
/// non-string entries have no shape.
pub fn classify<'a>(key: &str, value: &'a Value) -> Result<Shape<'a>> {
    match value {
        Value::String(s) => Ok(Shape::Text(s)),
        Value::Array(entries) if entries.iter().all(Value::is_string) => Ok(Shape::List(entries)),
        Value::Object(map) => Ok(Shape::Map(map)),
        Value::Number(_) | Value::Bool(_) => Ok(Shape::Plain(value)),
        Value::Array(_) | Value::Null => Err(BindError::UnsupportedShape {
            key: key.to_string(),
            expected: "a string, a sequence of strings, an object or a plain value",
        }),
    }
}
