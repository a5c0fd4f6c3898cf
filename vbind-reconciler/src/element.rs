//! Element abstraction
//!
//! The reconciler never talks to a concrete DOM. It writes through the
//! [`Element`] trait, which mirrors the handful of primitives a binding needs.
//! [`MemoryElement`] is an in-memory implementation that also keeps a journal
//! of every write, which is what the tests and the replay CLI inspect.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Write primitives of a binding target
///
/// Every write is idempotent: adding a class that is present or removing an
/// absent attribute leaves the element unchanged.
pub trait Element {
    /// Set an attribute, overwriting any previous value
    fn set_attribute(&mut self, name: &str, value: &str);

    /// Remove an attribute
    fn remove_attribute(&mut self, name: &str);

    /// Add a class token
    fn add_class(&mut self, token: &str);

    /// Remove a class token
    fn remove_class(&mut self, token: &str);

    /// Currently applied inline style value, if any
    fn style_property(&self, property: &str) -> Option<String>;

    /// Write an inline style property; an empty value clears it
    fn set_style_property(&mut self, property: &str, value: &str);
}

impl<E: Element + ?Sized> Element for &mut E {
    fn set_attribute(&mut self, name: &str, value: &str) {
        (**self).set_attribute(name, value)
    }

    fn remove_attribute(&mut self, name: &str) {
        (**self).remove_attribute(name)
    }

    fn add_class(&mut self, token: &str) {
        (**self).add_class(token)
    }

    fn remove_class(&mut self, token: &str) {
        (**self).remove_class(token)
    }

    fn style_property(&self, property: &str) -> Option<String> {
        (**self).style_property(property)
    }

    fn set_style_property(&mut self, property: &str, value: &str) {
        (**self).set_style_property(property, value)
    }
}

/// A single state-changing write applied to a [`MemoryElement`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Mutation {
    SetAttribute { name: String, value: String },
    RemoveAttribute { name: String },
    AddClass { token: String },
    RemoveClass { token: String },
    SetStyle { property: String, value: String },
    ClearStyle { property: String },
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutation::SetAttribute { name, value } => write!(f, "set {}=\"{}\"", name, value),
            Mutation::RemoveAttribute { name } => write!(f, "remove {}", name),
            Mutation::AddClass { token } => write!(f, "+class {}", token),
            Mutation::RemoveClass { token } => write!(f, "-class {}", token),
            Mutation::SetStyle { property, value } => write!(f, "style {}: {}", property, value),
            Mutation::ClearStyle { property } => write!(f, "style {}: <unset>", property),
        }
    }
}

/// In-memory element with a mutation journal
///
/// Attributes, classes and style properties keep the order in which they were
/// first written. Writes that do not change the element are not journaled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryElement {
    attributes: Vec<(String, String)>,
    classes: Vec<String>,
    style: Vec<(String, String)>,
    #[serde(skip)]
    journal: Vec<Mutation>,
}

impl MemoryElement {
    /// Create an empty element
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: start with an attribute already present (not journaled)
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        upsert(&mut self.attributes, name.into(), value.into());
        self
    }

    /// Builder method: start with a class already present (not journaled)
    pub fn with_class(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        if !self.classes.contains(&token) {
            self.classes.push(token);
        }
        self
    }

    /// Builder method: start with a style property already present (not journaled)
    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.is_empty() {
            upsert(&mut self.style, property.into(), value);
        }
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        lookup(&self.attributes, name)
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn has_class(&self, token: &str) -> bool {
        self.classes.iter().any(|c| c == token)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// The class list as it would appear in a `class` attribute
    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        lookup(&self.style, property)
    }

    pub fn styles(&self) -> &[(String, String)] {
        &self.style
    }

    /// Every state-changing write since creation (or the last [`take_journal`](Self::take_journal))
    pub fn journal(&self) -> &[Mutation] {
        &self.journal
    }

    /// Drain the journal
    pub fn take_journal(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.journal)
    }
}

impl Element for MemoryElement {
    fn set_attribute(&mut self, name: &str, value: &str) {
        if self.attribute(name) == Some(value) {
            return;
        }
        upsert(&mut self.attributes, name.to_string(), value.to_string());
        self.journal.push(Mutation::SetAttribute {
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    fn remove_attribute(&mut self, name: &str) {
        if remove(&mut self.attributes, name) {
            self.journal.push(Mutation::RemoveAttribute { name: name.to_string() });
        }
    }

    fn add_class(&mut self, token: &str) {
        if self.has_class(token) {
            return;
        }
        self.classes.push(token.to_string());
        self.journal.push(Mutation::AddClass { token: token.to_string() });
    }

    fn remove_class(&mut self, token: &str) {
        let before = self.classes.len();
        self.classes.retain(|c| c != token);
        if self.classes.len() != before {
            self.journal.push(Mutation::RemoveClass { token: token.to_string() });
        }
    }

    fn style_property(&self, property: &str) -> Option<String> {
        self.style(property).map(str::to_string)
    }

    fn set_style_property(&mut self, property: &str, value: &str) {
        if value.is_empty() {
            if remove(&mut self.style, property) {
                self.journal.push(Mutation::ClearStyle { property: property.to_string() });
            }
            return;
        }
        if self.style(property) == Some(value) {
            return;
        }
        upsert(&mut self.style, property.to_string(), value.to_string());
        self.journal.push(Mutation::SetStyle {
            property: property.to_string(),
            value: value.to_string(),
        });
    }
}

fn lookup<'a>(entries: &'a [(String, String)], name: &str) -> Option<&'a str> {
    entries.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
}

fn upsert(entries: &mut Vec<(String, String)>, name: String, value: String) {
    match entries.iter_mut().find(|(n, _)| *n == name) {
        Some(entry) => entry.1 = value,
        None => entries.push((name, value)),
    }
}

fn remove(entries: &mut Vec<(String, String)>, name: &str) -> bool {
    let before = entries.len();
    entries.retain(|(n, _)| n != name);
    entries.len() != before
}
