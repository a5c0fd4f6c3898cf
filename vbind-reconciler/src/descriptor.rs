//! Binding descriptors
//!
//! A descriptor is fixed when the directive is parsed and never changes for
//! the lifetime of the binding.

use crate::types::{BindError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a binding is bound to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BindingDescriptor {
    /// `v-bind:NAME` - one attribute-like key
    Single(String),
    /// `v-bind` - an object of several keys
    Multi,
}

impl BindingDescriptor {
    pub fn single(name: impl Into<String>) -> Self {
        BindingDescriptor::Single(name.into())
    }

    /// Parse a directive attribute as written in a template
    ///
    /// Accepts `v-bind`, `v-bind:NAME` and the `:NAME` shorthand.
    pub fn parse(directive: &str) -> Result<Self> {
        let directive = directive.trim();
        let argument = if directive == "v-bind" {
            return Ok(BindingDescriptor::Multi);
        } else if let Some(argument) = directive.strip_prefix("v-bind:") {
            argument
        } else if let Some(argument) = directive.strip_prefix(':') {
            argument
        } else {
            return Err(BindError::InvalidDescriptor(format!(
                "`{}` is not a v-bind directive",
                directive
            )));
        };

        if argument.is_empty() || argument.chars().any(char::is_whitespace) {
            return Err(BindError::InvalidDescriptor(format!(
                "`{}` has an invalid argument",
                directive
            )));
        }

        Ok(BindingDescriptor::Single(argument.to_string()))
    }

    /// The bound attribute name, for single bindings
    pub fn attribute_name(&self) -> Option<&str> {
        match self {
            BindingDescriptor::Single(name) => Some(name),
            BindingDescriptor::Multi => None,
        }
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, BindingDescriptor::Multi)
    }
}

impl fmt::Display for BindingDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingDescriptor::Single(name) => write!(f, "v-bind:{}", name),
            BindingDescriptor::Multi => write!(f, "v-bind"),
        }
    }
}

impl FromStr for BindingDescriptor {
    type Err = BindError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for BindingDescriptor {
    type Error = BindError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<BindingDescriptor> for String {
    fn from(descriptor: BindingDescriptor) -> Self {
        descriptor.to_string()
    }
}
