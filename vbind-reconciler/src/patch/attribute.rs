//! Plain attribute patching
//!
//! Setting an attribute always overwrites it completely, so only the new value
//! matters.

use crate::element::Element;
use crate::shape::{classify, Shape};
use crate::types::{scalar_text, BindError, Result};
use serde_json::Value;

/// The single write a plain attribute update needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributePatch {
    Set { name: String, value: String },
    Remove { name: String },
}

impl AttributePatch {
    pub fn is_removal(&self) -> bool {
        matches!(self, AttributePatch::Remove { .. })
    }

    pub fn write<E: Element + ?Sized>(&self, element: &mut E) {
        match self {
            AttributePatch::Set { name, value } => {
                log::trace!("set attribute `{}` to `{}`", name, value);
                element.set_attribute(name, value);
            }
            AttributePatch::Remove { name } => {
                log::trace!("remove attribute `{}`", name);
                element.remove_attribute(name);
            }
        }
    }
}

/// Work out the write for a plain attribute from its bound value
///
/// Strings are written verbatim and numbers/booleans in their text form. A
/// `null` value removes the attribute when `remove_null` is set; maps and
/// sequences have no attribute form and are rejected.
pub fn plan(name: &str, value: &Value, remove_null: bool) -> Result<AttributePatch> {
    let text = match classify(name, value) {
        Ok(Shape::Text(text)) => text.to_string(),
        Ok(Shape::Plain(plain)) => {
            scalar_text(plain).ok_or_else(|| BindError::InvalidAttributeValue(name.to_string()))?
        }
        Ok(Shape::List(_)) | Ok(Shape::Map(_)) => {
            return Err(BindError::InvalidAttributeValue(name.to_string()))
        }
        Err(_) if value.is_null() && remove_null => {
            return Ok(AttributePatch::Remove { name: name.to_string() })
        }
        Err(err) => return Err(err),
    };
    Ok(AttributePatch::Set {
        name: name.to_string(),
        value: text,
    })
}

/// Write a plain attribute from its bound value
pub fn apply<E: Element + ?Sized>(element: &mut E, name: &str, value: &Value, remove_null: bool) -> Result<()> {
    plan(name, value, remove_null)?.write(element);
    Ok(())
}
