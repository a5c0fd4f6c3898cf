//! Inline style patching
//!
//! A style value is a map from property name to value. `null` clears a
//! property; the element stores a cleared property as the empty string, which
//! is the platform's "unset" convention.

use crate::diagnostics::Diagnostics;
use crate::diff::{diff, DiffResult};
use crate::element::Element;
use crate::types::{scalar_text, BindError, KeyedMap, Result};
use serde_json::Value;

const KEY: &str = "style";

/// Write every property of `styles` onto the element
///
/// Strings and numbers are written, `null` clears, anything else is reported
/// and skipped without affecting the other properties. With `skip_unchanged`
/// a value already applied is not written again.
pub fn apply<E: Element + ?Sized>(
    element: &mut E,
    styles: &KeyedMap,
    skip_unchanged: bool,
    diagnostics: &mut Diagnostics,
) {
    for (property, value) in styles {
        match value {
            Value::Null => {
                log::trace!("clear style `{}`", property);
                element.set_style_property(property, "");
            }
            Value::String(_) | Value::Number(_) => {
                let Some(text) = scalar_text(value) else {
                    continue;
                };
                if skip_unchanged && element.style_property(property).as_deref() == Some(text.as_str()) {
                    log::trace!("style `{}` already `{}`", property, text);
                    continue;
                }
                log::trace!("set style `{}` to `{}`", property, text);
                element.set_style_property(property, &text);
            }
            Value::Bool(_) | Value::Array(_) | Value::Object(_) => {
                diagnostics.warn(KEY, &BindError::InvalidStyleProperty(property.clone()), value);
            }
        }
    }
}

/// A fresh map clearing every property of `styles`
///
/// The input map is left untouched.
pub fn clear_map(styles: &KeyedMap) -> KeyedMap {
    styles
        .keys()
        .map(|property| (property.clone(), Value::Null))
        .collect()
}

/// Property writes for one style transition, split into a clearing phase and
/// a writing phase
///
/// A multi binding runs the clearing phase of every key before the writing
/// phase of any key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StylePatch {
    /// Every value is `null`
    pub clear: KeyedMap,
    /// No value is `null`
    pub write: KeyedMap,
}

impl StylePatch {
    /// Clear every property of a previously applied style value
    pub fn undo(old: &Value) -> Self {
        match old.as_object() {
            Some(old) => Self {
                clear: clear_map(old),
                write: KeyedMap::new(),
            },
            None => {
                log::debug!("nothing to undo for rejected style value {}", old);
                Self::default()
            }
        }
    }

    fn split(styles: &KeyedMap) -> Self {
        let mut patch = Self::default();
        for (property, value) in styles {
            let phase = if value.is_null() { &mut patch.clear } else { &mut patch.write };
            phase.insert(property.clone(), value.clone());
        }
        patch
    }

    pub fn is_empty(&self) -> bool {
        self.clear.is_empty() && self.write.is_empty()
    }

    pub fn clear_stale<E: Element + ?Sized>(&self, element: &mut E, diagnostics: &mut Diagnostics) {
        apply(element, &self.clear, false, diagnostics);
    }

    pub fn write_fresh<E: Element + ?Sized>(
        &self,
        element: &mut E,
        skip_unchanged: bool,
        diagnostics: &mut Diagnostics,
    ) {
        apply(element, &self.write, skip_unchanged, diagnostics);
    }
}

/// Work out the property writes that move the element's inline style from
/// `old` to `new`
///
/// Properties present only in the old map and properties set to `null` are
/// cleared; other changed properties are written. An old value that is not a
/// map was never applied and is ignored.
pub fn plan(new: &Value, old: Option<&Value>) -> Result<StylePatch> {
    let new = new.as_object().ok_or(BindError::InvalidStyleValue)?;

    match old.and_then(Value::as_object) {
        Some(old) => {
            let DiffResult { changed, removed } = diff(new, old);
            log::debug!(
                "style diff: {} changed, {} cleared",
                changed.len(),
                removed.len()
            );
            let StylePatch { clear, write } = StylePatch::split(&changed);
            let mut stale = clear_map(&removed);
            stale.extend(clear);
            Ok(StylePatch { clear: stale, write })
        }
        None => Ok(StylePatch::split(new)),
    }
}

/// Move the element's inline style from `old` to `new`, clears first
pub fn reconcile<E: Element + ?Sized>(
    element: &mut E,
    new: &Value,
    old: Option<&Value>,
    skip_unchanged: bool,
    diagnostics: &mut Diagnostics,
) -> Result<()> {
    let patch = plan(new, old)?;
    patch.clear_stale(element, diagnostics);
    patch.write_fresh(element, skip_unchanged, diagnostics);
    Ok(())
}
