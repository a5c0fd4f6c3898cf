//! Class list patching
//!
//! A class value may be a string of whitespace-separated tokens, a sequence of
//! such strings, or a flag-map whose keys are tokens and whose values decide
//! inclusion. Any of the three can be normalized into a token map so that two
//! values of different shapes can still be diffed token by token.

use crate::diff::{diff, DiffResult};
use crate::element::Element;
use crate::shape::{classify, Shape};
use crate::types::{is_truthy, BindError, KeyedMap, Result};
use serde_json::Value;

const KEY: &str = "class";

fn unsupported() -> BindError {
    BindError::UnsupportedShape {
        key: KEY.to_string(),
        expected: "a string, a sequence of strings or an object",
    }
}

/// Add (or, in `remove` mode, remove) every token of a class value
///
/// For a flag-map, a token is added only when `remove` is false and its flag is
/// truthy; otherwise it is removed.
pub fn apply<E: Element + ?Sized>(element: &mut E, value: Shape<'_>, remove: bool) -> Result<()> {
    match value {
        Shape::Text(tokens) => toggle(element, tokens, remove),
        Shape::List(_) => {
            for entry in value.list_entries() {
                toggle(element, entry, remove);
            }
        }
        Shape::Map(flags) => {
            for (tokens, flag) in flags {
                toggle(element, tokens, remove || !is_truthy(flag));
            }
        }
        Shape::Plain(_) => return Err(unsupported()),
    }
    Ok(())
}

fn toggle<E: Element + ?Sized>(element: &mut E, tokens: &str, remove: bool) {
    for token in tokens.split_whitespace() {
        if remove {
            log::trace!("remove class `{}`", token);
            element.remove_class(token);
        } else {
            log::trace!("add class `{}`", token);
            element.add_class(token);
        }
    }
}

/// Normalize a class value into a token -> inclusion flag map
///
/// Strings and sequences give `true` for every token. A flag-map key holding
/// several tokens spreads its flag to each of them; a token seen again later
/// takes the later flag but keeps its first position.
pub fn tokens(value: Shape<'_>) -> Result<KeyedMap> {
    let mut map = KeyedMap::new();
    match value {
        Shape::Text(text) => insert_all(&mut map, text, true),
        Shape::List(_) => {
            for entry in value.list_entries() {
                insert_all(&mut map, entry, true);
            }
        }
        Shape::Map(flags) => {
            for (key, flag) in flags {
                insert_all(&mut map, key, is_truthy(flag));
            }
        }
        Shape::Plain(_) => return Err(unsupported()),
    }
    Ok(map)
}

fn insert_all(map: &mut KeyedMap, tokens: &str, flag: bool) {
    for token in tokens.split_whitespace() {
        map.insert(token.to_string(), Value::Bool(flag));
    }
}

/// Token writes for one class transition, split into a removal phase and an
/// addition phase
///
/// A multi binding runs the removal phase of every key before the addition
/// phase of any key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassPatch {
    pub remove: Vec<String>,
    pub add: Vec<String>,
}

impl ClassPatch {
    /// Remove every token of a previously applied class value
    ///
    /// A value that was rejected when it was new gives an empty patch.
    pub fn undo(old: &Value) -> Self {
        match classify(KEY, old).and_then(tokens) {
            Ok(old) => Self {
                remove: old.keys().cloned().collect(),
                add: Vec::new(),
            },
            Err(_) => {
                log::debug!("nothing to undo for rejected class value {}", old);
                Self::default()
            }
        }
    }

    fn from_flags(flags: &KeyedMap) -> Self {
        let mut patch = Self::default();
        for (token, flag) in flags {
            if is_truthy(flag) {
                patch.add.push(token.clone());
            } else {
                patch.remove.push(token.clone());
            }
        }
        patch
    }

    pub fn is_empty(&self) -> bool {
        self.remove.is_empty() && self.add.is_empty()
    }

    pub fn remove_stale<E: Element + ?Sized>(&self, element: &mut E) {
        for token in &self.remove {
            log::trace!("remove class `{}`", token);
            element.remove_class(token);
        }
    }

    pub fn add_fresh<E: Element + ?Sized>(&self, element: &mut E) {
        for token in &self.add {
            log::trace!("add class `{}`", token);
            element.add_class(token);
        }
    }
}

/// Work out the token writes that move the element's classes from `old` to
/// `new`
///
/// With a usable old value, both values are diffed at the token level: stale
/// tokens and tokens whose flag turned falsy are removed, changed truthy tokens
/// are added. Without one (first render, or an old value that was itself
/// rejected and so never applied) the new value is applied as is.
pub fn plan(new: &Value, old: Option<&Value>) -> Result<ClassPatch> {
    let new_tokens = tokens(classify(KEY, new)?)?;
    let old_tokens = old
        .and_then(|old| classify(KEY, old).ok())
        .and_then(|old| tokens(old).ok());

    match old_tokens {
        Some(old_tokens) => {
            let DiffResult { changed, removed } = diff(&new_tokens, &old_tokens);
            log::debug!(
                "class diff: {} changed, {} removed",
                changed.len(),
                removed.len()
            );
            let flagged = ClassPatch::from_flags(&changed);
            let mut remove: Vec<String> = removed.keys().cloned().collect();
            remove.extend(flagged.remove);
            Ok(ClassPatch {
                remove,
                add: flagged.add,
            })
        }
        None => Ok(ClassPatch::from_flags(&new_tokens)),
    }
}

/// Move the element's classes from `old` to `new`, removals first
pub fn reconcile<E: Element + ?Sized>(element: &mut E, new: &Value, old: Option<&Value>) -> Result<()> {
    let patch = plan(new, old)?;
    patch.remove_stale(element);
    patch.add_fresh(element);
    Ok(())
}
