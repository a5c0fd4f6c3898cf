//! Patchers for the three attribute kinds
//!
//! Each patcher is a set of free functions taking the element explicitly.
//! They never remember anything between calls; the previous value is always
//! passed in by the reconciler.
//!
//! A transition is first planned, then written in two phases: removals (stale
//! class tokens, cleared style properties, removed attributes) and then
//! additions and changes. [`KeyPatch`] lets the reconciler run the removal
//! phase of every key of a multi binding before any addition.

pub mod attribute;
pub mod class;
pub mod style;

use crate::config::ReconcilerConfig;
use crate::diagnostics::Diagnostics;
use crate::element::Element;
use crate::types::{AttributeKind, Result};
use attribute::AttributePatch;
use class::ClassPatch;
use serde_json::Value;
use style::StylePatch;

/// The planned writes for one attribute-like key
#[derive(Debug, Clone, PartialEq)]
pub enum KeyPatch {
    Class(ClassPatch),
    Style(StylePatch),
    Attribute(AttributePatch),
}

impl KeyPatch {
    /// Plan the transition of `key` from `old` to `new`, dispatching on the key
    pub fn plan(key: &str, new: &Value, old: Option<&Value>, config: &ReconcilerConfig) -> Result<Self> {
        Ok(match AttributeKind::of(key) {
            AttributeKind::Class => KeyPatch::Class(class::plan(new, old)?),
            AttributeKind::Style => KeyPatch::Style(style::plan(new, old)?),
            AttributeKind::Attribute(name) => {
                KeyPatch::Attribute(attribute::plan(&name, new, config.remove_null_attributes)?)
            }
        })
    }

    /// Plan the removal of a key that is no longer bound
    pub fn undo(key: &str, old: &Value) -> Self {
        match AttributeKind::of(key) {
            AttributeKind::Class => KeyPatch::Class(ClassPatch::undo(old)),
            AttributeKind::Style => KeyPatch::Style(StylePatch::undo(old)),
            AttributeKind::Attribute(name) => KeyPatch::Attribute(AttributePatch::Remove { name }),
        }
    }

    /// First phase: every removal this key needs
    pub fn remove_stale<E: Element + ?Sized>(&self, element: &mut E, diagnostics: &mut Diagnostics) {
        match self {
            KeyPatch::Class(patch) => patch.remove_stale(element),
            KeyPatch::Style(patch) => patch.clear_stale(element, diagnostics),
            KeyPatch::Attribute(patch) if patch.is_removal() => patch.write(element),
            KeyPatch::Attribute(_) => {}
        }
    }

    /// Second phase: every addition or change this key needs
    pub fn apply_fresh<E: Element + ?Sized>(
        &self,
        element: &mut E,
        skip_unchanged_styles: bool,
        diagnostics: &mut Diagnostics,
    ) {
        match self {
            KeyPatch::Class(patch) => patch.add_fresh(element),
            KeyPatch::Style(patch) => patch.write_fresh(element, skip_unchanged_styles, diagnostics),
            KeyPatch::Attribute(patch) if !patch.is_removal() => patch.write(element),
            KeyPatch::Attribute(_) => {}
        }
    }
}
