//! Per-binding reconciler
//!
//! This module provides the controller a directive instance drives. The
//! framework calls [`Reconciler::update`] with the newly resolved value and
//! the value it replaces; the reconciler works out which keys need touching
//! and dispatches each one to the class, style or plain attribute patcher.

use crate::config::ReconcilerConfig;
use crate::descriptor::BindingDescriptor;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::diff::{diff, DiffResult};
use crate::element::Element;
use crate::patch::KeyPatch;
use crate::types::{BindError, KeyedMap};
use serde::Serialize;
use serde_json::Value;

/// Key used in diagnostics about the multi binding as a whole
const MULTI_KEY: &str = "v-bind";

/// Lifecycle state of a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BindingState {
    /// No value applied yet
    Idle,
    /// At least one update has run
    Bound,
}

/// The reconciler for one binding on one element
///
/// The element is held by value; pass `&mut element` to keep ownership on the
/// caller's side.
pub struct Reconciler<E: Element> {
    descriptor: BindingDescriptor,
    state: BindingState,
    last: Option<Value>,
    target: Target<E>,
}

/// Everything a dispatch needs, kept apart from the descriptor so the two can
/// be borrowed independently.
struct Target<E: Element> {
    element: E,
    config: ReconcilerConfig,
    diagnostics: Diagnostics,
}

impl<E: Element> Reconciler<E> {
    /// Create a reconciler with the default configuration
    pub fn new(descriptor: BindingDescriptor, element: E) -> Self {
        Self::with_config(descriptor, element, ReconcilerConfig::default())
    }

    pub fn with_config(descriptor: BindingDescriptor, element: E, config: ReconcilerConfig) -> Self {
        Self {
            descriptor,
            state: BindingState::Idle,
            last: None,
            target: Target {
                element,
                diagnostics: Diagnostics::new(config.max_diagnostics),
                config,
            },
        }
    }

    /// Apply the transition from `old` to `new`
    ///
    /// `old` is `None` on first render. All removals of one update are applied
    /// before any addition or change. Malformed values never surface as errors:
    /// the affected key is skipped and a diagnostic is recorded, and the last
    /// value keeps what was actually applied.
    pub fn update(&mut self, new: &Value, old: Option<&Value>) {
        log::debug!(
            "{} update ({:?}, first render: {})",
            self.descriptor,
            self.state,
            old.is_none()
        );

        let applied = match &self.descriptor {
            BindingDescriptor::Single(name) => self.target.apply_single(name, new, old).then(|| new.clone()),
            BindingDescriptor::Multi => self.target.apply_multi(new, old).map(Value::Object),
        };

        match applied {
            Some(value) => self.last = Some(value),
            None => log::debug!("{} keeps its last applied value", self.descriptor),
        }
        self.state = BindingState::Bound;
    }

    /// Apply `new`, using the last value this reconciler applied as the old value
    pub fn set(&mut self, new: Value) {
        let old = self.last.clone();
        self.update(&new, old.as_ref());
    }

    /// Reconcile one attribute-like key directly, dispatching on the key name
    ///
    /// This is the step `update` uses for single bindings. It does not touch
    /// the binding state or the remembered last value.
    pub fn apply_single(&mut self, key: &str, new: &Value, old: Option<&Value>) {
        self.target.apply_single(key, new, old);
    }

    pub fn descriptor(&self) -> &BindingDescriptor {
        &self.descriptor
    }

    pub fn state(&self) -> BindingState {
        self.state
    }

    /// The last value [`update`](Self::update) applied
    ///
    /// A rejected value is not remembered. For a multi binding, a rejected key
    /// keeps the value it had before.
    pub fn last_value(&self) -> Option<&Value> {
        self.last.as_ref()
    }

    pub fn config(&self) -> &ReconcilerConfig {
        &self.target.config
    }

    pub fn element(&self) -> &E {
        &self.target.element
    }

    pub fn element_mut(&mut self) -> &mut E {
        &mut self.target.element
    }

    pub fn into_element(self) -> E {
        self.target.element
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.target.diagnostics.records()
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.target.diagnostics.take()
    }
}

impl<E: Element> Target<E> {
    /// Plan one key; errors become diagnostics
    fn plan(&mut self, key: &str, new: &Value, old: Option<&Value>) -> Option<KeyPatch> {
        match KeyPatch::plan(key, new, old, &self.config) {
            Ok(patch) => Some(patch),
            Err(err) => {
                self.diagnostics.warn(key, &err, new);
                None
            }
        }
    }

    /// Write planned patches, every removal before any addition
    fn write(&mut self, patches: &[KeyPatch]) {
        for patch in patches {
            patch.remove_stale(&mut self.element, &mut self.diagnostics);
        }
        for patch in patches {
            patch.apply_fresh(&mut self.element, self.config.skip_unchanged_styles, &mut self.diagnostics);
        }
    }

    /// Reconcile one key, returning whether the value was accepted
    fn apply_single(&mut self, key: &str, new: &Value, old: Option<&Value>) -> bool {
        match self.plan(key, new, old) {
            Some(patch) => {
                self.write(std::slice::from_ref(&patch));
                true
            }
            None => false,
        }
    }

    /// Reconcile a multi binding, returning the map that is now applied
    ///
    /// A rejected key is left as it was: the returned map carries its old value,
    /// or omits it when it had none.
    fn apply_multi(&mut self, new: &Value, old: Option<&Value>) -> Option<KeyedMap> {
        let Some(new_map) = new.as_object() else {
            self.diagnostics.warn(MULTI_KEY, &BindError::InvalidMultiValue, new);
            return None;
        };
        let old_map = old.and_then(Value::as_object);
        let mut applied = new_map.clone();
        let mut patches = Vec::new();

        match old_map {
            Some(old_map) => {
                let DiffResult { changed, removed } = diff(new_map, old_map);
                log::debug!(
                    "v-bind diff: changed {:?}, removed {:?}",
                    changed.keys().collect::<Vec<_>>(),
                    removed.keys().collect::<Vec<_>>()
                );

                for (key, value) in &removed {
                    patches.push(KeyPatch::undo(key, value));
                }
                for (key, value) in &changed {
                    let previous = old_map.get(key);
                    match self.plan(key, value, previous) {
                        Some(patch) => patches.push(patch),
                        None => keep_previous(&mut applied, key, previous),
                    }
                }
            }
            None => {
                for (key, value) in new_map {
                    match self.plan(key, value, None) {
                        Some(patch) => patches.push(patch),
                        None => keep_previous(&mut applied, key, None),
                    }
                }
            }
        }

        self.write(&patches);
        Some(applied)
    }
}

fn keep_previous(applied: &mut KeyedMap, key: &str, previous: Option<&Value>) {
    match previous {
        Some(value) => {
            applied.insert(key.to_string(), value.clone());
        }
        None => {
            applied.shift_remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{MemoryElement, Mutation};
    use serde_json::json;

    #[test]
    fn test_state_transitions() {
        let mut reconciler = Reconciler::new(BindingDescriptor::single("title"), MemoryElement::new());
        assert_eq!(reconciler.state(), BindingState::Idle);
        assert!(reconciler.last_value().is_none());

        reconciler.update(&json!("a"), None);
        assert_eq!(reconciler.state(), BindingState::Bound);
        assert_eq!(reconciler.last_value(), Some(&json!("a")));

        reconciler.update(&json!("b"), Some(&json!("a")));
        assert_eq!(reconciler.state(), BindingState::Bound);
        assert_eq!(reconciler.element().attribute("title"), Some("b"));
    }

    #[test]
    fn test_set_supplies_previous_value() {
        let mut reconciler = Reconciler::new(BindingDescriptor::single("class"), MemoryElement::new());
        reconciler.set(json!("b c"));
        reconciler.element_mut().take_journal();

        reconciler.set(json!("a b"));

        assert_eq!(
            reconciler.element().journal(),
            [
                Mutation::RemoveClass { token: "c".into() },
                Mutation::AddClass { token: "a".into() },
            ]
        );
    }

    #[test]
    fn test_apply_single_dispatches_by_key() {
        let mut reconciler = Reconciler::new(BindingDescriptor::Multi, MemoryElement::new());
        reconciler.apply_single("style", &json!({"top": "1px"}), None);
        reconciler.apply_single("class", &json!("a"), None);
        reconciler.apply_single("href", &json!("/x"), None);

        let el = reconciler.element();
        assert_eq!(el.style("top"), Some("1px"));
        assert!(el.has_class("a"));
        assert_eq!(el.attribute("href"), Some("/x"));
        assert_eq!(reconciler.state(), BindingState::Idle);
    }

    #[test]
    fn test_borrowed_element() {
        let mut el = MemoryElement::new();
        {
            let mut reconciler = Reconciler::new(BindingDescriptor::Multi, &mut el);
            reconciler.update(&json!({"id": "main", "class": ["a"]}), None);
        }
        assert_eq!(el.attribute("id"), Some("main"));
        assert!(el.has_class("a"));
    }

    #[test]
    fn test_multi_rejects_non_object() {
        let mut reconciler = Reconciler::new(BindingDescriptor::Multi, MemoryElement::new());
        reconciler.update(&json!("class"), None);

        let diagnostics = reconciler.take_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].key, "v-bind");
        assert!(reconciler.element().journal().is_empty());
        // The binding is still bound and recovers on the next tick
        reconciler.update(&json!({"title": "ok"}), Some(&json!("class")));
        assert_eq!(reconciler.element().attribute("title"), Some("ok"));
    }

    #[test]
    fn test_bad_key_does_not_stop_other_keys() {
        let mut reconciler = Reconciler::new(BindingDescriptor::Multi, MemoryElement::new());
        reconciler.update(&json!({"style": "color: red", "title": "hi", "class": 5}), None);

        assert_eq!(reconciler.element().attribute("title"), Some("hi"));
        let keys: Vec<_> = reconciler.diagnostics().map(|d| d.key.clone()).collect();
        assert_eq!(keys, vec!["style".to_string(), "class".to_string()]);
    }

    #[test]
    fn test_multi_removed_keys_are_undone() {
        let mut reconciler = Reconciler::new(BindingDescriptor::Multi, MemoryElement::new());
        let old = json!({"class": "a b", "style": {"color": "red"}, "title": "hi", "id": "x"});
        reconciler.update(&old, None);
        reconciler.element_mut().take_journal();

        reconciler.update(&json!({"id": "y"}), Some(&old));

        let el = reconciler.element();
        assert!(el.classes().is_empty());
        assert!(el.styles().is_empty());
        assert_eq!(el.attribute("title"), None);
        assert_eq!(el.attribute("id"), Some("y"));
        // removals strictly before the change
        assert_eq!(
            el.journal().last(),
            Some(&Mutation::SetAttribute { name: "id".into(), value: "y".into() })
        );
    }

    #[test]
    fn test_multi_removals_precede_earlier_keys_writes() {
        let mut reconciler = Reconciler::new(BindingDescriptor::Multi, MemoryElement::new());
        reconciler.set(json!({"title": "x", "class": "a"}));
        reconciler.element_mut().take_journal();

        reconciler.set(json!({"title": "y", "class": "b"}));

        assert_eq!(
            reconciler.element().journal(),
            [
                Mutation::RemoveClass { token: "a".into() },
                Mutation::SetAttribute { name: "title".into(), value: "y".into() },
                Mutation::AddClass { token: "b".into() },
            ]
        );
    }

    #[test]
    fn test_rejected_value_is_not_remembered() {
        let mut reconciler = Reconciler::new(BindingDescriptor::single("class"), MemoryElement::new());
        reconciler.set(json!("a"));
        reconciler.set(json!(5));
        assert_eq!(reconciler.last_value(), Some(&json!("a")));
        assert_eq!(reconciler.state(), BindingState::Bound);

        reconciler.set(json!("b"));
        assert_eq!(reconciler.element().class_name(), "b");
        assert_eq!(reconciler.diagnostics().count(), 1);
    }

    #[test]
    fn test_rejected_multi_key_keeps_previous_value() {
        let mut reconciler = Reconciler::new(BindingDescriptor::Multi, MemoryElement::new());
        reconciler.set(json!({"class": "a", "title": "x"}));
        reconciler.set(json!({"class": 5, "title": "y", "style": "top: 0"}));
        assert_eq!(reconciler.last_value(), Some(&json!({"class": "a", "title": "y"})));

        reconciler.set(json!({"class": "b", "title": "y"}));
        assert_eq!(reconciler.element().class_name(), "b");
        assert_eq!(reconciler.element().attribute("title"), Some("y"));
    }

    #[test]
    fn test_rejected_multi_value_keeps_last_map() {
        let mut reconciler = Reconciler::new(BindingDescriptor::Multi, MemoryElement::new());
        reconciler.set(json!({"class": "a"}));
        reconciler.set(json!(["class"]));
        reconciler.set(json!({}));

        assert!(reconciler.element().classes().is_empty());
    }
}
