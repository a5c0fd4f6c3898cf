//! Script replay
//!
//! Drives one reconciler per binding through its values and records, per
//! tick, the element writes and diagnostics the update produced.

use crate::config::{self, BindingScript, Script};
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use vbind_reconciler::{Diagnostic, MemoryElement, Mutation, Reconciler, ReconcilerConfig};

/// Replay results for one script file
#[derive(Debug, Clone, Serialize)]
pub struct ScriptReport {
    pub path: PathBuf,
    pub bindings: Vec<BindingReport>,
}

/// Replay results for one binding
#[derive(Debug, Clone, Serialize)]
pub struct BindingReport {
    pub label: String,
    pub directive: String,
    pub steps: Vec<StepReport>,
    /// Element state after the last tick
    #[serde(rename = "final")]
    pub final_state: MemoryElement,
}

/// What a single tick did
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub tick: usize,
    pub value: Value,
    pub mutations: Vec<Mutation>,
    pub diagnostics: Vec<Diagnostic>,
}

impl BindingReport {
    pub fn mutation_count(&self) -> usize {
        self.steps.iter().map(|s| s.mutations.len()).sum()
    }

    pub fn diagnostic_count(&self) -> usize {
        self.steps.iter().map(|s| s.diagnostics.len()).sum()
    }
}

/// Load and replay a script file
pub fn replay_file(path: &Path) -> Result<ScriptReport> {
    log::info!("Replaying script: {:?}", path);
    let script = config::load_script(path)?;
    let report = replay_script(path, &script)
        .with_context(|| format!("Failed to replay script: {:?}", path))?;
    log::debug!("Replayed {} binding(s) from {:?}", report.bindings.len(), path);
    Ok(report)
}

/// Replay every binding of an already loaded script
pub fn replay_script(path: &Path, script: &Script) -> Result<ScriptReport> {
    let bindings = script
        .bindings
        .iter()
        .map(|binding| replay_binding(&script.reconciler, binding))
        .collect::<Result<Vec<_>>>()?;

    Ok(ScriptReport {
        path: path.to_path_buf(),
        bindings,
    })
}

fn replay_binding(config: &ReconcilerConfig, binding: &BindingScript) -> Result<BindingReport> {
    let label = binding.label();
    let values = binding
        .values
        .iter()
        .enumerate()
        .map(|(tick, text)| {
            serde_json::from_str::<Value>(text)
                .with_context(|| format!("Binding {}: value #{} is not valid JSON: {}", label, tick, text))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut reconciler = Reconciler::with_config(
        binding.directive.clone(),
        binding.initial.build(),
        config.clone(),
    );

    let mut steps = Vec::with_capacity(values.len());
    for (tick, value) in values.into_iter().enumerate() {
        reconciler.set(value.clone());
        let mutations = reconciler.element_mut().take_journal();
        log::trace!("{} tick {}: {} mutation(s)", label, tick, mutations.len());
        steps.push(StepReport {
            tick,
            value,
            mutations,
            diagnostics: reconciler.take_diagnostics(),
        });
    }

    Ok(BindingReport {
        label,
        directive: binding.directive.to_string(),
        steps,
        final_state: reconciler.into_element(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replay(content: &str) -> Result<ScriptReport> {
        let script = config::parse_script(content)?;
        replay_script(Path::new("inline.toml"), &script)
    }

    #[test]
    fn test_replay_records_each_tick() {
        let report = replay(
            r#"
            [[binding]]
            directive = ":class"
            values = ['"b c"', '"a b"', '"a b"']
            "#,
        )
        .unwrap();

        let binding = &report.bindings[0];
        assert_eq!(binding.steps.len(), 3);
        assert_eq!(binding.steps[0].mutations.len(), 2);
        assert_eq!(
            binding.steps[1].mutations,
            vec![
                Mutation::RemoveClass { token: "c".into() },
                Mutation::AddClass { token: "a".into() },
            ]
        );
        assert!(binding.steps[2].mutations.is_empty());
        assert_eq!(binding.final_state.class_name(), "b a");
        assert_eq!(binding.mutation_count(), 4);
    }

    #[test]
    fn test_replay_collects_diagnostics_per_tick() {
        let report = replay(
            r#"
            [[binding]]
            directive = ":style"
            values = ['"color: red"', '{"color": "red"}']
            "#,
        )
        .unwrap();

        let binding = &report.bindings[0];
        assert_eq!(binding.steps[0].diagnostics.len(), 1);
        assert!(binding.steps[1].diagnostics.is_empty());
        assert_eq!(binding.diagnostic_count(), 1);
        assert_eq!(binding.final_state.style("color"), Some("red"));
    }

    #[test]
    fn test_invalid_json_value_fails_the_script() {
        let err = replay(
            r#"
            [[binding]]
            directive = "v-bind"
            name = "broken"
            values = ['{"title": ']
            "#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("Binding broken: value #0"));
    }
}
