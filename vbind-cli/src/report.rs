//! Report generation
//!
//! Renders replay results as a plain-text transcript or as JSON.

use crate::replay::{BindingReport, ScriptReport};
use anyhow::Result;
use std::fmt::Write;
use vbind_reconciler::MemoryElement;

/// Render reports as JSON (an array with one entry per script)
pub fn render_json(reports: &[ScriptReport]) -> Result<String> {
    Ok(serde_json::to_string_pretty(reports)?)
}

/// Render reports as a text transcript
pub fn render_text(reports: &[ScriptReport]) -> String {
    let mut out = String::new();
    for report in reports {
        let _ = writeln!(out, "═══════════════════════════════════════════════");
        let _ = writeln!(out, "  {}", report.path.display());
        let _ = writeln!(out, "═══════════════════════════════════════════════");
        for binding in &report.bindings {
            write_binding(&mut out, binding);
        }
    }
    out
}

fn write_binding(out: &mut String, binding: &BindingReport) {
    let _ = writeln!(out, "\n{} ({})", binding.label, binding.directive);
    let _ = writeln!(out, "───────────────────────────────────────────────");

    for step in &binding.steps {
        let _ = writeln!(out, "  #{} {}", step.tick, step.value);
        if step.mutations.is_empty() && step.diagnostics.is_empty() {
            let _ = writeln!(out, "      (no changes)");
        }
        for mutation in &step.mutations {
            let _ = writeln!(out, "      {}", mutation);
        }
        for diagnostic in &step.diagnostics {
            let _ = writeln!(out, "      ! {}", diagnostic);
        }
    }

    let _ = writeln!(out, "  final: {}", describe(&binding.final_state));
    let _ = writeln!(
        out,
        "  {} mutation(s), {} diagnostic(s)",
        binding.mutation_count(),
        binding.diagnostic_count()
    );
}

/// One-line summary of an element, in attribute order
fn describe(element: &MemoryElement) -> String {
    let mut parts: Vec<String> = element
        .attributes()
        .iter()
        .map(|(name, value)| format!("{}=\"{}\"", name, value))
        .collect();
    if !element.classes().is_empty() {
        parts.push(format!("class=\"{}\"", element.class_name()));
    }
    if !element.styles().is_empty() {
        let style = element
            .styles()
            .iter()
            .map(|(property, value)| format!("{}: {}", property, value))
            .collect::<Vec<_>>()
            .join("; ");
        parts.push(format!("style=\"{}\"", style));
    }

    if parts.is_empty() {
        "<empty>".to_string()
    } else {
        parts.join(" ")
    }
}
