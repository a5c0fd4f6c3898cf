//! Replay script loading and parsing

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use vbind_reconciler::{BindingDescriptor, MemoryElement, ReconcilerConfig};

/// A replay script (loaded from a .toml file)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Script {
    #[serde(default)]
    pub reconciler: ReconcilerConfig,
    #[serde(rename = "binding", default)]
    pub bindings: Vec<BindingScript>,
}

/// One binding and the values it receives, tick by tick
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BindingScript {
    pub directive: BindingDescriptor,
    pub name: Option<String>,
    /// One JSON document per reactive tick
    pub values: Vec<String>,
    #[serde(default)]
    pub initial: InitialElement,
}

impl BindingScript {
    /// Label used in reports: the name if given, otherwise the directive
    pub fn label(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.directive.to_string())
    }
}

/// Element state present before the binding's first render
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InitialElement {
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub style: BTreeMap<String, String>,
}

impl InitialElement {
    pub fn build(&self) -> MemoryElement {
        let element = self
            .attributes
            .iter()
            .fold(MemoryElement::new(), |el, (name, value)| el.with_attribute(name, value));
        let element = self.classes.iter().fold(element, |el, token| el.with_class(token));
        self.style
            .iter()
            .fold(element, |el, (property, value)| el.with_style(property, value))
    }
}

/// Load a replay script from a TOML file
pub fn load_script(path: &Path) -> Result<Script> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read script file: {:?}", path))?;

    let script = parse_script(&content)
        .with_context(|| format!("Failed to parse script file: {:?}", path))?;

    Ok(script)
}

/// Parse and validate script text
pub fn parse_script(content: &str) -> Result<Script> {
    let script: Script = toml::from_str(content)?;

    if script.bindings.is_empty() {
        bail!("script defines no [[binding]] entries");
    }
    for binding in &script.bindings {
        if binding.values.is_empty() {
            log::warn!("Binding {} has no values to replay", binding.label());
        }
    }

    Ok(script)
}
