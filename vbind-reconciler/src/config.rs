//! Reconciler configuration types
//!
//! The reconciler needs very little configuration; the defaults match what a
//! template author expects from `v-bind`.

use serde::{Deserialize, Serialize};

/// Configuration for a [`Reconciler`](crate::Reconciler)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcilerConfig {
    /// Skip style writes whose value is already applied
    #[serde(default = "default_true")]
    pub skip_unchanged_styles: bool,

    /// A `null` plain attribute value removes the attribute (otherwise it is rejected)
    #[serde(default = "default_true")]
    pub remove_null_attributes: bool,

    /// Maximum number of diagnostics kept per binding (default: 64)
    #[serde(default = "default_max_diagnostics")]
    pub max_diagnostics: usize,
}

fn default_true() -> bool {
    true
}

fn default_max_diagnostics() -> usize {
    64
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            skip_unchanged_styles: true,
            remove_null_attributes: true,
            max_diagnostics: default_max_diagnostics(),
        }
    }
}

impl ReconcilerConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: enable or disable the unchanged-style check
    pub fn with_skip_unchanged_styles(mut self, enabled: bool) -> Self {
        self.skip_unchanged_styles = enabled;
        self
    }

    /// Builder method: choose how `null` attribute values are handled
    pub fn with_remove_null_attributes(mut self, enabled: bool) -> Self {
        self.remove_null_attributes = enabled;
        self
    }

    /// Builder method: set the diagnostic buffer size
    pub fn with_max_diagnostics(mut self, limit: usize) -> Self {
        self.max_diagnostics = limit;
        self
    }
}
