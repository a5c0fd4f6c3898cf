//! Diagnostic channel for malformed bindings
//!
//! A malformed bound value never aborts an update. The offending key is
//! skipped, a warning goes to the `log` facade, and a [`Diagnostic`] record is
//! kept so callers (and tests) can see what was rejected.

use crate::types::BindError;
use serde::Serialize;
use serde_json::Value;
use std::collections::VecDeque;
use std::fmt;

/// A rejected bound value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// Binding key the value was bound to (`class`, `style`, an attribute name, or `v-bind`)
    pub key: String,
    /// Human readable reason
    pub message: String,
    /// The offending value
    pub value: Value,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.key, self.message, self.value)
    }
}

/// Bounded buffer of diagnostics; oldest records are dropped first
#[derive(Debug, Clone)]
pub struct Diagnostics {
    records: VecDeque<Diagnostic>,
    limit: usize,
    dropped: usize,
}

impl Diagnostics {
    pub fn new(limit: usize) -> Self {
        Self {
            records: VecDeque::new(),
            limit,
            dropped: 0,
        }
    }

    /// Report a rejected value
    pub fn warn(&mut self, key: &str, error: &BindError, value: &Value) {
        log::warn!("{} (key `{}`): {}", error, key, value);

        if self.limit == 0 {
            self.dropped += 1;
            return;
        }
        if self.records.len() == self.limit {
            self.records.pop_front();
            self.dropped += 1;
        }
        self.records.push_back(Diagnostic {
            key: key.to_string(),
            message: error.to_string(),
            value: value.clone(),
        });
    }

    pub fn records(&self) -> impl Iterator<Item = &Diagnostic> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records discarded because the buffer was full
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Drain all kept records
    pub fn take(&mut self) -> Vec<Diagnostic> {
        self.records.drain(..).collect()
    }
}
