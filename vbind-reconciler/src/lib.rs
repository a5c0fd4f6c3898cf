//! vbind attribute reconciler
//!
//! The reconciliation core of a reactive `v-bind` directive. Given the newly
//! bound value of a binding and the value it replaces, it computes the minimal
//! transition of an element's attributes, class list and inline style, and
//! applies exactly that transition.
//!
//! # Architecture
//!
//! - [`shape`] classifies a bound value into a closed set of shapes
//! - [`diff`] splits the change between two keyed maps into changed and removed keys
//! - [`patch`] holds the class, style and plain attribute patchers
//! - [`Reconciler`] is the per-binding controller the directive framework drives
//!
//! The library does NOT:
//! - Decide when an update fires (dependency tracking belongs to the framework)
//! - Parse template expressions
//! - Diff element trees
//!
//! # Example Usage
//!
//! ```
//! use vbind_reconciler::{BindingDescriptor, MemoryElement, Reconciler};
//! use serde_json::json;
//!
//! let descriptor = BindingDescriptor::parse("v-bind:class").unwrap();
//! let mut reconciler = Reconciler::new(descriptor, MemoryElement::new());
//!
//! reconciler.update(&json!("b c"), None);
//! reconciler.update(&json!("a b"), Some(&json!("b c")));
//!
//! assert_eq!(reconciler.element().class_name(), "b a");
//! ```

// Public modules
pub mod config;
pub mod descriptor;
pub mod diagnostics;
pub mod diff;
pub mod element;
pub mod patch;
pub mod reconciler;
pub mod shape;
pub mod types;

#[cfg(feature = "web")]
pub mod web;

// Re-export main types for convenience
pub use config::ReconcilerConfig;
pub use descriptor::BindingDescriptor;
pub use diagnostics::{Diagnostic, Diagnostics};
pub use diff::{diff, DiffResult};
pub use element::{Element, MemoryElement, Mutation};
pub use patch::KeyPatch;
pub use reconciler::{BindingState, Reconciler};
pub use shape::{classify, Shape};
pub use types::{AttributeKind, BindError, KeyedMap, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
