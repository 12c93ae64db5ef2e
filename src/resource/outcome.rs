//! Result of one resource operation.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::reconcile::{ChangeSet, Field};

/// A deprecated input that was still accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deprecation {
    /// What is deprecated and what to use instead
    pub msg: String,
    /// Release in which the input stops being accepted
    pub version: String,
}

/// What an operation did, or would do in check mode.
///
/// Serializes as `{"changed": bool, <field>: <value>, ...}` with changed
/// fields under their human names. Warnings are kept out of the report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Outcome {
    /// True if the device was, or would have been, modified
    pub changed: bool,

    /// Changed fields in human form
    #[serde(flatten)]
    pub report: Map<String, Value>,

    /// Deprecations triggered by the input
    #[serde(skip)]
    pub warnings: Vec<Deprecation>,
}

impl Outcome {
    /// An operation that found nothing to do.
    #[must_use]
    pub fn unchanged() -> Self {
        Self::default()
    }

    /// Builds the outcome of applying `changes`.
    #[must_use]
    pub fn from_changes<F: Field>(changes: &ChangeSet<F>) -> Self {
        Self {
            changed: !changes.is_empty(),
            report: changes.to_report(),
            warnings: Vec::new(),
        }
    }

    /// Marks the outcome as changed regardless of reported fields.
    #[must_use]
    pub fn changed(mut self) -> Self {
        self.changed = true;
        self
    }

    /// Attaches deprecation warnings.
    #[must_use]
    pub fn with_warnings(mut self, warnings: Vec<Deprecation>) -> Self {
        self.warnings = warnings;
        self
    }
}
