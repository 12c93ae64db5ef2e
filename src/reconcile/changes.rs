//! Accumulated changes and their two renderings.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::{Field, ParameterSet};

/// Pending changes of one reconciliation, keyed by field.
///
/// Values are held in wire form. The set is rendered twice from the same
/// snapshot: [`to_api_payload`](Self::to_api_payload) for the device and
/// [`to_report`](Self::to_report) for the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeSet<F: Field> {
    values: BTreeMap<F, Value>,
}

impl<F: Field> ChangeSet<F> {
    /// Creates an empty change set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Collects every field set in `params`, in wire form.
    ///
    /// Used when a resource is created from scratch and all requested
    /// values are new.
    #[must_use]
    pub fn from_params(params: &ParameterSet<F>) -> Self {
        let values = params
            .present_fields()
            .filter_map(|field| params.get(field).map(|value| (field, value)))
            .collect();

        Self { values }
    }

    /// Records a pending change. The last write for a field wins.
    pub fn put(&mut self, field: F, value: Value) -> Option<Value> {
        self.values.insert(field, value)
    }

    /// Returns the pending wire value for `field`.
    #[must_use]
    pub fn get(&self, field: F) -> Option<&Value> {
        self.values.get(&field)
    }

    /// Returns true if nothing needs to change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the number of changed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if `field` has a pending change.
    #[must_use]
    pub fn contains(&self, field: F) -> bool {
        self.values.contains_key(&field)
    }

    /// Iterates over changed fields in declared order.
    pub fn fields(&self) -> impl Iterator<Item = F> + '_ {
        self.values.keys().copied()
    }

    /// Renders the payload for the device.
    ///
    /// Only fields in the schema's API projection are included, under their
    /// wire names and in wire form.
    #[must_use]
    pub fn to_api_payload(&self) -> Map<String, Value> {
        self.values
            .iter()
            .filter(|(field, _)| field.spec().api_attribute)
            .map(|(field, value)| (field.api_name().to_string(), value.clone()))
            .collect()
    }

    /// Renders the change summary for the caller.
    ///
    /// Every changed field appears under its human name in human form.
    /// Fields whose wire value has no human form are omitted, never null.
    #[must_use]
    pub fn to_report(&self) -> Map<String, Value> {
        self.values
            .iter()
            .filter_map(|(field, value)| {
                field
                    .spec()
                    .codec
                    .decode(value)
                    .map(|human| (field.name().to_string(), human))
            })
            .collect()
    }
}

impl<F: Field> Default for ChangeSet<F> {
    fn default() -> Self {
        Self::new()
    }
}
