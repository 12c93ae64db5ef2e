//! Per-field difference engine.

use std::collections::BTreeSet;

use serde_json::Value;

use super::{ChangeSet, Comparator, Field, ParameterSet, TargetState};

/// Compares a desired [`ParameterSet`] against an observed one.
///
/// Each comparison yields `None` for "no change needed" or `Some(value)`
/// with the wire value to send. Fields are independent of each other.
#[derive(Debug, Clone, Copy)]
pub struct Difference<'a, F: Field> {
    want: &'a ParameterSet<F>,
    have: &'a ParameterSet<F>,
}

impl<'a, F: Field> Difference<'a, F> {
    /// Creates a difference engine over the two sets.
    #[must_use]
    pub const fn new(want: &'a ParameterSet<F>, have: &'a ParameterSet<F>) -> Self {
        Self { want, have }
    }

    /// Computes the change for `field` when converging to the desired value.
    ///
    /// A field the caller did not set never changes. Otherwise the field's
    /// [`Comparator`] decides:
    ///
    /// - `Equality`: change when the values differ.
    /// - `AbsentMeans(default)`: as `Equality`, with an undefined observed
    ///   value standing in for `default`.
    /// - `Set`: an empty desired list clears a non-empty observed list;
    ///   otherwise the desired list replaces the observed one unless both
    ///   hold the same elements.
    #[must_use]
    pub fn compare_for_update(&self, field: F) -> Option<Value> {
        let want = self.want.get(field)?;
        let have = self.have.get(field);

        match field.spec().comparator {
            Comparator::Equality => (have.as_ref() != Some(&want)).then_some(want),
            Comparator::AbsentMeans(default) => {
                let observed = have.unwrap_or_else(|| Value::from(default));
                (observed != want).then_some(want)
            }
            Comparator::Set => compare_sets(want, have.as_ref()),
        }
    }

    /// Computes the change for a collection `field` when removing entries.
    ///
    /// Scalar fields have no entries to remove and always yield `None`.
    /// Nothing changes when the caller named no entries or the device holds
    /// none. Naming exactly the observed entries yields `[]`. Otherwise the
    /// result is the desired entries missing from the observed ones, sorted.
    ///
    /// The subtraction runs desired minus observed, which is how deployed
    /// devices have been driven so far; observed minus desired would be the
    /// literal "remove these entries" reading.
    #[must_use]
    pub fn compare_for_absent(&self, field: F) -> Option<Value> {
        if !field.spec().is_collection() {
            return None;
        }

        let want = string_set(&self.want.get(field)?);
        let have = string_set(&self.have.get(field)?);

        if want == have {
            return Some(Value::Array(Vec::new()));
        }

        Some(want.difference(&have).map(|s| Value::from(s.as_str())).collect())
    }

    /// Runs the comparison selected by `state` over the schema.
    ///
    /// `Present` visits updatable fields, `Absent` visits absentable ones,
    /// both in declared order. The returned set is owned by the caller.
    #[must_use]
    pub fn changes(&self, state: TargetState) -> ChangeSet<F> {
        let mut changes = ChangeSet::new();

        for field in F::ALL.iter().copied() {
            let spec = field.spec();
            let change = match state {
                TargetState::Present if spec.updatable => self.compare_for_update(field),
                TargetState::Absent if spec.absentable => self.compare_for_absent(field),
                TargetState::Present | TargetState::Absent => continue,
            };

            if let Some(value) = change {
                tracing::debug!(field = spec.name, %value, %state, "field differs");
                changes.put(field, value);
            }
        }

        changes
    }
}

fn compare_sets(want: Value, have: Option<&Value>) -> Option<Value> {
    let wanted = string_set(&want);

    if wanted.is_empty() {
        // Clearing only matters when something is there to clear
        return have
            .map(string_set)
            .filter(|observed| !observed.is_empty())
            .map(|_| want);
    }

    match have {
        None => Some(want),
        Some(have) if string_set(have) == wanted => None,
        Some(_) => Some(want),
    }
}

fn string_set(value: &Value) -> BTreeSet<String> {
    match value {
        Value::Array(items) => items.iter().map(element_string).collect(),
        Value::Null => BTreeSet::new(),
        other => BTreeSet::from([element_string(other)]),
    }
}

fn element_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
