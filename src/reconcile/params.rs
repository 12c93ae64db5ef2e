//! Read-through parameter views over desired or observed values.

use std::collections::HashMap;

use serde_json::{Map, Value};

use super::Field;

/// Where the values of a [`ParameterSet`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Caller input in human form; reads apply the field codec.
    Desired,
    /// Device response in wire form; reads return values as stored.
    Observed,
}

/// Raw values for a fixed schema of fields.
///
/// Reads are pure: the value returned for a field depends only on the
/// stored raw value and the field's codec, so repeated reads agree.
///
/// # Example
///
/// ```
/// use bigip_conf::reconcile::ParameterSet;
/// use bigip_conf::resource::dns::DnsField;
/// use serde_json::json;
///
/// let want = ParameterSet::<DnsField>::desired(
///     json!({ "name_servers": "208.67.222.222" }).as_object().unwrap(),
/// );
/// assert_eq!(want.get(DnsField::NameServers), Some(json!(["208.67.222.222"])));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet<F: Field> {
    provenance: Provenance,
    values: HashMap<F, Value>,
}

impl<F: Field> ParameterSet<F> {
    /// Creates an empty set of the given provenance.
    #[must_use]
    pub fn new(provenance: Provenance) -> Self {
        Self {
            provenance,
            values: HashMap::new(),
        }
    }

    /// Builds a desired set from caller input keyed by human names.
    ///
    /// Keys outside the schema are ignored.
    #[must_use]
    pub fn desired(raw: &Map<String, Value>) -> Self {
        Self::collect(Provenance::Desired, raw, F::from_name)
    }

    /// Builds an observed set from a device response keyed by wire names.
    ///
    /// Keys outside the schema (`kind`, `selfLink`, ...) are ignored.
    #[must_use]
    pub fn observed(raw: &Map<String, Value>) -> Self {
        Self::collect(Provenance::Observed, raw, F::from_api_name)
    }

    fn collect(
        provenance: Provenance,
        raw: &Map<String, Value>,
        lookup: impl Fn(&str) -> Option<F>,
    ) -> Self {
        let values = raw
            .iter()
            .filter_map(|(key, value)| lookup(key).map(|field| (field, value.clone())))
            .collect();

        Self { provenance, values }
    }

    /// Stores a raw value for `field`, replacing any previous one.
    #[must_use]
    pub fn with_value(mut self, field: F, raw: impl Into<Value>) -> Self {
        self.values.insert(field, raw.into());
        self
    }

    /// Returns the provenance of this set.
    #[must_use]
    pub const fn provenance(&self) -> Provenance {
        self.provenance
    }

    /// Returns the stored raw value, before any codec is applied.
    #[must_use]
    pub fn raw(&self, field: F) -> Option<&Value> {
        self.values.get(&field)
    }

    /// Returns true if `field` holds a non-null raw value.
    #[must_use]
    pub fn is_set(&self, field: F) -> bool {
        self.raw(field).is_some_and(|v| !v.is_null())
    }

    /// Returns the value of `field` in wire form.
    ///
    /// Desired values are encoded through the field codec; observed values
    /// are already in wire form. `None` means the field is not present.
    #[must_use]
    pub fn get(&self, field: F) -> Option<Value> {
        let raw = self.raw(field)?;
        match self.provenance {
            Provenance::Desired => field.spec().codec.encode(raw),
            Provenance::Observed if raw.is_null() => None,
            Provenance::Observed => Some(raw.clone()),
        }
    }

    /// Returns the wire value of a collection `field` as a list.
    ///
    /// A scalar wire value is wrapped into a one-element list.
    #[must_use]
    pub fn get_list(&self, field: F) -> Option<Vec<Value>> {
        match self.get(field)? {
            Value::Array(items) => Some(items),
            other => Some(vec![other]),
        }
    }

    /// Returns the fields holding a non-null value, in declared order.
    pub fn present_fields(&self) -> impl Iterator<Item = F> + '_ {
        F::ALL.iter().copied().filter(|f| self.is_set(*f))
    }
}
