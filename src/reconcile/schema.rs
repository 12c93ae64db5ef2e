//! Static field schemas.
//!
//! Each resource declares a `Copy` enum of its fields and implements
//! [`Field`] for it. Typed keys make access to an undeclared field a
//! compile error rather than a runtime lookup failure.

use std::fmt;
use std::hash::Hash;

use super::Codec;

/// How desired and observed values of a field are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    /// Plain equality; an undefined observed value always differs.
    Equality,

    /// Equality, except that an undefined observed value is treated as
    /// the given wire default.
    AbsentMeans(&'static str),

    /// Order-insensitive comparison of list elements.
    Set,
}

/// Descriptor of one field of a resource schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Human-facing name, used for caller input and reports
    pub name: &'static str,
    /// Key used on the wire
    pub api_name: &'static str,
    /// Transform between human and wire forms
    pub codec: Codec,
    /// Comparison used by ensure-present reconciliation
    pub comparator: Comparator,
    /// Participates in ensure-present reconciliation
    pub updatable: bool,
    /// Participates in ensure-absent reconciliation
    pub absentable: bool,
    /// Included in the API payload projection
    pub api_attribute: bool,
}

impl FieldSpec {
    /// Describes an updatable scalar compared by equality.
    #[must_use]
    pub const fn scalar(name: &'static str, api_name: &'static str) -> Self {
        Self {
            name,
            api_name,
            codec: Codec::Identity,
            comparator: Comparator::Equality,
            updatable: true,
            absentable: false,
            api_attribute: true,
        }
    }

    /// Describes an updatable list compared as a set.
    #[must_use]
    pub const fn collection(name: &'static str, api_name: &'static str) -> Self {
        Self {
            name,
            api_name,
            codec: Codec::CollectionNormalize,
            comparator: Comparator::Set,
            updatable: true,
            absentable: false,
            api_attribute: true,
        }
    }

    /// Sets the codec.
    #[must_use]
    pub const fn with_codec(mut self, codec: Codec) -> Self {
        self.codec = codec;
        self
    }

    /// Sets the comparator.
    #[must_use]
    pub const fn with_comparator(mut self, comparator: Comparator) -> Self {
        self.comparator = comparator;
        self
    }

    /// Marks the field as taking part in ensure-absent reconciliation.
    #[must_use]
    pub const fn absentable(mut self) -> Self {
        self.absentable = true;
        self
    }

    /// Excludes the field from the API payload projection.
    ///
    /// Such fields are written through a separate endpoint by their
    /// resource manager.
    #[must_use]
    pub const fn outside_payload(mut self) -> Self {
        self.api_attribute = false;
        self
    }

    /// Returns true if the field holds a list.
    #[must_use]
    pub fn is_collection(&self) -> bool {
        self.comparator == Comparator::Set
    }
}

/// A field of a resource schema.
///
/// `ALL` lists every field in declared order; reconciliation visits fields
/// in that order. The derived `Ord` of implementors must agree with it.
pub trait Field: Copy + Eq + Ord + Hash + fmt::Debug + Send + Sync + 'static {
    /// Every field, in declared order.
    const ALL: &'static [Self];

    /// Returns the static descriptor of this field.
    fn spec(self) -> &'static FieldSpec;

    /// Human-facing name.
    fn name(self) -> &'static str {
        self.spec().name
    }

    /// Wire name.
    fn api_name(self) -> &'static str {
        self.spec().api_name
    }

    /// Looks up a field by its human-facing name.
    #[must_use]
    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }

    /// Looks up a field by its wire name.
    #[must_use]
    fn from_api_name(api_name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.api_name() == api_name)
    }
}
