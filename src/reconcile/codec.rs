//! Bidirectional mapping between human-facing and wire representations.

use serde_json::Value;

/// Caller tokens that mean "clear this list".
const EMPTY_LIST_SENTINELS: &[&str] = &["", "none"];

/// Transform applied to a field between its human and wire forms.
///
/// Both directions are total over their domain: `null` input yields `None`
/// ("field not present") instead of an error, and inputs outside a mapping
/// also yield `None` where the mapping has no answer for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    /// Value is the same on both sides.
    Identity,

    /// Boolean-ish human value collapsed onto two wire tokens.
    ///
    /// Booleans map directly; strings listed in `truthy` map to `on`;
    /// any other non-null value maps to `off`. Write-only: decoding
    /// returns the wire token unchanged.
    EnumNormalize {
        /// Human strings that select `on`
        truthy: &'static [&'static str],
        /// Wire token for the enabled state
        on: &'static str,
        /// Wire token for the disabled state
        off: &'static str,
    },

    /// Boolean human value stored as two wire tokens, both ways.
    ///
    /// Encodes like [`Codec::EnumNormalize`]; decoding maps `on` back to
    /// `true` and `off` to `false`.
    Toggle {
        /// Human strings that select `on`
        truthy: &'static [&'static str],
        /// Wire token for the enabled state
        on: &'static str,
        /// Wire token for the disabled state
        off: &'static str,
    },

    /// List-valued field.
    ///
    /// A bare non-empty string becomes a one-element list, the empty-list
    /// sentinels (`""`, `"none"`, or a list holding only one of them)
    /// become `[]`, and other values pass through.
    CollectionNormalize,

    /// Integer human values mapped onto fixed wire strings, both ways.
    SentinelMap(&'static [(i64, &'static str)]),

    /// Object name qualified with a partition (`bar` becomes `/Common/bar`).
    ///
    /// Names that already start with `/` pass through. Decoding is identity.
    FullPath {
        /// Partition used for unqualified names
        partition: &'static str,
    },
}

impl Codec {
    /// Converts a human value into its wire form.
    #[must_use]
    pub fn encode(&self, human: &Value) -> Option<Value> {
        if human.is_null() {
            return None;
        }

        match self {
            Self::Identity => Some(human.clone()),
            Self::EnumNormalize { truthy, on, off } | Self::Toggle { truthy, on, off } => {
                let token = if is_truthy(human, truthy) { on } else { off };
                Some(Value::from(*token))
            }
            Self::CollectionNormalize => Some(normalize_list(human)),
            Self::SentinelMap(pairs) => {
                let wanted = as_int(human)?;
                pairs
                    .iter()
                    .find(|(h, _)| *h == wanted)
                    .map(|(_, wire)| Value::from(*wire))
            }
            Self::FullPath { partition } => match human {
                Value::String(name) => Some(Value::from(fq_name(partition, name))),
                other => Some(other.clone()),
            },
        }
    }

    /// Converts a wire value back into its human form.
    #[must_use]
    pub fn decode(&self, wire: &Value) -> Option<Value> {
        if wire.is_null() {
            return None;
        }

        match self {
            Self::SentinelMap(pairs) => {
                let token = wire.as_str()?;
                pairs
                    .iter()
                    .find(|(_, w)| *w == token)
                    .map(|(human, _)| Value::from(*human))
            }
            Self::Toggle { on, off, .. } => match wire.as_str()? {
                token if token == *on => Some(Value::Bool(true)),
                token if token == *off => Some(Value::Bool(false)),
                _ => None,
            },
            Self::Identity
            | Self::EnumNormalize { .. }
            | Self::CollectionNormalize
            | Self::FullPath { .. } => Some(wire.clone()),
        }
    }
}

/// Qualifies `name` with `partition` unless it is already a full path.
///
/// # Example
///
/// ```
/// use bigip_conf::reconcile::fq_name;
///
/// assert_eq!(fq_name("Common", "http2"), "/Common/http2");
/// assert_eq!(fq_name("Common", "/Tenant/http2"), "/Tenant/http2");
/// ```
#[must_use]
pub fn fq_name(partition: &str, name: &str) -> String {
    if name.starts_with('/') {
        name.to_string()
    } else {
        format!("/{partition}/{name}")
    }
}

fn is_truthy(value: &Value, truthy: &[&str]) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => truthy.contains(&s.as_str()),
        _ => false,
    }
}

fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn is_empty_sentinel(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|s| EMPTY_LIST_SENTINELS.contains(&s))
}

fn normalize_list(value: &Value) -> Value {
    match value {
        Value::String(_) if is_empty_sentinel(value) => Value::Array(Vec::new()),
        Value::String(s) => Value::Array(vec![Value::from(s.as_str())]),
        Value::Array(items) if items.len() == 1 && is_empty_sentinel(&items[0]) => {
            Value::Array(Vec::new())
        }
        other => other.clone(),
    }
}
