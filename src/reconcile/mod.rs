//! Desired-vs-observed reconciliation core.
//!
//! This module provides:
//! - Value codecs between human and wire representations ([`Codec`])
//! - Static per-resource field schemas ([`Field`], [`FieldSpec`])
//! - Read-through parameter views ([`ParameterSet`])
//! - The difference engine ([`Difference`])
//! - Accumulated changes and their renderings ([`ChangeSet`])
//!
//! # Flow
//!
//! A desired [`ParameterSet`] (caller input) and an observed one (device
//! response) are compared field by field in schema order. Fields that need
//! a change land in a [`ChangeSet`], which renders the API payload in wire
//! form and the caller report in human form.
//!
//! Everything here is pure computation; device I/O lives in
//! [`crate::device`].

mod changes;
mod codec;
mod difference;
mod params;
mod schema;
mod state;

#[cfg(test)]
mod codec_tests;
#[cfg(test)]
mod params_tests;
#[cfg(test)]
mod state_tests;

pub use changes::ChangeSet;
pub use codec::{Codec, fq_name};
pub use difference::Difference;
pub use params::{ParameterSet, Provenance};
pub use schema::{Comparator, Field, FieldSpec};
pub use state::{ParseStateError, TargetState};
