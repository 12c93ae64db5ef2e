//! Managed device resources.
//!
//! Each resource owns its field schema, input validation and the
//! read, reconcile, write control flow:
//! - DNS resolver settings ([`dns::DnsManager`])
//! - HTTP/2 protocol profiles ([`http2::Http2Manager`])

pub mod dns;
pub mod http2;

mod error;
mod outcome;

#[cfg(test)]
mod mock;

pub use error::ResourceError;
pub use outcome::{Deprecation, Outcome};
