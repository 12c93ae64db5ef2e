//! bigip-conf: declarative BIG-IP settings reconciler
//!
//! A library for converging BIG-IP device settings (DNS resolver
//! configuration, HTTP/2 profiles) to a desired state through the
//! iControl REST management API.

pub mod config;
pub mod device;
pub mod reconcile;
pub mod resource;
