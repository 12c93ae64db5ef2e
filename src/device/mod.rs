//! Device layer for talking to the management API.
//!
//! Resource managers only see [`DeviceApi`]: JSON objects in and out by
//! API path. [`RestDevice`] implements it over any [`HttpClient`], adding
//! basic authentication and the device error convention; [`ReqwestClient`]
//! is the HTTPS transport used in production.

mod client;
mod error;
mod request;
mod rest;


pub use client::ReqwestClient;
pub use error::{DeviceError, HttpError};
pub use request::{HttpClient, HttpRequest, HttpResponse};
pub use rest::{DeviceApi, RestDevice, interpret};
