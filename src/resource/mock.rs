//! In-memory device for resource tests.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::{Map, Value, json};

use crate::device::{DeviceApi, DeviceError};

/// One request received by [`MockDevice`].
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: http::Method,
    pub path: String,
    pub body: Option<Map<String, Value>>,
}

/// Device holding objects by path.
///
/// GET returns the stored object or `NotFound`. Writes are recorded and,
/// unless a write error is scripted, succeed without changing the stored
/// objects.
#[derive(Debug, Default)]
pub struct MockDevice {
    objects: HashMap<String, Value>,
    write_error: Option<String>,
    calls: Mutex<Vec<Call>>,
}

impl MockDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(mut self, path: &str, body: Value) -> Self {
        self.objects.insert(path.to_string(), body);
        self
    }

    pub fn failing_writes(mut self, message: &str) -> Self {
        self.write_error = Some(message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| call.method != http::Method::GET)
            .collect()
    }

    fn record(&self, method: http::Method, path: &str, body: Option<&Map<String, Value>>) {
        self.calls.lock().unwrap().push(Call {
            method,
            path: path.to_string(),
            body: body.cloned(),
        });
    }

    fn write_result(&self) -> Result<Value, DeviceError> {
        match &self.write_error {
            Some(message) => Err(DeviceError::Device {
                status: http::StatusCode::BAD_REQUEST,
                message: message.clone(),
            }),
            None => Ok(json!({})),
        }
    }
}

impl DeviceApi for MockDevice {
    async fn get(&self, path: &str) -> Result<Value, DeviceError> {
        self.record(http::Method::GET, path, None);
        self.objects
            .get(path)
            .cloned()
            .ok_or_else(|| DeviceError::NotFound {
                path: path.to_string(),
            })
    }

    async fn post(&self, path: &str, body: &Map<String, Value>) -> Result<Value, DeviceError> {
        self.record(http::Method::POST, path, Some(body));
        self.write_result()
    }

    async fn patch(&self, path: &str, body: &Map<String, Value>) -> Result<Value, DeviceError> {
        self.record(http::Method::PATCH, path, Some(body));
        self.write_result()
    }

    async fn delete(&self, path: &str) -> Result<(), DeviceError> {
        self.record(http::Method::DELETE, path, None);
        self.write_result().map(drop)
    }
}
