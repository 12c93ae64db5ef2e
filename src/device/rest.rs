//! Device access over the iControl REST API.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::{HeaderValue, Method};
use http::header::{ACCEPT, AUTHORIZATION};
use serde_json::{Map, Value};

use super::{DeviceError, HttpClient, HttpRequest, HttpResponse};

/// Error code the management API embeds in failed responses.
const DEVICE_ERROR_CODE: i64 = 400;

/// JSON operations against the device management API.
///
/// Paths are absolute API paths such as `/mgmt/tm/sys/dns/`. Every method
/// either returns the parsed response body or a fatal [`DeviceError`];
/// nothing is retried.
///
/// # Testing
///
/// Resource managers are generic over this trait so tests can script
/// device state without a network.
pub trait DeviceApi: Send + Sync {
    /// Reads the object at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::NotFound`] if the object does not exist, or
    /// another [`DeviceError`] if the request or response is bad.
    fn get(&self, path: &str) -> impl Future<Output = Result<Value, DeviceError>> + Send;

    /// Creates an object in the collection at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError`] if the request fails or the device rejects it.
    fn post(
        &self,
        path: &str,
        body: &Map<String, Value>,
    ) -> impl Future<Output = Result<Value, DeviceError>> + Send;

    /// Modifies the object at `path` with the given attributes.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError`] if the request fails or the device rejects it.
    fn patch(
        &self,
        path: &str,
        body: &Map<String, Value>,
    ) -> impl Future<Output = Result<Value, DeviceError>> + Send;

    /// Deletes the object at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError`] if the request fails or the device rejects it.
    fn delete(&self, path: &str) -> impl Future<Output = Result<(), DeviceError>> + Send;
}

/// [`DeviceApi`] implementation over an [`HttpClient`].
///
/// Requests are sent to `base_url` joined with the API path, with HTTP
/// basic authentication when credentials are configured.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use bigip_conf::device::{RestDevice, ReqwestClient};
/// use url::Url;
///
/// let client = ReqwestClient::with_options(Duration::from_secs(30), true).unwrap();
/// let device = RestDevice::new(client, Url::parse("https://lb.example.com:443").unwrap())
///     .with_basic_auth("admin", "secret")
///     .unwrap();
/// assert_eq!(device.base_url().host_str(), Some("lb.example.com"));
/// ```
#[derive(Debug)]
pub struct RestDevice<H> {
    client: H,
    base_url: url::Url,
    authorization: Option<HeaderValue>,
}

impl<H> RestDevice<H> {
    /// Creates a device handle without credentials.
    #[must_use]
    pub const fn new(client: H, base_url: url::Url) -> Self {
        Self {
            client,
            base_url,
            authorization: None,
        }
    }

    /// Sets HTTP basic authentication credentials.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::InvalidCredentials`] if the encoded header is
    /// not a valid header value.
    pub fn with_basic_auth(mut self, user: &str, password: &str) -> Result<Self, DeviceError> {
        let token = STANDARD.encode(format!("{user}:{password}"));
        let mut value = HeaderValue::from_str(&format!("Basic {token}"))?;
        value.set_sensitive(true);
        self.authorization = Some(value);
        Ok(self)
    }

    /// Returns the base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &url::Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<url::Url, DeviceError> {
        self.base_url
            .join(path)
            .map_err(|source| DeviceError::InvalidEndpoint {
                path: path.to_string(),
                source,
            })
    }

    fn authorize(&self, request: HttpRequest) -> HttpRequest {
        let request =
            request.with_header(ACCEPT, HeaderValue::from_static("application/json"));

        match &self.authorization {
            Some(value) => request.with_header(AUTHORIZATION, value.clone()),
            None => request,
        }
    }
}

impl<H: HttpClient> RestDevice<H> {
    async fn send(&self, path: &str, request: HttpRequest) -> Result<Value, DeviceError> {
        tracing::debug!(method = %request.method, url = %request.url, "Device request");

        let response = self.client.request(self.authorize(request)).await?;

        tracing::debug!(status = %response.status, "Device response");
        interpret(path, &response)
    }

    fn with_json(request: HttpRequest, body: &Map<String, Value>) -> Result<HttpRequest, DeviceError> {
        request.with_json(body).map_err(DeviceError::Serialize)
    }
}

impl<H: HttpClient> DeviceApi for RestDevice<H> {
    async fn get(&self, path: &str) -> Result<Value, DeviceError> {
        let request = HttpRequest::new(Method::GET, self.endpoint(path)?);
        self.send(path, request).await
    }

    async fn post(&self, path: &str, body: &Map<String, Value>) -> Result<Value, DeviceError> {
        let request = Self::with_json(HttpRequest::new(Method::POST, self.endpoint(path)?), body)?;
        self.send(path, request).await
    }

    async fn patch(&self, path: &str, body: &Map<String, Value>) -> Result<Value, DeviceError> {
        let request =
            Self::with_json(HttpRequest::new(Method::PATCH, self.endpoint(path)?), body)?;
        self.send(path, request).await
    }

    async fn delete(&self, path: &str) -> Result<(), DeviceError> {
        let request = HttpRequest::new(Method::DELETE, self.endpoint(path)?);
        self.send(path, request).await.map(drop)
    }
}

/// Turns a device response into its JSON body.
///
/// - 404 becomes [`DeviceError::NotFound`].
/// - Other non-2xx statuses become [`DeviceError::Device`].
/// - A successful body that is not JSON becomes [`DeviceError::MalformedJson`].
/// - A JSON body with `"code": 400` becomes [`DeviceError::Device`].
///
/// Error messages prefer the body's `message` field and fall back to the
/// raw body text. An empty successful body reads as `null`.
///
/// # Errors
///
/// Returns the [`DeviceError`] matching the cases above.
pub fn interpret(path: &str, response: &HttpResponse) -> Result<Value, DeviceError> {
    let status = response.status;

    if status == http::StatusCode::NOT_FOUND {
        return Err(DeviceError::NotFound {
            path: path.to_string(),
        });
    }

    let parsed = response.json();

    if !response.is_success() {
        let message = parsed
            .ok()
            .as_ref()
            .and_then(message_of)
            .unwrap_or_else(|| response.text());
        return Err(DeviceError::Device { status, message });
    }

    let body = parsed.map_err(DeviceError::MalformedJson)?;

    if body.get("code").and_then(Value::as_i64) == Some(DEVICE_ERROR_CODE) {
        let message = message_of(&body).unwrap_or_else(|| response.text());
        return Err(DeviceError::Device { status, message });
    }

    Ok(body)
}

fn message_of(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .map(ToString::to_string)
}

#[cfg(test)]
#[path = "rest_tests.rs"]
mod tests;
