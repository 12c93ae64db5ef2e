//! Wire-level request/response types and the client seam.

use serde_json::{Map, Value};

use super::HttpError;

/// One call to the management API, ready to hand to an [`HttpClient`].
///
/// Bodies are always JSON objects; reads and deletes carry none.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// GET, POST, PATCH or DELETE
    pub method: http::Method,
    /// Absolute endpoint URL
    pub url: url::Url,
    /// Content negotiation and authorization headers
    pub headers: http::HeaderMap,
    /// Serialized JSON body
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Creates a request without headers or body.
    #[must_use]
    pub fn new(method: http::Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: http::HeaderMap::new(),
            body: None,
        }
    }

    /// Attaches `object` as the JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if `object` cannot be serialized.
    pub fn with_json(mut self, object: &Map<String, Value>) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_vec(object)?);
        self.headers.insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/json"),
        );
        Ok(self)
    }

    /// Sets `name`, replacing any earlier value.
    #[must_use]
    pub fn with_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Status and fully buffered body of a device reply.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: http::StatusCode,
    /// Raw body bytes
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response.
    #[must_use]
    pub const fn new(status: http::StatusCode, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Parses the body as JSON; an empty body reads as `null`.
    ///
    /// # Errors
    ///
    /// Returns an error if a non-empty body is not valid JSON.
    pub fn json(&self) -> Result<Value, serde_json::Error> {
        if self.body.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&self.body)
    }

    /// Best-effort text of the body for error messages.
    ///
    /// Invalid UTF-8 is replaced; an empty body yields the status line.
    #[must_use]
    pub fn text(&self) -> String {
        if self.body.is_empty() {
            return format!("HTTP {}", self.status);
        }
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Sends requests to the device.
///
/// [`RestDevice`](super::RestDevice) is generic over this trait, so device
/// access can be exercised against scripted clients in tests.
pub trait HttpClient: Send + Sync {
    /// Sends `req` and returns the buffered response.
    ///
    /// Non-2xx statuses are returned as responses, not errors.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if no response was received.
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send;
}
