//! reqwest-backed [`HttpClient`] for the management interface.

use std::time::Duration;

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// [`HttpClient`] talking to the device over HTTPS with reqwest.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
///
/// use bigip_conf::device::{HttpClient, HttpRequest, ReqwestClient};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ReqwestClient::with_options(Duration::from_secs(30), false)?;
/// let url = Url::parse("https://lb.example.com/mgmt/tm/sys/dns/")?;
/// let response = client.request(HttpRequest::new(http::Method::GET, url)).await?;
/// println!("{}", response.text());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Builds a client with a per-request timeout and certificate policy.
    ///
    /// Management interfaces usually present self-signed certificates;
    /// `validate_certs = false` accepts them.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn with_options(timeout: Duration, validate_certs: bool) -> Result<Self, reqwest::Error> {
        let inner = reqwest::Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(!validate_certs)
            .build()?;

        Ok(Self { inner })
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut builder = self
            .inner
            .request(req.method, req.url.as_str())
            .headers(req.headers);

        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;

        Ok(HttpResponse::new(status, body.to_vec()))
    }
}

/// Classifies a reqwest failure that produced no response.
fn transport_error(err: reqwest::Error) -> HttpError {
    if err.is_timeout() {
        HttpError::Timeout
    } else if err.is_builder() {
        HttpError::InvalidUrl(err.to_string())
    } else {
        HttpError::Connection(Box::new(err))
    }
}
