//! Tests for `RestDevice` and response interpretation.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{Map, Value, json};

use crate::device::{
    DeviceApi, DeviceError, HttpClient, HttpError, HttpRequest, HttpResponse, RestDevice,
    interpret,
};

/// Mock HTTP client that returns a configurable sequence of responses.
#[derive(Debug)]
struct MockClient {
    responses: Mutex<Vec<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
    call_count: AtomicUsize,
}

impl MockClient {
    fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    fn json(status: http::StatusCode, body: &Value) -> Self {
        Self::new(vec![Ok(response(status, body.to_string().as_bytes()))])
    }

    fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);
        self.responses.lock().unwrap().remove(0)
    }
}

fn response(status: http::StatusCode, body: &[u8]) -> HttpResponse {
    HttpResponse::new(status, body.to_vec())
}

fn base_url() -> url::Url {
    url::Url::parse("https://lb.example.com:8443").unwrap()
}

fn payload(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

mod interpret_response {
    use super::*;

    #[test]
    fn success_returns_parsed_body() {
        let resp = response(http::StatusCode::OK, br#"{"search":["lab.local"]}"#);

        let body = interpret("/mgmt/tm/sys/dns/", &resp).unwrap();

        assert_eq!(body, json!({ "search": ["lab.local"] }));
    }

    #[test]
    fn empty_success_body_reads_as_null() {
        let resp = response(http::StatusCode::OK, b"");

        assert_eq!(interpret("/x", &resp).unwrap(), Value::Null);
    }

    #[test]
    fn not_found_is_distinct() {
        let resp = response(http::StatusCode::NOT_FOUND, br#"{"code":404}"#);

        let err = interpret("/mgmt/tm/ltm/profile/http2/~Common~foo", &resp).unwrap_err();

        assert!(err.is_not_found());
        assert!(err.to_string().contains("~Common~foo"));
    }

    #[test]
    fn error_code_uses_message_field() {
        let resp = response(
            http::StatusCode::OK,
            br#"{"code":400,"message":"01070734:3: Configuration error"}"#,
        );

        let err = interpret("/x", &resp).unwrap_err();

        assert_eq!(err.to_string(), "01070734:3: Configuration error");
    }

    #[test]
    fn error_code_without_message_uses_raw_body() {
        let raw = br#"{"code":400,"errorStack":[]}"#;
        let resp = response(http::StatusCode::OK, raw);

        let err = interpret("/x", &resp).unwrap_err();

        assert_eq!(err.to_string(), r#"{"code":400,"errorStack":[]}"#);
    }

    #[test]
    fn other_codes_in_successful_body_are_data() {
        let resp = response(http::StatusCode::OK, br#"{"code":200}"#);

        assert_eq!(interpret("/x", &resp).unwrap(), json!({ "code": 200 }));
    }

    #[test]
    fn malformed_json_is_fatal() {
        let resp = response(http::StatusCode::OK, b"<html>oops</html>");

        let err = interpret("/x", &resp).unwrap_err();

        assert!(matches!(err, DeviceError::MalformedJson(_)));
    }

    #[test]
    fn non_success_status_prefers_message() {
        let resp = response(
            http::StatusCode::UNAUTHORIZED,
            br#"{"code":401,"message":"Authentication failed."}"#,
        );

        let err = interpret("/x", &resp).unwrap_err();

        assert!(matches!(
            err,
            DeviceError::Device {
                status: http::StatusCode::UNAUTHORIZED,
                ..
            }
        ));
        assert_eq!(err.to_string(), "Authentication failed.");
    }

    #[test]
    fn non_success_status_falls_back_to_raw_text() {
        let resp = response(http::StatusCode::BAD_GATEWAY, b"upstream unavailable");

        let err = interpret("/x", &resp).unwrap_err();

        assert_eq!(err.to_string(), "upstream unavailable");
    }

    #[test]
    fn non_success_status_with_empty_body_names_status() {
        let resp = response(http::StatusCode::SERVICE_UNAVAILABLE, b"");

        let err = interpret("/x", &resp).unwrap_err();

        assert!(err.to_string().contains("503"));
    }
}

mod rest_device {
    use super::*;

    #[tokio::test]
    async fn get_joins_path_and_sends_credentials() {
        let client = MockClient::json(http::StatusCode::OK, &json!({ "include": "" }));
        let device = RestDevice::new(client, base_url())
            .with_basic_auth("admin", "secret")
            .unwrap();

        let body = device.get("/mgmt/tm/sys/dns/").await.unwrap();

        assert_eq!(body, json!({ "include": "" }));
        let requests = device.client.captured_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, http::Method::GET);
        assert_eq!(
            requests[0].url.as_str(),
            "https://lb.example.com:8443/mgmt/tm/sys/dns/"
        );
        // base64("admin:secret")
        assert_eq!(
            requests[0].headers.get(http::header::AUTHORIZATION).unwrap(),
            "Basic YWRtaW46c2VjcmV0"
        );
        assert_eq!(
            requests[0].headers.get(http::header::ACCEPT).unwrap(),
            "application/json"
        );
    }

    #[tokio::test]
    async fn requests_without_credentials_omit_authorization() {
        let client = MockClient::json(http::StatusCode::OK, &json!({}));
        let device = RestDevice::new(client, base_url());

        device.get("/mgmt/tm/sys/dns/").await.unwrap();

        let requests = device.client.captured_requests();
        assert!(!requests[0].headers.contains_key(http::header::AUTHORIZATION));
    }

    #[tokio::test]
    async fn patch_sends_json_body() {
        let client = MockClient::json(http::StatusCode::OK, &json!({}));
        let device = RestDevice::new(client, base_url());
        let body = payload(json!({ "nameServers": ["192.0.2.10"] }));

        device.patch("/mgmt/tm/sys/dns/", &body).await.unwrap();

        let requests = device.client.captured_requests();
        assert_eq!(requests[0].method, http::Method::PATCH);
        assert_eq!(
            requests[0].headers.get(http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let sent: Value = serde_json::from_slice(requests[0].body.as_ref().unwrap()).unwrap();
        assert_eq!(sent, json!({ "nameServers": ["192.0.2.10"] }));
    }

    #[tokio::test]
    async fn post_sends_json_body() {
        let client = MockClient::json(http::StatusCode::OK, &json!({ "name": "foo" }));
        let device = RestDevice::new(client, base_url());
        let body = payload(json!({ "name": "foo" }));

        let created = device
            .post("/mgmt/tm/ltm/profile/http2/", &body)
            .await
            .unwrap();

        assert_eq!(created, json!({ "name": "foo" }));
        assert_eq!(
            device.client.captured_requests()[0].method,
            http::Method::POST
        );
    }

    #[tokio::test]
    async fn delete_accepts_empty_body() {
        let client = MockClient::new(vec![Ok(response(http::StatusCode::OK, b""))]);
        let device = RestDevice::new(client, base_url());

        device
            .delete("/mgmt/tm/ltm/profile/http2/~Common~foo")
            .await
            .unwrap();

        assert_eq!(
            device.client.captured_requests()[0].method,
            http::Method::DELETE
        );
    }

    #[tokio::test]
    async fn device_error_is_not_retried() {
        let client = MockClient::new(vec![
            Ok(response(
                http::StatusCode::OK,
                br#"{"code":400,"message":"invalid"}"#,
            )),
            Ok(response(http::StatusCode::OK, b"{}")),
        ]);
        let device = RestDevice::new(client, base_url());

        let result = device.get("/mgmt/tm/sys/dns/").await;

        assert!(matches!(result, Err(DeviceError::Device { .. })));
        assert_eq!(device.client.calls(), 1);
    }

    #[tokio::test]
    async fn transport_error_is_propagated() {
        let client = MockClient::new(vec![Err(HttpError::Timeout)]);
        let device = RestDevice::new(client, base_url());

        let result = device.get("/mgmt/tm/sys/dns/").await;

        assert!(matches!(result, Err(DeviceError::Http(HttpError::Timeout))));
    }

    #[test]
    fn base_url_is_exposed() {
        let device = RestDevice::new(MockClient::new(vec![]), base_url());

        assert_eq!(device.base_url().port(), Some(8443));
    }
}
