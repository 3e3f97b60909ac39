use std::time::Duration;

use bytes::Bytes;
use parking_lot::Mutex;
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::types::Role;
use crate::auth::SessionStore;
use crate::utils::ApiError;

/// Single point of contact with the backend. Every outbound request goes
/// through here so credential attachment and error normalization stay
/// uniform across the whole application.
///
/// The gateway owns the token half of the persisted session record; the
/// identity half belongs to the session manager.
pub struct ApiGateway {
    client: Client,
    base_url: String,
    store: SessionStore,
    token: Mutex<Option<String>>,
}

impl ApiGateway {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        store: SessionStore,
    ) -> anyhow::Result<Self> {
        let base_url: String = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url,
            store,
            token: Mutex::new(None),
        })
    }

    /// Store the bearer credential in memory and in the persisted record.
    /// The record is advisory, so a failed write is logged and ignored.
    pub fn set_credential(&self, token: &str) {
        *self.token.lock() = Some(token.to_string());
        if let Err(err) = self.store.set_token(token) {
            warn!("failed to persist credential: {}", err);
        }
    }

    /// Current credential, hydrated from the persisted record on first
    /// access. `None` when neither memory nor storage holds one.
    pub fn credential(&self) -> Option<String> {
        let mut token = self.token.lock();
        if token.is_none() {
            *token = self.store.token();
        }
        token.clone()
    }

    /// Drop the credential from memory and the persisted record. Idempotent.
    pub fn clear_credential(&self) {
        *self.token.lock() = None;
        if let Err(err) = self.store.clear_token() {
            warn!("failed to clear persisted credential: {}", err);
        }
    }

    /// Generic JSON exchange with the backend.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        self.request_with_headers(method, endpoint, body, &[]).await
    }

    /// `request` with extra headers, attached after the defaults so callers
    /// can override them.
    pub async fn request_with_headers<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let response = self.send(method, endpoint, body, headers).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(error_from_response(status, response).await);
        }
        let body = response.text().await.map_err(ApiError::Network)?;
        serde_json::from_str(&body).map_err(ApiError::Decode)
    }

    /// Same credential and error rules as `request`, but the success body
    /// comes back as raw bytes. Used for report downloads.
    pub async fn request_binary(
        &self,
        endpoint: &str,
        body: Option<Value>,
    ) -> Result<Bytes, ApiError> {
        let response = self.send(Method::POST, endpoint, body, &[]).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(error_from_response(status, response).await);
        }
        response.bytes().await.map_err(ApiError::Network)
    }

    /// Validation probe: one call against the role's probe endpoint to
    /// confirm the stored credential is still accepted. The body is
    /// discarded.
    pub async fn validate(&self, role: Role) -> Result<(), ApiError> {
        self.request::<Value>(Method::GET, role.probe_endpoint(), None)
            .await
            .map(|_| ())
    }

    async fn send(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> Result<Response, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method, &url)
            .header("Content-Type", "application/json");
        if let Some(token) = self.credential() {
            request = request.header("Authorization", format!("Bearer {}", token));
        }
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        request.send().await.map_err(ApiError::Network)
    }
}

/// Pull a human-readable message out of a failed response. The backend
/// sends `{"error": "..."}` on failure; anything else falls back to a
/// synthesized message, so a malformed error body can never break the
/// error-reporting path itself.
async fn error_from_response(status: StatusCode, response: Response) -> ApiError {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: Option<String>,
    }

    let fallback = || format!("HTTP error {}", status.as_u16());
    let message = match response.text().await {
        Ok(body) => serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|parsed| parsed.error)
            .unwrap_or_else(fallback),
        Err(_) => fallback(),
    };

    ApiError::Request {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testutil::{CannedResponse, StubServer};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn gateway(base_url: &str, dir: &TempDir) -> ApiGateway {
        let store = SessionStore::open(dir.path()).unwrap();
        ApiGateway::new(base_url, Duration::from_secs(5), store).unwrap()
    }

    #[tokio::test]
    async fn test_bearer_header_attached_when_credential_held() {
        let server = StubServer::spawn(vec![CannedResponse::json(200, r#"{"ok":true}"#)]);
        let dir = TempDir::new().unwrap();
        let gateway = gateway(&server.url(), &dir);

        gateway.set_credential("tok-123");
        let _: Value = gateway
            .request(Method::GET, "/society/profile", None)
            .await
            .unwrap();

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "GET");
        assert_eq!(requests[0].path, "/society/profile");
        assert_eq!(requests[0].header("authorization"), Some("Bearer tok-123"));
        assert_eq!(requests[0].header("content-type"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_extra_headers_are_forwarded() {
        let server = StubServer::spawn(vec![CannedResponse::json(200, r#"{"ok":true}"#)]);
        let dir = TempDir::new().unwrap();
        let gateway = gateway(&server.url(), &dir);

        let _: Value = gateway
            .request_with_headers(
                Method::GET,
                "/health",
                None,
                &[("X-Request-Id", "req-42")],
            )
            .await
            .unwrap();

        let requests = server.requests();
        assert_eq!(requests[0].header("x-request-id"), Some("req-42"));
    }

    #[tokio::test]
    async fn test_no_credential_omits_authorization_entirely() {
        let server = StubServer::spawn(vec![CannedResponse::json(200, r#"{"ok":true}"#)]);
        let dir = TempDir::new().unwrap();
        let gateway = gateway(&server.url(), &dir);

        let _: Value = gateway.request(Method::GET, "/health", None).await.unwrap();

        let requests = server.requests();
        assert_eq!(requests[0].header("authorization"), None);
    }

    #[tokio::test]
    async fn test_error_body_message_surfaces() {
        let server = StubServer::spawn(vec![CannedResponse::json(
            401,
            r#"{"error":"Invalid credentials"}"#,
        )]);
        let dir = TempDir::new().unwrap();
        let gateway = gateway(&server.url(), &dir);

        let err = gateway
            .request::<Value>(Method::POST, "/admin/login", Some(serde_json::json!({})))
            .await
            .unwrap_err();
        match err {
            ApiError::Request { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid credentials");
            }
            other => panic!("expected Request error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_error_body_falls_back_to_status() {
        let server = StubServer::spawn(vec![
            CannedResponse::json(500, "<html>oops</html>"),
            CannedResponse::json(404, r#"{"unrelated":1}"#),
        ]);
        let dir = TempDir::new().unwrap();
        let gateway = gateway(&server.url(), &dir);

        let err = gateway
            .request::<Value>(Method::GET, "/admin/stats", None)
            .await
            .unwrap_err();
        match err {
            ApiError::Request { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "HTTP error 500");
            }
            other => panic!("expected Request error, got {:?}", other),
        }

        // An error body that is valid JSON but has no `error` field gets the
        // same synthesized message.
        let err = gateway
            .request::<Value>(Method::GET, "/admin/stats", None)
            .await
            .unwrap_err();
        match err {
            ApiError::Request { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "HTTP error 404");
            }
            other => panic!("expected Request error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_json_success_body_is_decode_error() {
        let server = StubServer::spawn(vec![CannedResponse::json(200, "not json at all")]);
        let dir = TempDir::new().unwrap();
        let gateway = gateway(&server.url(), &dir);

        let err = gateway
            .request::<Value>(Method::GET, "/society/profile", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let dir = TempDir::new().unwrap();
        // Port 9 (discard) is never listening in the test environment.
        let gateway = gateway("http://127.0.0.1:9", &dir);

        let err = gateway
            .request::<Value>(Method::GET, "/health", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[tokio::test]
    async fn test_binary_payload_round_trip() {
        let payload = vec![0x50u8, 0x4b, 0x03, 0x04, 0xff, 0x00];
        let server = StubServer::spawn(vec![CannedResponse::binary(200, &payload)]);
        let dir = TempDir::new().unwrap();
        let gateway = gateway(&server.url(), &dir);

        gateway.set_credential("tok-9");
        let bytes = gateway
            .request_binary("/admin/report/excel", Some(serde_json::json!({})))
            .await
            .unwrap();
        assert_eq!(bytes.as_ref(), payload.as_slice());

        let requests = server.requests();
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].body, "{}");
        assert_eq!(requests[0].header("authorization"), Some("Bearer tok-9"));
    }

    #[tokio::test]
    async fn test_credential_hydrates_lazily_from_store() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();
        store.set_token("persisted-token").unwrap();

        let gateway = ApiGateway::new("http://127.0.0.1:9", Duration::from_secs(5), store).unwrap();
        assert_eq!(gateway.credential().as_deref(), Some("persisted-token"));

        gateway.clear_credential();
        assert_eq!(gateway.credential(), None);
        // Clearing twice is fine.
        gateway.clear_credential();
        assert_eq!(gateway.credential(), None);
    }
}
