//! HTTP client for the Fake-It management API.

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::model::{HttpMethod, Mock, MockDraft};

/// Errors that can occur when talking to the management API.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server returned {code}: {message}")]
    Server { code: u16, message: String },
    #[error("failed to decode response: {0}")]
    Parse(String),
    #[error("cannot connect to {0}")]
    Connection(String),
}

/// Acknowledgement for create/delete/toggle calls.
///
/// The service answers these with either the affected record as JSON or a
/// plain-text confirmation; both forms are kept as received.
#[derive(Debug, Clone, PartialEq)]
pub enum Ack {
    Json(Value),
    Text(String),
}

impl Ack {
    fn from_text(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => Ack::Json(value),
            Err(_) => Ack::Text(text),
        }
    }
}

/// Outcome of an ad-hoc request against a resolved mock URL.
///
/// Any HTTP status is a successful invocation (testing a 404 mock is the
/// point); only transport failures surface as errors.
#[derive(Debug, Clone, PartialEq)]
pub struct InvokeResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

/// Wire shapes accepted for the list endpoint. Anything else is a decode
/// error, never a silent empty list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MockListPayload {
    Bare(Vec<Mock>),
    Data { data: Vec<Mock> },
    Mocks { mocks: Vec<Mock> },
}

impl MockListPayload {
    fn into_mocks(self) -> Vec<Mock> {
        match self {
            MockListPayload::Bare(mocks)
            | MockListPayload::Data { data: mocks }
            | MockListPayload::Mocks { mocks } => mocks,
        }
    }
}

/// Client for the mock-management REST API.
///
/// Built once at startup and passed by reference to every call site. Holds
/// only the connection pool and the base URL; no request timeout is set, so
/// a slow call keeps its caller in a visible pending state rather than being
/// aborted mid-flight.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` is the management root, e.g. `http://localhost:8080/fake-it/v1`.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The configured management root.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List every registered mock.
    pub async fn list(&self) -> Result<Vec<Mock>, ApiError> {
        let url = format!("{}/mocks", self.base_url);
        debug!(%url, "listing mocks");
        let resp = self.send(self.client.get(&url)).await?;

        if !resp.status().is_success() {
            return self.handle_error(resp).await;
        }

        let payload: Value = resp.json().await?;
        let payload: MockListPayload = serde_json::from_value(payload)
            .map_err(|_| ApiError::Parse("mock list has an unrecognized shape".to_string()))?;
        Ok(payload.into_mocks())
    }

    /// Create a mock from a draft. The id is assigned by the server.
    pub async fn create(&self, draft: &MockDraft) -> Result<Ack, ApiError> {
        let url = format!("{}/mocks", self.base_url);
        debug!(%url, name = %draft.name, "creating mock");
        let resp = self.send(self.client.post(&url).json(draft)).await?;

        if !resp.status().is_success() {
            return self.handle_error(resp).await;
        }

        Ok(Ack::from_text(resp.text().await?))
    }

    /// Fetch one mock by id.
    pub async fn get(&self, id: &str) -> Result<Mock, ApiError> {
        let url = format!("{}/mocks/{}", self.base_url, id);
        debug!(%url, "fetching mock");
        let resp = self.send(self.client.get(&url)).await?;

        if !resp.status().is_success() {
            return self.handle_error(resp).await;
        }

        Ok(resp.json().await?)
    }

    /// Replace a mock's definition.
    pub async fn update(&self, id: &str, draft: &MockDraft) -> Result<Mock, ApiError> {
        let url = format!("{}/mocks/{}", self.base_url, id);
        debug!(%url, "updating mock");
        let resp = self.send(self.client.put(&url).json(draft)).await?;

        if !resp.status().is_success() {
            return self.handle_error(resp).await;
        }

        Ok(resp.json().await?)
    }

    /// Delete a mock by id.
    pub async fn delete(&self, id: &str) -> Result<Ack, ApiError> {
        let url = format!("{}/mocks/{}", self.base_url, id);
        debug!(%url, "deleting mock");
        let resp = self.send(self.client.delete(&url)).await?;

        if !resp.status().is_success() {
            return self.handle_error(resp).await;
        }

        Ok(Ack::from_text(resp.text().await?))
    }

    /// Flip a mock's enabled flag. The server owns the new value; the
    /// client never computes the flip itself.
    pub async fn toggle_enabled(&self, id: &str) -> Result<Ack, ApiError> {
        let url = format!("{}/mocks/{}/toggle", self.base_url, id);
        debug!(%url, "toggling mock");
        let resp = self.send(self.client.put(&url)).await?;

        if !resp.status().is_success() {
            return self.handle_error(resp).await;
        }

        Ok(Ack::from_text(resp.text().await?))
    }

    /// Issue an ad-hoc request against a fully resolved mock URL.
    ///
    /// A JSON content type is sent only when a body is present. The
    /// response body is pretty-printed when the response declares JSON,
    /// and passed through as raw text otherwise.
    pub async fn invoke(
        &self,
        url: &str,
        method: HttpMethod,
        body: Option<&Value>,
    ) -> Result<InvokeResponse, ApiError> {
        debug!(%url, %method, has_body = body.is_some(), "invoking mock");
        let mut request = self.client.request(method.into(), url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let resp = self.send(request).await?;

        let status = resp.status();
        let status_text = status
            .canonical_reason()
            .unwrap_or_default()
            .to_string();
        let is_json = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("application/json"))
            .unwrap_or(false);

        let body = if is_json {
            let value: Value = resp.json().await?;
            serde_json::to_string_pretty(&value).unwrap_or_default()
        } else {
            resp.text().await?
        };

        Ok(InvokeResponse {
            status: status.as_u16(),
            status_text,
            body,
        })
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        request.send().await.map_err(|e| {
            if e.is_connect() {
                ApiError::Connection(self.base_url.clone())
            } else {
                ApiError::Request(e)
            }
        })
    }

    /// Turn a non-2xx response into a typed failure, salvaging whatever
    /// message the server included.
    async fn handle_error<T>(&self, resp: reqwest::Response) -> Result<T, ApiError> {
        let code = resp.status().as_u16();
        let message = match resp.text().await {
            Ok(text) if !text.trim().is_empty() => extract_error_message(&text),
            _ => format!("request failed with status {code}"),
        };
        debug!(code, %message, "server error");
        Err(ApiError::Server { code, message })
    }
}

/// Pull a human-readable message out of an error body: the `message` or
/// `error` field of a JSON payload when present, the (bounded) raw text
/// otherwise.
fn extract_error_message(text: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        for key in ["message", "error"] {
            if let Some(msg) = value.get(key).and_then(Value::as_str) {
                if !msg.is_empty() {
                    return msg.to_string();
                }
            }
        }
    }
    let trimmed = text.trim();
    if trimmed.chars().count() > 200 {
        let mut bounded: String = trimmed.chars().take(200).collect();
        bounded.push_str("...");
        bounded
    } else {
        trimmed.to_string()
    }
}
