//! Domain model for mock endpoint definitions.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// HTTP methods a mock endpoint can be registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    /// Every supported method, in display order.
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
    ];

    /// The wire / display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }

    /// Case-insensitive parse of a method name.
    pub fn parse(s: &str) -> Option<HttpMethod> {
        HttpMethod::ALL
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
    }

    /// Whether a request body is meaningful for this method.
    pub fn accepts_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Patch => reqwest::Method::PATCH,
        }
    }
}

/// A mock endpoint as stored by the service.
///
/// `response_body` is kept as raw JSON: the service stores either a
/// structured value or a plain string (a JSON string on the wire), and the
/// stored form must survive a round trip untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mock {
    /// Server-assigned identifier, opaque to the client.
    pub id: String,
    pub name: String,
    pub path: String,
    pub method: HttpMethod,
    pub status_code: u16,
    #[serde(default)]
    pub response_body: Value,
    #[serde(default)]
    pub enabled: bool,
}

/// A mock's field set without `id`, submitted to create or update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockDraft {
    pub name: String,
    pub path: String,
    pub method: HttpMethod,
    pub status_code: u16,
    pub response_body: Value,
    pub enabled: bool,
}

/// Local rejection of a draft, raised before any request is issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("name is required")]
    EmptyName,
    #[error("path is required")]
    EmptyPath,
    #[error("status code {0} is outside 100-599")]
    StatusCodeOutOfRange(u16),
}

impl MockDraft {
    /// Validate the draft against the submission rules: name and path
    /// non-empty, status code within 100-599.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.name.trim().is_empty() {
            return Err(DraftError::EmptyName);
        }
        if self.path.trim().is_empty() {
            return Err(DraftError::EmptyPath);
        }
        if !(100..=599).contains(&self.status_code) {
            return Err(DraftError::StatusCodeOutOfRange(self.status_code));
        }
        Ok(())
    }
}

/// Interpret form text as a response body.
///
/// Empty (after trimming) becomes `{}` so "no body" still serializes to
/// valid JSON; anything that parses as JSON is kept structured; anything
/// else is submitted as the literal string, unchanged.
pub fn parse_response_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Object(serde_json::Map::new());
    }
    match serde_json::from_str(text) {
        Ok(value) => value,
        Err(_) => Value::String(text.to_string()),
    }
}

/// Interpret form text as an optional request body for a test call.
///
/// Unlike [`parse_response_body`] this is strict: a present body that is
/// not valid JSON is an error, and the caller must not send anything.
pub fn parse_request_body(text: &str) -> Result<Option<Value>, serde_json::Error> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(text).map(Some)
}

/// Render a stored response body for display or editing: plain strings
/// verbatim, everything else pretty-printed.
pub fn format_response_body(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn draft() -> MockDraft {
        MockDraft {
            name: "Users".to_string(),
            path: "/api/users".to_string(),
            method: HttpMethod::Get,
            status_code: 200,
            response_body: json!({"users": []}),
            enabled: true,
        }
    }

    #[test]
    fn method_parses_case_insensitively() {
        assert_eq!(HttpMethod::parse("get"), Some(HttpMethod::Get));
        assert_eq!(HttpMethod::parse(" PATCH "), Some(HttpMethod::Patch));
        assert_eq!(HttpMethod::parse("HEAD"), None);
    }

    #[test]
    fn method_serializes_upper_case() {
        assert_eq!(
            serde_json::to_value(HttpMethod::Delete).unwrap(),
            json!("DELETE")
        );
        let m: HttpMethod = serde_json::from_value(json!("POST")).unwrap();
        assert_eq!(m, HttpMethod::Post);
    }

    #[test]
    fn mock_uses_camel_case_wire_names() {
        let mock: Mock = serde_json::from_value(json!({
            "id": "m-1",
            "name": "Users",
            "path": "/api/users",
            "method": "GET",
            "statusCode": 201,
            "responseBody": {"ok": true},
            "enabled": true
        }))
        .unwrap();
        assert_eq!(mock.status_code, 201);
        assert_eq!(mock.response_body, json!({"ok": true}));

        let wire = serde_json::to_value(&mock).unwrap();
        assert!(wire.get("statusCode").is_some());
        assert!(wire.get("status_code").is_none());
    }

    #[test]
    fn mock_tolerates_missing_optional_fields() {
        let mock: Mock = serde_json::from_value(json!({
            "id": "m-2",
            "name": "Bare",
            "path": "/bare",
            "method": "GET",
            "statusCode": 200
        }))
        .unwrap();
        assert!(!mock.enabled);
        assert_eq!(mock.response_body, Value::Null);
    }

    #[test]
    fn response_body_keeps_structured_json() {
        assert_eq!(parse_response_body(r#"{"a":1}"#), json!({"a": 1}));
        assert_eq!(parse_response_body("[1,2]"), json!([1, 2]));
    }

    #[test]
    fn response_body_keeps_plain_text_verbatim() {
        assert_eq!(parse_response_body("hello"), json!("hello"));
        // Invalid JSON keeps the full original text, not a trimmed copy.
        assert_eq!(parse_response_body("  {broken"), json!("  {broken"));
    }

    #[test]
    fn empty_response_body_becomes_empty_object() {
        assert_eq!(parse_response_body(""), json!({}));
        assert_eq!(parse_response_body("   \n"), json!({}));
    }

    #[test]
    fn request_body_is_strict() {
        assert_eq!(parse_request_body("").unwrap(), None);
        assert_eq!(
            parse_request_body(r#"{"a":1}"#).unwrap(),
            Some(json!({"a": 1}))
        );
        assert!(parse_request_body("not json").is_err());
    }

    #[test]
    fn format_round_trips_both_representations() {
        assert_eq!(format_response_body(&json!("hello")), "hello");
        let pretty = format_response_body(&json!({"a": 1}));
        assert_eq!(serde_json::from_str::<Value>(&pretty).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn draft_validation_accepts_good_drafts() {
        assert_eq!(draft().validate(), Ok(()));
    }

    #[test]
    fn draft_validation_rejects_blank_fields() {
        let mut d = draft();
        d.name = "  ".to_string();
        assert_eq!(d.validate(), Err(DraftError::EmptyName));

        let mut d = draft();
        d.path = String::new();
        assert_eq!(d.validate(), Err(DraftError::EmptyPath));
    }

    #[test]
    fn draft_validation_rejects_out_of_range_status() {
        for code in [0, 99, 600, 700] {
            let mut d = draft();
            d.status_code = code;
            assert_eq!(d.validate(), Err(DraftError::StatusCodeOutOfRange(code)));
        }
        for code in [100, 599] {
            let mut d = draft();
            d.status_code = code;
            assert_eq!(d.validate(), Ok(()));
        }
    }
}
