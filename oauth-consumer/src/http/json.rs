//! Open JSON mapping returned by token and resource endpoints.

use std::ops::Deref;

use log::debug;
use secrecy::SecretString;
use serde_json::Value;

use crate::error::{parse_error, Error, ParseErrorKind};

/// String keys mapped to arbitrary JSON values, kept exactly as the provider sent them.
pub type JsonObject = serde_json::Map<String, Value>;

/// A provider response: the HTTP status next to the parsed JSON object.
///
/// The status is reported separately so callers can tell a provider-side rejection
/// (e.g. `400` with `{"error": "invalid_grant"}`) from a successful payload. No key in
/// `body` is assumed to exist.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonResponse {
    pub status: u16,
    pub body: JsonObject,
}

/// Error fields defined by RFC 6749 section 5.2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    pub error: String,
    pub description: Option<String>,
}

impl JsonResponse {
    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Consume the response, keeping only the parsed mapping.
    pub fn into_body(self) -> JsonObject {
        self.body
    }

    /// Read a string value under `key` as a secret (e.g. `"access_token"`).
    pub fn token(&self, key: &str) -> Option<SecretString> {
        self.body
            .get(key)
            .and_then(Value::as_str)
            .map(|token| SecretString::new(token.to_string()))
    }

    /// The provider's `error` / `error_description` pair, if present.
    pub fn provider_error(&self) -> Option<ProviderError> {
        let error = self.body.get("error")?.as_str()?.to_string();
        let description = self
            .body
            .get("error_description")
            .and_then(Value::as_str)
            .map(str::to_string);
        Some(ProviderError { error, description })
    }
}

impl Deref for JsonResponse {
    type Target = JsonObject;

    fn deref(&self) -> &Self::Target {
        &self.body
    }
}

/// Read the full body and parse it as a JSON object.
///
/// Any status is accepted; only the body decides success here.
pub(crate) fn read_json(response: reqwest::blocking::Response) -> Result<JsonResponse, Error> {
    let status = response.status().as_u16();
    let bytes = response.bytes()?;
    parse_body(status, &bytes)
}

fn parse_body(status: u16, bytes: &[u8]) -> Result<JsonResponse, Error> {
    match serde_json::from_slice::<Value>(bytes)? {
        Value::Object(body) => {
            debug!("Parsed JSON object with {} keys (status {})", body.len(), status);
            Ok(JsonResponse { status, body })
        }
        other => Err(parse_error(
            ParseErrorKind::NotAnObject,
            &format!("expected a JSON object, got {}", json_type(&other)),
        )),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
