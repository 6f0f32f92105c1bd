//! Raw responses and service error decoding

use crate::error::{ApiError, Error, Result};
use bytes::Bytes;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

/// Request ID headers, in order of preference.
/// Header names are matched case-insensitively.
const REQUEST_ID_HEADERS: &[&str] = &[
    "x-openstack-request-id",
    "x-compute-request-id",
    "x-trans-id",
];

/// A fully read HTTP response
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP method of the request
    pub method: reqwest::Method,
    /// Final URL of the request
    pub url: Url,
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Bytes,
}

impl RawResponse {
    /// Decode the whole body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Decode the value under a top-level key (e.g. `{"loadbalancer": {...}}`)
    pub fn extract<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let mut body: Value = self.json()?;
        let value = body
            .get_mut(key)
            .map(Value::take)
            .ok_or_else(|| Error::decode(format!("response body has no '{key}' field")))?;
        Ok(serde_json::from_value(value)?)
    }

    /// Body as UTF-8 text
    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.body.to_vec())
            .map_err(|e| Error::decode(format!("response body is not UTF-8: {e}")))
    }

    /// Value of a response header as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Request ID reported by the service
    pub fn request_id(&self) -> Option<String> {
        request_id(&self.headers)
    }

    /// Discard the body, keeping only the outcome
    pub fn into_outcome(self) -> ActionOutcome {
        ActionOutcome {
            status: self.status,
            request_id: self.request_id(),
        }
    }
}

/// Outcome of a delete or action call, which returns no useful body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionOutcome {
    /// HTTP status code (202 or 204 in practice)
    pub status: u16,
    /// Request ID reported by the service
    pub request_id: Option<String>,
}

/// A newly created resource and the request ID of the create call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Created<T> {
    /// What the service returned for the new resource
    pub value: T,
    /// Request ID reported by the service
    pub request_id: Option<String>,
}

impl<T> Created<T> {
    /// Pair a decoded value with the request ID of `response`
    pub fn from_response(value: T, response: &RawResponse) -> Self {
        Self {
            value,
            request_id: response.request_id(),
        }
    }

    /// Drop the request ID
    pub fn into_inner(self) -> T {
        self.value
    }
}

/// Extract the request ID from response headers
pub fn request_id(headers: &HeaderMap) -> Option<String> {
    REQUEST_ID_HEADERS
        .iter()
        .find_map(|name| headers.get(*name))
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Build an [`ApiError`] from a failed response
pub fn api_error(
    method: &reqwest::Method,
    url: &Url,
    status: u16,
    headers: &HeaderMap,
    body: &[u8],
) -> ApiError {
    let (code, message) = decode_error_body(body);
    ApiError {
        method: method.to_string(),
        url: url.to_string(),
        status,
        code,
        message,
        request_id: request_id(headers),
    }
}

/// Decode the service error body into `(code, message)`.
///
/// Known shapes:
/// - `{"NeutronError": {"type": ..., "message": ...}}`
/// - `{"faultstring": ..., "faultcode": ...}`
/// - `{"error": {"code": ..., "title": ..., "message": ...}}`
/// - `{"errors": [{"code": ..., "title": ..., "detail": ...}]}`
/// - `{"itemNotFound": {"code": 404, "message": ...}}` and other single-key faults
///
/// Anything else keeps the raw body text as the message.
pub fn decode_error_body(body: &[u8]) -> (Option<String>, String) {
    let raw = String::from_utf8_lossy(body).trim().to_string();
    let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(body) else {
        return (None, raw);
    };

    if let Some(neutron) = map.get("NeutronError") {
        return (
            str_field(neutron, "type"),
            str_field(neutron, "message").unwrap_or(raw),
        );
    }

    if let Some(fault) = map.get("faultstring").and_then(Value::as_str) {
        return (str_field_of(&map, "faultcode"), fault.to_string());
    }

    if let Some(error) = map.get("error").filter(|v| v.is_object()) {
        let code = str_field(error, "title").or_else(|| str_field(error, "code"));
        return (code, str_field(error, "message").unwrap_or(raw));
    }

    if let Some(first) = map
        .get("errors")
        .and_then(Value::as_array)
        .and_then(|errors| errors.first())
    {
        let code = str_field(first, "code").or_else(|| str_field(first, "title"));
        let message = str_field(first, "detail")
            .or_else(|| str_field(first, "title"))
            .unwrap_or(raw);
        return (code, message);
    }

    if map.len() == 1 {
        if let Some((kind, inner)) = map.iter().next() {
            if let Some(message) = str_field(inner, "message") {
                return (Some(kind.clone()), message);
            }
        }
    }

    if let Some(message) = str_field_of(&map, "message") {
        return (None, message);
    }

    (None, raw)
}

fn str_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn str_field_of(map: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}
