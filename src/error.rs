//! Error types for the OpenStack client
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// The main error type for the OpenStack client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    #[error("No endpoint of type '{service_type}' found in the service catalog")]
    EndpointNotFound { service_type: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    // ============================================================================
    // Polling Errors
    // ============================================================================
    #[error("Timed out after {elapsed:?} (limit {timeout:?}) waiting for condition")]
    PollTimeout { elapsed: Duration, timeout: Duration },

    #[error("{kind} {id} FAILED. Status={status} StatusReason={reason}")]
    ResourceFailed {
        kind: String,
        id: String,
        status: String,
        reason: String,
    },

    // ============================================================================
    // Pagination Errors
    // ============================================================================
    #[error("Pagination loop detected: {url} was already fetched")]
    PaginationLoop { url: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a resource failure error
    pub fn resource_failed(
        kind: impl Into<String>,
        id: impl Into<String>,
        status: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::ResourceFailed {
            kind: kind.into(),
            id: id.into(),
            status: status.into(),
            reason: reason.into(),
        }
    }

    /// HTTP status of a remote error, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(api) => Some(api.status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this error is a remote 404
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Check if this error is a polling timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::PollTimeout { .. })
    }

    /// Request ID reported by the service, if any
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Error::Api(api) => api.request_id.as_deref(),
            _ => None,
        }
    }
}

/// An error reported by a remote service
///
/// Carries the HTTP status, the service's own error code and message when
/// the body could be decoded, and the request ID header when present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP method of the failed request
    pub method: String,
    /// URL of the failed request
    pub url: String,
    /// HTTP status code
    pub status: u16,
    /// Remote error code or type (e.g. "itemNotFound", "NetworkNotFound")
    pub code: Option<String>,
    /// Remote error message, or the raw body if it could not be decoded
    pub message: String,
    /// Value of the `X-OpenStack-Request-Id` response header
    pub request_id: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Expected success status for {} {}, got {}",
            self.method, self.url, self.status
        )?;
        if let Some(code) = &self.code {
            write!(f, " ({code})")?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(id) = &self.request_id {
            write!(f, " [request-id: {id}]")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Result type alias for the OpenStack client
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: u16) -> ApiError {
        ApiError {
            method: "GET".to_string(),
            url: "http://localhost/v2.0/lbaas/loadbalancers/abc".to_string(),
            status,
            code: Some("itemNotFound".to_string()),
            message: "Load Balancer abc not found.".to_string(),
            request_id: Some("req-123".to_string()),
        }
    }

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("cluster_template_id");
        assert_eq!(
            err.to_string(),
            "Missing required field: cluster_template_id"
        );

        let err = Error::resource_failed("Cluster", "c-1", "CREATE_FAILED", "quota exceeded");
        assert_eq!(
            err.to_string(),
            "Cluster c-1 FAILED. Status=CREATE_FAILED StatusReason=quota exceeded"
        );
    }

    #[test]
    fn test_api_error_display() {
        let err = Error::from(api_error(404));
        assert_eq!(
            err.to_string(),
            "Expected success status for GET http://localhost/v2.0/lbaas/loadbalancers/abc, \
             got 404 (itemNotFound): Load Balancer abc not found. [request-id: req-123]"
        );
    }

    #[test]
    fn test_is_not_found() {
        assert!(Error::from(api_error(404)).is_not_found());
        assert!(!Error::from(api_error(409)).is_not_found());
        assert!(!Error::config("x").is_not_found());
    }

    #[test]
    fn test_request_id() {
        assert_eq!(Error::from(api_error(500)).request_id(), Some("req-123"));
        assert_eq!(Error::config("x").request_id(), None);
    }

    #[test]
    fn test_timeout_is_distinct_from_failure() {
        let timeout = Error::PollTimeout {
            elapsed: Duration::from_secs(301),
            timeout: Duration::from_secs(300),
        };
        assert!(timeout.is_timeout());
        assert!(!Error::resource_failed("Cluster", "c", "CREATE_FAILED", "r").is_timeout());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
