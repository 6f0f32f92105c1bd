//! HTTP transport
//!
//! Provides the HTTP client shared by every service handle:
//! - Token injection through the authenticator
//! - Optional client-side rate limiting
//! - Accepted status code checks and service error decoding
//!
//! Failed calls are returned to the caller as-is; nothing is retried here.

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use super::response::{api_error, RawResponse};
use crate::auth::{AuthConfig, Authenticator, Catalog, EndpointOpts};
use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Rate limiter configuration, unlimited when unset
    pub rate_limit: Option<RateLimiterConfig>,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            rate_limit: None,
            default_headers: HashMap::new(),
            user_agent: format!("openstack-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Disable rate limiting
    pub fn no_rate_limit(mut self) -> Self {
        self.config.rate_limit = None;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Request body
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// JSON document, sent with `Content-Type: application/json`
    Json(Value),
    /// Plain text, sent with `Content-Type: text/plain`
    Text(String),
}

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters, in order
    pub query: Vec<(String, String)>,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Request body
    pub body: Option<RequestBody>,
    /// Status codes accepted as success; any 2xx when unset
    pub ok_codes: Option<Vec<u16>>,
    /// Override timeout for this request
    pub timeout: Option<Duration>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add several query parameters
    #[must_use]
    pub fn queries(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    /// Set plain text body
    #[must_use]
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.body = Some(RequestBody::Text(body.into()));
        self
    }

    /// Accept only these status codes
    #[must_use]
    pub fn ok_codes(mut self, codes: &[u16]) -> Self {
        self.ok_codes = Some(codes.to_vec());
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Check a status code against the accepted set
    pub fn accepts(&self, status: u16) -> bool {
        match &self.ok_codes {
            Some(codes) => codes.contains(&status),
            None => (200..300).contains(&status),
        }
    }
}

/// HTTP client shared by all service handles
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    authenticator: Authenticator,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Create a new unauthenticated HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new unauthenticated HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        Self::with_auth(config, AuthConfig::None)
    }

    /// Create a client with authentication
    pub fn with_auth(config: HttpClientConfig, auth_config: AuthConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(Error::Http)?;

        let rate_limiter = config
            .rate_limit
            .as_ref()
            .map(RateLimiter::new)
            .transpose()?;

        let authenticator = Authenticator::with_client(auth_config, client.clone());

        Ok(Self {
            client,
            config,
            authenticator,
            rate_limiter,
        })
    }

    /// Get the authenticator
    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Service catalog of the current token
    pub async fn catalog(&self) -> Result<Catalog> {
        self.authenticator.catalog().await
    }

    /// Resolve a service endpoint from the catalog
    pub async fn endpoint_for(&self, opts: &EndpointOpts) -> Result<String> {
        let catalog = self.catalog().await?;
        catalog
            .endpoint_for(opts)
            .map(str::to_string)
            .ok_or_else(|| Error::EndpointNotFound {
                service_type: opts.service_type.clone(),
            })
    }

    /// Issue a request and read the whole response
    pub async fn request(&self, method: Method, url: &Url, config: RequestConfig) -> Result<RawResponse> {
        if let Some(ref limiter) = self.rate_limiter {
            limiter.acquire().await;
        }

        let mut req = self
            .client
            .request(method.clone(), url.clone())
            .headers(self.headers_for(&config.headers)?);

        if !config.query.is_empty() {
            req = req.query(&config.query);
        }

        match &config.body {
            Some(RequestBody::Json(body)) => {
                req = req.json(body);
            }
            Some(RequestBody::Text(body)) => {
                req = req.header(CONTENT_TYPE, "text/plain").body(body.clone());
            }
            None => {}
        }

        if let Some(timeout) = config.timeout {
            req = req.timeout(timeout);
        }

        req = self.authenticator.apply(req).await?;

        let response = req.send().await.map_err(Error::Http)?;
        let status = response.status().as_u16();
        let final_url = response.url().clone();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(Error::Http)?;

        if !config.accepts(status) {
            let err = api_error(&method, &final_url, status, &headers, &body);
            warn!(
                "{} {} returned unexpected status {}{}",
                method,
                final_url,
                status,
                err.request_id
                    .as_deref()
                    .map(|id| format!(" (request-id {id})"))
                    .unwrap_or_default()
            );
            return Err(Error::Api(err));
        }

        let raw = RawResponse {
            method,
            url: final_url,
            status,
            headers,
            body,
        };
        debug!(
            "{} {} -> {} ({} bytes, request-id {:?})",
            raw.method,
            raw.url,
            raw.status,
            raw.body.len(),
            raw.request_id()
        );
        Ok(raw)
    }

    /// `Accept: application/json`, then the configured defaults, then the
    /// request's own headers, each replacing earlier values of the same name
    fn headers_for(&self, overrides: &HashMap<String, String>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        for (key, value) in self.config.default_headers.iter().chain(overrides) {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| Error::invalid_value(key.as_str(), e.to_string()))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::invalid_value(key.as_str(), e.to_string()))?;
            headers.insert(name, value);
        }
        Ok(headers)
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("authenticated", &self.authenticator.is_enabled())
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}
