//! Service client
//!
//! A `ServiceClient` pairs the shared [`HttpClient`] with one service
//! endpoint. It is cheap to clone; every resource module takes one.

use crate::auth::EndpointOpts;
use crate::error::{Error, Result};
use crate::http::{ActionOutcome, HttpClient, RawResponse, RequestConfig};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

/// Handle on one service endpoint
#[derive(Debug, Clone)]
pub struct ServiceClient {
    transport: Arc<HttpClient>,
    endpoint: Url,
    resource_base: Url,
}

impl ServiceClient {
    /// Create a handle for an endpoint URL
    pub fn new(transport: Arc<HttpClient>, endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(&with_trailing_slash(endpoint))?;
        Ok(Self {
            transport,
            resource_base: endpoint.clone(),
            endpoint,
        })
    }

    /// Create a handle for the endpoint the service catalog publishes
    pub async fn from_catalog(transport: Arc<HttpClient>, opts: &EndpointOpts) -> Result<Self> {
        let endpoint = transport.endpoint_for(opts).await?;
        Self::new(transport, &endpoint)
    }

    /// Resolve resource URLs below a path of the endpoint (e.g. `v2.0/`)
    pub fn with_resource_base(mut self, base: &str) -> Result<Self> {
        self.resource_base = self.endpoint.join(&with_trailing_slash(base))?;
        Ok(self)
    }

    /// Endpoint URL, always ending in `/`
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Base URL resource paths are resolved against
    pub fn resource_base(&self) -> &Url {
        &self.resource_base
    }

    /// Shared transport
    pub fn transport(&self) -> &Arc<HttpClient> {
        &self.transport
    }

    /// Build a resource URL from path segments.
    ///
    /// Each segment is percent-encoded on its own, so identifiers and
    /// object storage names containing `/`, `?` or `&` stay one segment.
    pub fn service_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.resource_base.clone();
        url.path_segments_mut()
            .map_err(|()| {
                Error::invalid_value("endpoint", format!("{} cannot be a base URL", self.endpoint))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Build a resource URL and append options as query parameters
    pub fn service_url_with_query<T: Serialize>(&self, segments: &[&str], opts: &T) -> Result<Url> {
        let mut url = self.service_url(segments)?;
        let pairs = query_pairs(opts)?;
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    /// Issue a request
    pub async fn request(&self, method: Method, url: &Url, config: RequestConfig) -> Result<RawResponse> {
        self.transport.request(method, url, config).await
    }

    /// GET a resource
    pub async fn get(&self, url: &Url, config: RequestConfig) -> Result<RawResponse> {
        self.request(Method::GET, url, config).await
    }

    /// HEAD a resource
    pub async fn head(&self, url: &Url, config: RequestConfig) -> Result<RawResponse> {
        self.request(Method::HEAD, url, config).await
    }

    /// POST a JSON body
    pub async fn post(&self, url: &Url, body: Value, config: RequestConfig) -> Result<RawResponse> {
        self.request(Method::POST, url, config.json(body)).await
    }

    /// PUT a JSON body
    pub async fn put(&self, url: &Url, body: Value, config: RequestConfig) -> Result<RawResponse> {
        self.request(Method::PUT, url, config.json(body)).await
    }

    /// DELETE a resource
    pub async fn delete(&self, url: &Url, config: RequestConfig) -> Result<ActionOutcome> {
        Ok(self.request(Method::DELETE, url, config).await?.into_outcome())
    }
}

fn with_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    }
}

/// Serialize list or filter options into query parameters.
///
/// `None` fields are skipped and scalars are rendered as text. Arrays
/// repeat the key once per element (`tags=a&tags=b`). Keys come out in
/// lexical order.
pub fn query_pairs<T: Serialize>(opts: &T) -> Result<Vec<(String, String)>> {
    let Value::Object(map) = serde_json::to_value(opts)? else {
        return Err(Error::invalid_value("query", "options must serialize to an object"));
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items {
                    pairs.push((key.clone(), scalar(&key, item)?));
                }
            }
            other => {
                let value = scalar(&key, other)?;
                pairs.push((key, value));
            }
        }
    }
    Ok(pairs)
}

fn scalar(key: &str, value: Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(Error::invalid_value(
            key,
            format!("cannot be sent as a query parameter: {other}"),
        )),
    }
}

/// Wrap a JSON document under a single top-level key
pub(crate) fn wrap(root: &str, value: Value) -> Value {
    let mut body = serde_json::Map::with_capacity(1);
    body.insert(root.to_string(), value);
    Value::Object(body)
}

/// Serialize a create/update options struct under its root key
pub(crate) fn body_under<T: Serialize>(root: &str, opts: &T) -> Result<Value> {
    Ok(wrap(root, serde_json::to_value(opts)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Serialize;

    fn client(endpoint: &str) -> ServiceClient {
        let transport = Arc::new(HttpClient::new().unwrap());
        ServiceClient::new(transport, endpoint).unwrap()
    }

    #[test]
    fn test_service_url_with_resource_base() {
        let client = client("https://lb.example.com")
            .with_resource_base("v2.0")
            .unwrap();
        let url = client
            .service_url(&["lbaas", "loadbalancers", "36e08a3e"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://lb.example.com/v2.0/lbaas/loadbalancers/36e08a3e"
        );
    }

    #[test]
    fn test_service_url_keeps_endpoint_path() {
        let client = client("https://swift.example.com/v1/AUTH_test");
        let url = client.service_url(&["backups"]).unwrap();
        assert_eq!(url.as_str(), "https://swift.example.com/v1/AUTH_test/backups");

        let root = client.service_url(&[]).unwrap();
        assert_eq!(root.as_str(), "https://swift.example.com/v1/AUTH_test");
    }

    #[test]
    fn test_service_url_encodes_segments() {
        let client = client("https://swift.example.com/v1/AUTH_test/");
        let url = client.service_url(&["test&happy?-a/b"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://swift.example.com/v1/AUTH_test/test&happy%3F-a%2Fb"
        );
    }

    #[derive(Serialize)]
    struct Opts {
        name: Option<String>,
        limit: Option<u32>,
        admin_state_up: Option<bool>,
        tags: Vec<String>,
    }

    #[test]
    fn test_query_pairs() {
        let opts = Opts {
            name: Some("db_lb".to_string()),
            limit: Some(20),
            admin_state_up: None,
            tags: vec!["test".to_string(), "stage".to_string()],
        };
        assert_eq!(
            query_pairs(&opts).unwrap(),
            vec![
                ("limit".to_string(), "20".to_string()),
                ("name".to_string(), "db_lb".to_string()),
                ("tags".to_string(), "test".to_string()),
                ("tags".to_string(), "stage".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_pairs_rejects_non_object() {
        assert!(query_pairs(&vec![1, 2]).is_err());
    }
}
