//! Authenticator implementation
//!
//! Handles applying `X-Auth-Token` to requests and managing token refresh.

use super::types::{AuthConfig, CachedToken, Catalog, PasswordAuth, TokenBody};
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Header carrying the token on every request
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// Header carrying a newly issued token in the identity response
pub const SUBJECT_TOKEN_HEADER: &str = "X-Subject-Token";

/// Source of identity tokens
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Issue a fresh token
    async fn issue(&self, http: &Client) -> Result<CachedToken>;
}

/// A fixed, pre-issued token
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

#[async_trait]
impl TokenSource for StaticToken {
    async fn issue(&self, _http: &Client) -> Result<CachedToken> {
        Ok(CachedToken::new(self.0.clone(), None))
    }
}

#[async_trait]
impl TokenSource for PasswordAuth {
    async fn issue(&self, http: &Client) -> Result<CachedToken> {
        let url = format!("{}/auth/tokens", self.auth_url.trim_end_matches('/'));
        info!("Requesting identity token for user '{}'", self.username);

        let response = http
            .post(&url)
            .json(&password_request_body(self))
            .send()
            .await
            .map_err(Error::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::auth(format!(
                "Token request to {url} failed with status {}: {body}",
                status.as_u16()
            )));
        }

        let token = response
            .headers()
            .get(SUBJECT_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| Error::auth(format!("{SUBJECT_TOKEN_HEADER} header missing")))?;

        #[derive(Deserialize)]
        struct TokenResponse {
            token: TokenBody,
        }

        let body: TokenResponse = response.json().await.map_err(Error::Http)?;
        debug!(
            "Token issued, expires at {}, catalog has {} services",
            body.token.expires_at,
            body.token.catalog.entries.len()
        );

        Ok(CachedToken::new(token, Some(body.token.expires_at)).with_catalog(body.token.catalog))
    }
}

/// Build the identity v3 password request body
pub(crate) fn password_request_body(auth: &PasswordAuth) -> Value {
    let mut user = json!({
        "name": auth.username,
        "password": auth.password,
    });
    if let Some(domain) = &auth.user_domain_name {
        user["domain"] = json!({ "name": domain });
    }

    let mut body = json!({
        "auth": {
            "identity": {
                "methods": ["password"],
                "password": { "user": user }
            }
        }
    });

    let project = match (&auth.project_id, &auth.project_name) {
        (Some(id), _) => Some(json!({ "id": id })),
        (None, Some(name)) => {
            let mut project = json!({ "name": name });
            if let Some(domain) = auth
                .project_domain_name
                .as_ref()
                .or(auth.user_domain_name.as_ref())
            {
                project["domain"] = json!({ "name": domain });
            }
            Some(project)
        }
        (None, None) => None,
    };

    if let Some(project) = project {
        body["auth"]["scope"] = json!({ "project": project });
    }

    body
}

/// Authenticator handles applying authentication to HTTP requests
pub struct Authenticator {
    /// Where tokens come from, none for unauthenticated clients
    source: Option<Arc<dyn TokenSource>>,
    /// Cached token and catalog
    cached_token: Arc<RwLock<Option<CachedToken>>>,
    /// HTTP client for token requests
    http_client: Client,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Create an authenticator with a custom HTTP client
    pub fn with_client(config: AuthConfig, http_client: Client) -> Self {
        let source: Option<Arc<dyn TokenSource>> = match config {
            AuthConfig::None => None,
            AuthConfig::Token { token } => Some(Arc::new(StaticToken(token))),
            AuthConfig::Password(password) => Some(Arc::new(password)),
        };
        Self {
            source,
            cached_token: Arc::new(RwLock::new(None)),
            http_client,
        }
    }

    /// Create an authenticator from a custom token source
    pub fn with_source(source: Arc<dyn TokenSource>, http_client: Client) -> Self {
        Self {
            source: Some(source),
            cached_token: Arc::new(RwLock::new(None)),
            http_client,
        }
    }

    /// Apply authentication to a request builder
    pub async fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        if self.source.is_none() {
            return Ok(req);
        }
        let token = self.token().await?;
        Ok(req.header(AUTH_TOKEN_HEADER, token))
    }

    /// Get a valid token, issuing a new one if necessary
    pub async fn token(&self) -> Result<String> {
        Ok(self.current().await?.token)
    }

    /// Service catalog of the current token
    pub async fn catalog(&self) -> Result<Catalog> {
        Ok(self.current().await?.catalog)
    }

    async fn current(&self) -> Result<CachedToken> {
        let Some(source) = &self.source else {
            return Err(Error::auth("No authentication configured"));
        };

        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                if !token.is_expired() {
                    return Ok(token.clone());
                }
            }
        }

        let mut cached = self.cached_token.write().await;

        // Another task may have refreshed while we waited for the write lock
        if let Some(token) = cached.as_ref() {
            if !token.is_expired() {
                return Ok(token.clone());
            }
        }

        let new_token = source.issue(&self.http_client).await?;
        *cached = Some(new_token.clone());
        Ok(new_token)
    }

    /// Clear the cached token, forcing re-authentication on the next request
    pub async fn clear_cache(&self) {
        let mut cached = self.cached_token.write().await;
        *cached = None;
    }

    /// Check if requests are authenticated at all
    pub fn is_enabled(&self) -> bool {
        self.source.is_some()
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("enabled", &self.source.is_some())
            .finish_non_exhaustive()
    }
}
