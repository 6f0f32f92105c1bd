//! `clouds.yaml` configuration types

use crate::auth::{AuthConfig, EndpointOpts, PasswordAuth};
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::types::{BackoffType, Interface, OptionStringExt};
use crate::waiter::PollPolicy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

// ============================================================================
// Top-Level File
// ============================================================================

/// Contents of a `clouds.yaml` file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CloudsFile {
    /// Named cloud definitions
    #[serde(default)]
    pub clouds: HashMap<String, CloudConfig>,
}

impl CloudsFile {
    /// Get a cloud by name
    pub fn cloud(&self, name: &str) -> Result<CloudConfig> {
        self.clouds.get(name).cloned().ok_or_else(|| {
            let mut known: Vec<&str> = self.clouds.keys().map(String::as_str).collect();
            known.sort_unstable();
            Error::config(format!(
                "Cloud '{}' not found. Known clouds: {}",
                name,
                known.join(", ")
            ))
        })
    }
}

// ============================================================================
// Cloud Config
// ============================================================================

/// One cloud: credentials, endpoint selection and client tuning
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CloudConfig {
    /// Credentials
    #[serde(default)]
    pub auth: CloudAuth,

    /// Region to pick endpoints from
    #[serde(default)]
    pub region_name: Option<String>,

    /// Catalog interface, public by default
    #[serde(default)]
    pub interface: Interface,

    /// Fixed endpoint URLs by service type, bypassing the catalog
    #[serde(default)]
    pub endpoint_override: HashMap<String, String>,

    /// HTTP client tuning
    #[serde(default)]
    pub http: HttpSection,

    /// Status polling tuning
    #[serde(default)]
    pub poll: PollSection,
}

/// `auth` section of a cloud
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CloudAuth {
    #[serde(default)]
    pub auth_url: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub user_domain_name: Option<String>,
    #[serde(default)]
    pub project_domain_name: Option<String>,
    /// Pre-issued token, used instead of a password when set
    #[serde(default)]
    pub token: Option<String>,
}

/// `http` section of a cloud
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSection {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Client-side rate limit, unlimited when unset
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,
}

impl Default for HttpSection {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            user_agent: None,
            rate_limit: None,
        }
    }
}

fn default_timeout() -> u64 {
    60
}

/// `poll` section of a cloud
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollSection {
    /// Interval after the first check, in milliseconds
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// How the interval grows
    #[serde(default)]
    pub backoff: BackoffType,

    /// Upper bound for the interval, in milliseconds
    #[serde(default = "default_max_interval_ms")]
    pub max_interval_ms: u64,
}

impl Default for PollSection {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            backoff: BackoffType::default(),
            max_interval_ms: default_max_interval_ms(),
        }
    }
}

fn default_interval_ms() -> u64 {
    1000
}

fn default_max_interval_ms() -> u64 {
    60_000
}

// ============================================================================
// Conversions
// ============================================================================

impl CloudConfig {
    /// Overlay `OS_*` variables looked up through `var`
    pub fn apply_env<F>(&mut self, var: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| var(name).none_if_empty();
        let auth = &mut self.auth;

        for (name, field) in [
            ("OS_AUTH_URL", &mut auth.auth_url),
            ("OS_USERNAME", &mut auth.username),
            ("OS_PASSWORD", &mut auth.password),
            ("OS_PROJECT_NAME", &mut auth.project_name),
            ("OS_PROJECT_ID", &mut auth.project_id),
            ("OS_USER_DOMAIN_NAME", &mut auth.user_domain_name),
            ("OS_PROJECT_DOMAIN_NAME", &mut auth.project_domain_name),
            ("OS_TOKEN", &mut auth.token),
        ] {
            if let Some(value) = get(name) {
                *field = Some(value);
            }
        }

        if let Some(region) = get("OS_REGION_NAME") {
            self.region_name = Some(region);
        }
        if let Some(interface) = get("OS_INTERFACE") {
            self.interface = interface.parse()?;
        }
        Ok(())
    }

    /// Credentials for the authenticator
    pub fn auth_config(&self) -> Result<AuthConfig> {
        let auth = &self.auth;
        if let Some(token) = auth.token.clone().none_if_empty() {
            return Ok(AuthConfig::Token { token });
        }

        let auth_url = auth
            .auth_url
            .clone()
            .ok_or_else(|| Error::missing_field("auth.auth_url"))?;
        let username = auth
            .username
            .clone()
            .ok_or_else(|| Error::missing_field("auth.username"))?;
        let password = auth
            .password
            .clone()
            .ok_or_else(|| Error::missing_field("auth.password"))?;

        Ok(AuthConfig::Password(PasswordAuth {
            auth_url,
            username,
            password,
            user_domain_name: auth.user_domain_name.clone(),
            project_name: auth.project_name.clone(),
            project_id: auth.project_id.clone(),
            project_domain_name: auth.project_domain_name.clone(),
        }))
    }

    /// HTTP client configuration
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut builder =
            HttpClientConfig::builder().timeout(Duration::from_secs(self.http.timeout_seconds));
        if let Some(agent) = &self.http.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        if let Some(limit) = &self.http.rate_limit {
            builder = builder.rate_limit(limit.clone());
        }
        builder.build()
    }

    /// Poll policy for waits
    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy::builder()
            .interval(Duration::from_millis(self.poll.interval_ms))
            .backoff(self.poll.backoff)
            .max_interval(Duration::from_millis(self.poll.max_interval_ms))
            .build()
    }

    /// Catalog lookup options for a service type
    pub fn endpoint_opts(&self, service_type: &str) -> EndpointOpts {
        let opts = EndpointOpts::new(service_type).interface(self.interface);
        match &self.region_name {
            Some(region) => opts.region(region.clone()),
            None => opts,
        }
    }
}
