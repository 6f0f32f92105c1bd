//! Auth configuration types
//!
//! These types describe how the client obtains an `X-Auth-Token` and
//! hold the token and service catalog returned by the identity service.

use crate::types::{timestamp, Interface};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authentication configuration
#[derive(Debug, Clone, Default)]
pub enum AuthConfig {
    /// No authentication (no `X-Auth-Token` header is sent)
    #[default]
    None,

    /// A pre-issued token, sent as-is
    Token {
        /// The token value
        token: String,
    },

    /// Identity v3 password authentication
    Password(PasswordAuth),
}

/// Identity v3 password credentials and scope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordAuth {
    /// Identity endpoint, e.g. `https://keystone.example.com/v3`
    pub auth_url: String,
    /// User name
    pub username: String,
    /// User password
    pub password: String,
    /// Domain the user belongs to
    #[serde(default)]
    pub user_domain_name: Option<String>,
    /// Project to scope the token to (by name)
    #[serde(default)]
    pub project_name: Option<String>,
    /// Project to scope the token to (by id, takes precedence over name)
    #[serde(default)]
    pub project_id: Option<String>,
    /// Domain the project belongs to
    #[serde(default)]
    pub project_domain_name: Option<String>,
}

/// Cached token with expiration
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// The token sent as `X-Auth-Token`
    pub token: String,
    /// When the token expires
    pub expires_at: Option<DateTime<Utc>>,
    /// Service catalog issued with the token
    pub catalog: Catalog,
}

impl CachedToken {
    /// Create a new cached token
    pub fn new(token: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            token,
            expires_at,
            catalog: Catalog::default(),
        }
    }

    /// Create a token that expires in N seconds from now
    pub fn expires_in(token: String, seconds: i64) -> Self {
        let expires_at = Utc::now() + chrono::Duration::seconds(seconds);
        Self::new(token, Some(expires_at))
    }

    /// Attach a service catalog
    #[must_use]
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Check if the token is expired (with 30 second buffer)
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let buffer = chrono::Duration::seconds(30);
                Utc::now() + buffer >= expires_at
            }
            None => false, // No expiration = never expires
        }
    }
}

// ============================================================================
// Service Catalog
// ============================================================================

/// Service catalog returned with an identity v3 token
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    /// Catalog entries, one per service
    pub entries: Vec<CatalogEntry>,
}

/// One service in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Service type, e.g. `load-balancer`, `compute`, `object-store`
    #[serde(rename = "type")]
    pub service_type: String,
    /// Service name, e.g. `octavia`
    #[serde(default)]
    pub name: String,
    /// Endpoints published for the service
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

/// A published endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Endpoint ID
    #[serde(default)]
    pub id: String,
    /// Interface (public, internal, admin)
    pub interface: Interface,
    /// Region name
    #[serde(default)]
    pub region: Option<String>,
    /// Region ID
    #[serde(default)]
    pub region_id: Option<String>,
    /// Endpoint URL
    pub url: String,
}

/// Criteria for picking an endpoint out of the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointOpts {
    /// Service type to look for
    pub service_type: String,
    /// Interface, public by default
    pub interface: Interface,
    /// Region, any region when unset
    pub region: Option<String>,
}

impl EndpointOpts {
    /// Look up the public endpoint of a service type in any region
    pub fn new(service_type: impl Into<String>) -> Self {
        Self {
            service_type: service_type.into(),
            ..Default::default()
        }
    }

    /// Restrict to an interface
    #[must_use]
    pub fn interface(mut self, interface: Interface) -> Self {
        self.interface = interface;
        self
    }

    /// Restrict to a region
    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }
}

impl Catalog {
    /// Find the endpoint URL matching the given options
    pub fn endpoint_for(&self, opts: &EndpointOpts) -> Option<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.service_type == opts.service_type)
            .flat_map(|entry| entry.endpoints.iter())
            .filter(|ep| ep.interface == opts.interface)
            .find(|ep| match &opts.region {
                Some(region) => {
                    ep.region.as_deref() == Some(region.as_str())
                        || ep.region_id.as_deref() == Some(region.as_str())
                }
                None => true,
            })
            .map(|ep| ep.url.as_str())
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `token` object of an identity v3 token response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TokenBody {
    #[serde(with = "timestamp")]
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub catalog: Catalog,
}
