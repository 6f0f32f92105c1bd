//! Cloud configuration
//!
//! Loads named clouds from `clouds.yaml` and turns them into a ready
//! transport and service handles.
//!
//! # Overview
//!
//! The config module provides:
//! - `CloudsFile` / `CloudConfig` - the `clouds.yaml` document
//! - File discovery (explicit path, `./clouds.yaml`, `~/.config/openstack/clouds.yaml`)
//! - `OS_*` environment overrides
//! - Builders for [`HttpClientConfig`](crate::http::HttpClientConfig) and
//!   [`PollPolicy`](crate::waiter::PollPolicy)

mod loader;
mod types;

pub use loader::{find_clouds_file, load_cloud, load_clouds_file, load_clouds_from_str, search_paths};
pub use types::{CloudAuth, CloudConfig, CloudsFile, HttpSection, PollSection};

use crate::error::Result;
use crate::http::HttpClient;
use crate::service::ServiceClient;
use std::sync::Arc;

impl CloudConfig {
    /// Build the shared transport for this cloud
    pub fn connect(&self) -> Result<Arc<HttpClient>> {
        Ok(Arc::new(HttpClient::with_auth(
            self.http_client_config(),
            self.auth_config()?,
        )?))
    }

    /// Handle on a service, from `endpoint_override` or the catalog
    pub async fn service_client(
        &self,
        transport: &Arc<HttpClient>,
        service_type: &str,
    ) -> Result<ServiceClient> {
        match self.endpoint_override.get(service_type) {
            Some(url) => ServiceClient::new(Arc::clone(transport), url),
            None => {
                ServiceClient::from_catalog(Arc::clone(transport), &self.endpoint_opts(service_type))
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests;
