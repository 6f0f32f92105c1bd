//! Cached assets of a CDN service

use crate::error::{Error, Result};
use crate::http::{ActionOutcome, RequestConfig};
use crate::service::ServiceClient;
use tracing::info;

/// Which cached assets to purge
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteOpts {
    /// Purge every asset of the service
    pub all: bool,
    /// Purge the asset at this relative URL
    pub url: Option<String>,
}

impl DeleteOpts {
    /// Purge every asset
    pub fn all() -> Self {
        Self {
            all: true,
            url: None,
        }
    }

    /// Purge one asset
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            all: false,
            url: Some(url.into()),
        }
    }
}

/// Purge cached assets of a service
pub async fn delete(client: &ServiceClient, service_id: &str, opts: &DeleteOpts) -> Result<ActionOutcome> {
    if opts.all && opts.url.is_some() {
        return Err(Error::invalid_value("url", "cannot be combined with all"));
    }

    let mut url = client.service_url(&["services", service_id, "assets"])?;
    if opts.all {
        url.query_pairs_mut().append_pair("all", "true");
    } else if let Some(asset) = &opts.url {
        url.query_pairs_mut().append_pair("url", asset);
    }

    let outcome = client
        .delete(&url, RequestConfig::new().ok_codes(&[202]))
        .await?;
    info!("Purge of service {} assets accepted", service_id);
    Ok(outcome)
}
