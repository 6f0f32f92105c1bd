//! Build information of the orchestration service

use crate::error::Result;
use crate::http::RequestConfig;
use crate::service::ServiceClient;
use serde::{Deserialize, Serialize};

/// Revisions of the API and engine the service runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildInfo {
    pub api: Revision,
    pub engine: Revision,
}

/// A component revision
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Revision {
    pub revision: String,
}

/// Get build information
pub async fn get(client: &ServiceClient) -> Result<BuildInfo> {
    let url = client.service_url(&["build_info"])?;
    client.get(&url, RequestConfig::new()).await?.json()
}
