//! Per-project quotas

use crate::error::{Error, Result};
use crate::http::{Created, RequestConfig};
use crate::service::ServiceClient;
use crate::types::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A quota on one resource kind for one project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Quota {
    pub id: u64,
    pub project_id: String,
    /// Resource kind, e.g. `Cluster`
    pub resource: String,
    pub hard_limit: i64,
    #[serde(with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Options for creating a quota
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOpts {
    pub project_id: String,
    pub resource: String,
    pub hard_limit: i64,
}

/// Create a quota
pub async fn create(client: &ServiceClient, opts: &CreateOpts) -> Result<Created<Quota>> {
    if opts.resource.is_empty() {
        return Err(Error::missing_field("resource"));
    }
    if opts.project_id.is_empty() {
        return Err(Error::missing_field("project_id"));
    }

    let url = client.service_url(&["quotas"])?;
    let response = client
        .post(&url, serde_json::to_value(opts)?, RequestConfig::new().ok_codes(&[201]))
        .await?;
    let quota = response.json()?;
    Ok(Created::from_response(quota, &response))
}
