//! Clusters
//!
//! Magnum returns single clusters as the top-level document and creates
//! them asynchronously: `create` only hands back the new uuid, and
//! [`wait_for_cluster`] follows the cluster to its final status.

use crate::error::{Error, Result};
use crate::http::{ActionOutcome, Created, RequestConfig};
use crate::pagination::{JsonPage, Listed, Pager, Paging};
use crate::service::ServiceClient;
use crate::types::{null_as_default, timestamp};
use crate::waiter::{wait_for_status, Observation, PollPolicy, WaitTarget};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::info;

use super::Link;

/// A container orchestration cluster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cluster {
    pub uuid: String,
    pub name: String,
    pub cluster_template_id: String,
    pub project_id: String,
    pub user_id: String,
    pub stack_id: String,
    pub keypair: String,
    #[serde(deserialize_with = "null_as_default")]
    pub api_address: String,
    pub coe_version: Option<String>,
    pub container_version: Option<String>,
    pub discovery_url: Option<String>,
    pub docker_volume_size: Option<u32>,
    pub flavor_id: Option<String>,
    pub master_flavor_id: Option<String>,
    pub create_timeout: Option<u32>,
    pub master_count: u32,
    pub node_count: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub master_addresses: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub node_addresses: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub labels: HashMap<String, String>,
    /// e.g. `CREATE_IN_PROGRESS`, `CREATE_COMPLETE`, `CREATE_FAILED`
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status_reason: String,
    pub health_status: Option<String>,
    pub floating_ip_enabled: Option<bool>,
    #[serde(deserialize_with = "null_as_default")]
    pub links: Vec<Link>,
    #[serde(with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Listed for Cluster {
    const COLLECTION: &'static str = "clusters";
    const PAGING: Paging = Paging::NextField("next");
}

/// A page of clusters
pub type ClusterPage = JsonPage<Cluster>;

/// Options for creating a cluster
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOpts {
    pub cluster_template_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Creation timeout on the service side, in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_timeout: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discovery_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_volume_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flavor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keypair: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub master_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub master_flavor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floating_ip_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub master_lb_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_network: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_subnet: Option<String>,
}

/// Paging and sorting for cluster listings
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListOpts {
    pub limit: Option<u32>,
    pub marker: Option<String>,
    pub sort_key: Option<String>,
    pub sort_dir: Option<String>,
}

#[derive(Deserialize)]
struct CreateResponse {
    uuid: String,
}

/// Create a cluster and return its uuid
pub async fn create(client: &ServiceClient, opts: &CreateOpts) -> Result<Created<String>> {
    if opts.cluster_template_id.is_empty() {
        return Err(Error::missing_field("cluster_template_id"));
    }

    let url = client.service_url(&["clusters"])?;
    let response = client
        .post(&url, serde_json::to_value(opts)?, RequestConfig::new().ok_codes(&[202]))
        .await?;
    let body: CreateResponse = response.json()?;
    let created = Created::from_response(body.uuid, &response);
    info!(
        "Creating cluster {} (request {})",
        created.value,
        created.request_id.as_deref().unwrap_or("-")
    );
    Ok(created)
}

/// Get a cluster
pub async fn get(client: &ServiceClient, id: &str) -> Result<Cluster> {
    let url = client.service_url(&["clusters", id])?;
    client.get(&url, RequestConfig::new()).await?.json()
}

/// List clusters
pub fn list(client: &ServiceClient, opts: &ListOpts) -> Result<Pager<ClusterPage>> {
    let url = client.service_url_with_query(&["clusters"], opts)?;
    Ok(Pager::new(client.clone(), url))
}

/// List clusters with all details
pub fn list_detail(client: &ServiceClient, opts: &ListOpts) -> Result<Pager<ClusterPage>> {
    let url = client.service_url_with_query(&["clusters", "detail"], opts)?;
    Ok(Pager::new(client.clone(), url))
}

/// Delete a cluster
pub async fn delete(client: &ServiceClient, id: &str) -> Result<ActionOutcome> {
    let url = client.service_url(&["clusters", id])?;
    client.delete(&url, RequestConfig::new().ok_codes(&[204])).await
}

/// Wait until a cluster reaches `target`.
///
/// A cluster that can no longer be found counts as deleted when waiting
/// for [`WaitTarget::Gone`]. Any `*FAILED*` status ends the wait with the
/// cluster's `status_reason`.
pub async fn wait_for_cluster(
    client: &ServiceClient,
    id: &str,
    target: &WaitTarget,
    timeout: Duration,
    policy: &PollPolicy,
) -> Result<()> {
    wait_for_status("Cluster", id, target, timeout, policy, || async move {
        let cluster = get(client, id).await?;
        Ok(Observation::new(cluster.status).with_reason(cluster.status_reason))
    })
    .await
}
