//! Cluster templates

use crate::error::{Error, Result};
use crate::http::{ActionOutcome, Created, RequestConfig};
use crate::pagination::{JsonPage, Listed, Pager, Paging};
use crate::service::ServiceClient;
use crate::types::{null_as_default, timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

use super::Link;

/// A cluster template
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterTemplate {
    pub uuid: String,
    pub name: String,
    pub project_id: String,
    pub user_id: String,
    /// Container orchestration engine: `kubernetes`, `swarm` or `mesos`
    pub coe: String,
    pub image_id: String,
    pub cluster_distro: Option<String>,
    pub apiserver_port: Option<u16>,
    pub dns_nameserver: Option<String>,
    pub docker_storage_driver: Option<String>,
    pub docker_volume_size: Option<u32>,
    pub external_network_id: Option<String>,
    pub fixed_network: Option<String>,
    pub fixed_subnet: Option<String>,
    pub flavor_id: Option<String>,
    pub master_flavor_id: Option<String>,
    pub keypair_id: Option<String>,
    pub http_proxy: Option<String>,
    pub https_proxy: Option<String>,
    pub no_proxy: Option<String>,
    pub insecure_registry: Option<String>,
    pub network_driver: Option<String>,
    pub volume_driver: Option<String>,
    /// `vm` or `bm`
    pub server_type: Option<String>,
    pub floating_ip_enabled: bool,
    pub master_lb_enabled: bool,
    pub public: bool,
    pub hidden: bool,
    pub registry_enabled: bool,
    pub tls_disabled: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub labels: HashMap<String, String>,
    #[serde(deserialize_with = "null_as_default")]
    pub links: Vec<Link>,
    #[serde(with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Listed for ClusterTemplate {
    const COLLECTION: &'static str = "clustertemplates";
    const PAGING: Paging = Paging::NextField("next");
}

/// A page of cluster templates
pub type ClusterTemplatePage = JsonPage<ClusterTemplate>;

/// Options for creating a cluster template.
///
/// `coe` and `image_id` are required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOpts {
    pub coe: String,
    pub image_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apiserver_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_distro: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_nameserver: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_storage_driver: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_volume_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_network_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_network: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_subnet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flavor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub master_flavor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keypair_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_proxy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub https_proxy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_proxy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_driver: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_driver: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floating_ip_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub master_lb_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_disabled: Option<bool>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,
}

/// Paging and sorting for cluster template listings
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListOpts {
    pub limit: Option<u32>,
    pub marker: Option<String>,
    pub sort_key: Option<String>,
    pub sort_dir: Option<String>,
}

/// Create a cluster template
pub async fn create(client: &ServiceClient, opts: &CreateOpts) -> Result<Created<ClusterTemplate>> {
    if opts.coe.is_empty() {
        return Err(Error::missing_field("coe"));
    }
    if opts.image_id.is_empty() {
        return Err(Error::missing_field("image_id"));
    }

    let url = client.service_url(&["clustertemplates"])?;
    let response = client
        .post(&url, serde_json::to_value(opts)?, RequestConfig::new().ok_codes(&[201]))
        .await?;
    let template: ClusterTemplate = response.json()?;
    info!("Created cluster template {} ({})", template.name, template.uuid);
    Ok(Created::from_response(template, &response))
}

/// Get a cluster template
pub async fn get(client: &ServiceClient, id: &str) -> Result<ClusterTemplate> {
    let url = client.service_url(&["clustertemplates", id])?;
    client.get(&url, RequestConfig::new()).await?.json()
}

/// List cluster templates
pub fn list(client: &ServiceClient, opts: &ListOpts) -> Result<Pager<ClusterTemplatePage>> {
    let url = client.service_url_with_query(&["clustertemplates"], opts)?;
    Ok(Pager::new(client.clone(), url))
}

/// Delete a cluster template
pub async fn delete(client: &ServiceClient, id: &str) -> Result<ActionOutcome> {
    let url = client.service_url(&["clustertemplates", id])?;
    client.delete(&url, RequestConfig::new().ok_codes(&[204])).await
}
