//! Nova-network networks (`os-networks`)

use crate::error::Result;
use crate::http::RequestConfig;
use crate::pagination::{JsonPage, Listed, Pager, Paging};
use crate::service::ServiceClient;
use crate::types::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A nova-network network
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Network {
    pub id: String,
    pub label: String,
    pub bridge: Option<String>,
    pub bridge_interface: Option<String>,
    pub broadcast: Option<String>,
    pub cidr: Option<String>,
    pub cidr_v6: Option<String>,
    pub dhcp_start: Option<String>,
    pub dns1: Option<String>,
    pub dns2: Option<String>,
    pub gateway: Option<String>,
    pub gateway_v6: Option<String>,
    pub host: Option<String>,
    pub netmask: Option<String>,
    pub netmask_v6: Option<String>,
    pub project_id: Option<String>,
    pub rxtx_base: Option<i64>,
    pub priority: Option<i64>,
    pub vlan: Option<i64>,
    pub vpn_private_address: Option<String>,
    pub vpn_public_address: Option<String>,
    pub vpn_public_port: Option<u16>,
    pub injected: bool,
    pub multi_host: bool,
    pub deleted: bool,
    #[serde(with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Listed for Network {
    const COLLECTION: &'static str = "networks";
    const PAGING: Paging = Paging::Single;
}

/// All networks, returned in a single response
pub type NetworkPage = JsonPage<Network>;

/// List networks
pub fn list(client: &ServiceClient) -> Result<Pager<NetworkPage>> {
    Ok(Pager::new(client.clone(), client.service_url(&["os-networks"])?))
}

/// Get a network
pub async fn get(client: &ServiceClient, id: &str) -> Result<Network> {
    let url = client.service_url(&["os-networks", id])?;
    client.get(&url, RequestConfig::new()).await?.extract("network")
}
