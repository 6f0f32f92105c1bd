//! Network IP availability (`network-ip-availabilities`)
//!
//! IP counts of IPv6 subnets do not fit in 64 bits, so bodies are decoded
//! straight from the response bytes into `u128` rather than through
//! `serde_json::Value`.

use crate::error::Result;
use crate::http::{RawResponse, RequestConfig};
use crate::pagination::{NextLink, Page, Pager};
use crate::service::ServiceClient;
use serde::{Deserialize, Serialize};

const COLLECTION_PATH: &str = "network-ip-availabilities";

/// IP usage of one network
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkIpAvailability {
    pub network_id: String,
    pub network_name: String,
    pub project_id: String,
    pub tenant_id: String,
    #[serde(rename = "subnet_ip_availability")]
    pub subnets: Vec<SubnetIpAvailability>,
    pub total_ips: u128,
    pub used_ips: u128,
}

/// IP usage of one subnet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubnetIpAvailability {
    pub subnet_id: String,
    pub subnet_name: String,
    pub cidr: String,
    pub ip_version: u8,
    pub total_ips: u128,
    pub used_ips: u128,
}

impl NetworkIpAvailability {
    /// Addresses still free across all subnets
    pub fn free_ips(&self) -> u128 {
        self.total_ips.saturating_sub(self.used_ips)
    }
}

/// Filters for listing IP availabilities
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListOpts {
    pub network_id: Option<String>,
    pub network_name: Option<String>,
    pub ip_version: Option<u8>,
    pub project_id: Option<String>,
}

#[derive(Deserialize)]
struct ListBody {
    #[serde(default)]
    network_ip_availabilities: Option<Vec<NetworkIpAvailability>>,
}

#[derive(Deserialize)]
struct GetBody {
    network_ip_availability: NetworkIpAvailability,
}

/// The full IP availability listing, returned in a single response
#[derive(Debug, Clone)]
pub struct NetworkIpAvailabilityPage {
    response: RawResponse,
    items: Vec<NetworkIpAvailability>,
}

impl Page for NetworkIpAvailabilityPage {
    type Item = NetworkIpAvailability;

    fn from_response(response: RawResponse) -> Result<Self> {
        let body: ListBody = response.json()?;
        Ok(Self {
            items: body.network_ip_availabilities.unwrap_or_default(),
            response,
        })
    }

    fn response(&self) -> &RawResponse {
        &self.response
    }

    fn items(&self) -> &[NetworkIpAvailability] {
        &self.items
    }

    fn into_items(self) -> Vec<NetworkIpAvailability> {
        self.items
    }

    fn next_link(&self) -> Result<NextLink> {
        Ok(NextLink::None)
    }
}

/// List IP availability of every network visible to the caller
pub fn list(client: &ServiceClient, opts: &ListOpts) -> Result<Pager<NetworkIpAvailabilityPage>> {
    let url = client.service_url_with_query(&[COLLECTION_PATH], opts)?;
    Ok(Pager::new(client.clone(), url))
}

/// Get IP availability of one network
pub async fn get(client: &ServiceClient, network_id: &str) -> Result<NetworkIpAvailability> {
    let url = client.service_url(&[COLLECTION_PATH, network_id])?;
    let body: GetBody = client.get(&url, RequestConfig::new()).await?.json()?;
    Ok(body.network_ip_availability)
}
