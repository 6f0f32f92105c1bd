//! Load balancer request and response types

use crate::pagination::{JsonPage, Listed, Paging};
use crate::types::{null_as_default, timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Resources
// ============================================================================

/// A load balancer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadBalancer {
    pub id: String,
    pub project_id: String,
    #[serde(with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub vip_subnet_id: String,
    pub vip_network_id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub vip_address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub vip_port_id: String,
    pub vip_qos_policy_id: Option<String>,
    pub flavor_id: Option<String>,
    pub availability_zone: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub provider: String,
    pub admin_state_up: bool,
    /// Lifecycle state, e.g. `ACTIVE`, `PENDING_CREATE`, `ERROR`
    pub provisioning_status: String,
    /// Health of the load balancer, e.g. `ONLINE`, `OFFLINE`
    pub operating_status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    /// Only populated in status trees
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub listeners: Vec<Listener>,
    /// Only populated in status trees
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pools: Vec<Pool>,
}

impl Listed for LoadBalancer {
    const COLLECTION: &'static str = "loadbalancers";
    const PAGING: Paging = Paging::Links("loadbalancers_links");
}

/// A page of load balancers
pub type LoadBalancerPage = JsonPage<LoadBalancer>;

/// Listener entry of a status tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Listener {
    pub id: String,
    pub name: String,
    pub provisioning_status: String,
    pub operating_status: String,
    pub pools: Vec<Pool>,
}

/// Pool entry of a status tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pool {
    pub id: String,
    pub name: String,
    pub provisioning_status: String,
    pub operating_status: String,
    #[serde(rename = "healthmonitor")]
    pub monitor: Option<Monitor>,
    pub members: Vec<Member>,
}

/// Health monitor entry of a status tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Monitor {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub monitor_type: String,
    pub provisioning_status: String,
    pub operating_status: String,
}

/// Pool member entry of a status tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub address: String,
    pub protocol_port: u16,
    pub provisioning_status: String,
    pub operating_status: String,
}

/// Status of a load balancer and everything below it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusTree {
    #[serde(rename = "loadbalancer")]
    pub load_balancer: Option<LoadBalancer>,
}

/// Traffic counters of a load balancer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub active_connections: u64,
    pub bytes_in: u64,
    pub bytes_out: u64,
    pub request_errors: u64,
    pub total_connections: u64,
}

// ============================================================================
// Options
// ============================================================================

/// Filters for listing load balancers
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListOpts {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub project_id: Option<String>,
    pub provisioning_status: Option<String>,
    pub operating_status: Option<String>,
    pub vip_address: Option<String>,
    pub vip_port_id: Option<String>,
    pub vip_subnet_id: Option<String>,
    pub vip_network_id: Option<String>,
    pub flavor_id: Option<String>,
    pub provider: Option<String>,
    pub admin_state_up: Option<bool>,
    /// Match load balancers carrying all of these tags
    pub tags: Vec<String>,
    /// Match load balancers carrying any of these tags
    pub tags_any: Vec<String>,
    pub limit: Option<u32>,
    pub marker: Option<String>,
    pub sort_key: Option<String>,
    pub sort_dir: Option<String>,
}

/// Options for creating a load balancer.
///
/// One of `vip_subnet_id`, `vip_network_id` or `vip_port_id` is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOpts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vip_port_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vip_subnet_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vip_network_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vip_qos_policy_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flavor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_state_up: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Options for updating a load balancer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOpts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_state_up: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vip_qos_policy_id: Option<String>,
    /// Replaces the whole tag list when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Options for deleting a load balancer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteOpts {
    /// Delete listeners, pools and members along with the load balancer
    pub cascade: bool,
}
