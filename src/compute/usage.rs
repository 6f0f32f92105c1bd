//! Simple tenant usage (`os-simple-tenant-usage`)

use crate::error::Result;
use crate::http::RawResponse;
use crate::pagination::{next_from_links, JsonPage, Listed, NextLink, Page, Pager, Paging};
use crate::service::ServiceClient;
use crate::types::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Usage of one project over a time window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TenantUsage {
    pub tenant_id: String,
    #[serde(with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    #[serde(with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub stop: Option<DateTime<Utc>>,
    pub total_hours: f64,
    pub total_local_gb_usage: f64,
    pub total_memory_mb_usage: f64,
    pub total_vcpus_usage: f64,
    /// Per-server breakdown; all-tenant listings only fill it when detailed
    pub server_usages: Vec<ServerUsage>,
}

/// Usage of one server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerUsage {
    pub instance_id: String,
    pub name: String,
    pub tenant_id: String,
    pub flavor: String,
    /// e.g. `active`, `terminated`
    pub state: String,
    pub hours: f64,
    pub local_gb: i64,
    pub memory_mb: i64,
    pub vcpus: i64,
    /// Seconds since the server started
    pub uptime: i64,
    #[serde(with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
}

impl Listed for TenantUsage {
    const COLLECTION: &'static str = "tenant_usages";
    const PAGING: Paging = Paging::Links("tenant_usages_links");
}

/// A page of per-project usage
pub type AllTenantsPage = JsonPage<TenantUsage>;

/// Options for one project's usage
#[derive(Debug, Clone, Default, Serialize)]
pub struct SingleTenantOpts {
    #[serde(serialize_with = "query_time", skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    #[serde(serialize_with = "query_time", skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    pub limit: Option<u32>,
    pub marker: Option<String>,
}

/// Options for usage across all projects
#[derive(Debug, Clone, Default, Serialize)]
pub struct AllTenantsOpts {
    #[serde(serialize_with = "query_time", skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    #[serde(serialize_with = "query_time", skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    /// Include per-server usage
    #[serde(serialize_with = "query_flag", skip_serializing_if = "std::ops::Not::not")]
    pub detailed: bool,
    pub limit: Option<u32>,
    pub marker: Option<String>,
}

/// Nova takes zone-less timestamps in the query string
fn query_time<S: Serializer>(value: &Option<DateTime<Utc>>, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    match value {
        Some(dt) => serializer.serialize_str(&dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string()),
        None => serializer.serialize_none(),
    }
}

fn query_flag<S: Serializer>(value: &bool, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*value))
}

/// One page of a single project's usage.
///
/// The page holds one [`TenantUsage`] whose `server_usages` are the page's
/// share of the project's servers; a page without servers ends the listing.
#[derive(Debug, Clone)]
pub struct SingleTenantPage {
    response: RawResponse,
    usage: Vec<TenantUsage>,
    next: NextLink,
}

impl SingleTenantPage {
    /// The usage on this page, if the project had any
    pub fn usage(&self) -> Option<&TenantUsage> {
        self.usage.first()
    }
}

impl Page for SingleTenantPage {
    type Item = TenantUsage;

    fn from_response(response: RawResponse) -> Result<Self> {
        let mut body: Value = response.json()?;
        let usage = match body.get_mut("tenant_usage").map(Value::take) {
            None | Some(Value::Null) => Vec::new(),
            Some(value) => vec![serde_json::from_value(value)?],
        };
        let next = next_from_links(&body, "tenant_usage_links")?;
        Ok(Self {
            response,
            usage,
            next,
        })
    }

    fn response(&self) -> &RawResponse {
        &self.response
    }

    fn items(&self) -> &[TenantUsage] {
        &self.usage
    }

    fn into_items(self) -> Vec<TenantUsage> {
        self.usage
    }

    fn next_link(&self) -> Result<NextLink> {
        Ok(self.next.clone())
    }

    fn is_empty(&self) -> bool {
        self.usage.iter().all(|u| u.server_usages.is_empty())
    }
}

/// Usage of one project
pub fn single_tenant(
    client: &ServiceClient,
    tenant_id: &str,
    opts: &SingleTenantOpts,
) -> Result<Pager<SingleTenantPage>> {
    let url = client.service_url_with_query(&["os-simple-tenant-usage", tenant_id], opts)?;
    Ok(Pager::new(client.clone(), url))
}

/// Usage of every project
pub fn all_tenants(client: &ServiceClient, opts: &AllTenantsOpts) -> Result<Pager<AllTenantsPage>> {
    let url = client.service_url_with_query(&["os-simple-tenant-usage"], opts)?;
    Ok(Pager::new(client.clone(), url))
}
