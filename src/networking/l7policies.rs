//! Layer 7 policies (`lbaas/l7policies`)

use crate::error::Result;
use crate::pagination::{JsonPage, Listed, Pager, Paging};
use crate::service::ServiceClient;
use serde::{Deserialize, Serialize};

/// A layer 7 policy attached to a listener
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct L7Policy {
    pub id: String,
    pub name: String,
    pub description: String,
    pub listener_id: String,
    /// `REDIRECT_TO_POOL`, `REDIRECT_TO_URL` or `REJECT`
    pub action: String,
    /// Evaluation order within the listener, starting at 1
    pub position: i32,
    pub project_id: String,
    pub tenant_id: String,
    pub redirect_pool_id: Option<String>,
    pub redirect_url: Option<String>,
    pub redirect_prefix: Option<String>,
    pub redirect_http_code: Option<u16>,
    pub admin_state_up: bool,
    pub provisioning_status: String,
    pub operating_status: String,
    pub rules: Vec<Rule>,
}

impl Listed for L7Policy {
    const COLLECTION: &'static str = "l7policies";
    const PAGING: Paging = Paging::Links("l7policies_links");
}

/// A page of layer 7 policies
pub type L7PolicyPage = JsonPage<L7Policy>;

/// A match rule of a layer 7 policy.
///
/// List responses may only carry the rule ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rule {
    pub id: String,
    /// `HOST_NAME`, `PATH`, `FILE_TYPE`, `HEADER` or `COOKIE`
    #[serde(rename = "type")]
    pub rule_type: String,
    /// `CONTAINS`, `ENDS_WITH`, `EQUAL_TO`, `REGEX` or `STARTS_WITH`
    pub compare_type: String,
    pub value: String,
    pub key: Option<String>,
    pub invert: bool,
    pub project_id: String,
    pub admin_state_up: bool,
    pub provisioning_status: String,
}

/// Filters for listing layer 7 policies
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListOpts {
    pub id: Option<String>,
    pub name: Option<String>,
    pub listener_id: Option<String>,
    pub action: Option<String>,
    pub project_id: Option<String>,
    pub redirect_pool_id: Option<String>,
    pub redirect_url: Option<String>,
    pub position: Option<i32>,
    pub admin_state_up: Option<bool>,
    pub limit: Option<u32>,
    pub marker: Option<String>,
    pub sort_key: Option<String>,
    pub sort_dir: Option<String>,
}

/// List layer 7 policies
pub fn list(client: &ServiceClient, opts: &ListOpts) -> Result<Pager<L7PolicyPage>> {
    let url = client.service_url_with_query(&["lbaas", "l7policies"], opts)?;
    Ok(Pager::new(client.clone(), url))
}
