//! Load balancers (Octavia v2)
//!
//! Resource paths are relative to the `v2.0/` base of the load-balancer
//! endpoint, e.g. `v2.0/lbaas/loadbalancers/{id}`.

mod types;

pub use types::{
    CreateOpts, DeleteOpts, ListOpts, Listener, LoadBalancer, LoadBalancerPage, Member, Monitor,
    Pool, Stats, StatusTree, UpdateOpts,
};

use crate::error::{Error, Result};
use crate::http::{ActionOutcome, RequestConfig};
use crate::pagination::Pager;
use crate::service::{body_under, ServiceClient};
use crate::waiter::{wait_for_status, Observation, PollPolicy, WaitTarget};
use reqwest::Method;
use std::time::Duration;
use tracing::info;

const ROOT: &str = "loadbalancer";

fn resource_url(client: &ServiceClient, id: &str, action: Option<&str>) -> Result<url::Url> {
    match action {
        Some(action) => client.service_url(&["lbaas", "loadbalancers", id, action]),
        None => client.service_url(&["lbaas", "loadbalancers", id]),
    }
}

/// List load balancers
pub fn list(client: &ServiceClient, opts: &ListOpts) -> Result<Pager<LoadBalancerPage>> {
    let url = client.service_url_with_query(&["lbaas", "loadbalancers"], opts)?;
    Ok(Pager::new(client.clone(), url))
}

/// Create a load balancer
pub async fn create(client: &ServiceClient, opts: &CreateOpts) -> Result<LoadBalancer> {
    if opts.vip_subnet_id.is_none() && opts.vip_network_id.is_none() && opts.vip_port_id.is_none() {
        return Err(Error::missing_field(
            "vip_subnet_id, vip_network_id or vip_port_id",
        ));
    }

    let url = client.service_url(&["lbaas", "loadbalancers"])?;
    let lb: LoadBalancer = client
        .post(&url, body_under(ROOT, opts)?, RequestConfig::new().ok_codes(&[200, 201, 202]))
        .await?
        .extract(ROOT)?;
    info!("Created load balancer {} ({})", lb.id, lb.provisioning_status);
    Ok(lb)
}

/// Get a load balancer
pub async fn get(client: &ServiceClient, id: &str) -> Result<LoadBalancer> {
    client
        .get(&resource_url(client, id, None)?, RequestConfig::new())
        .await?
        .extract(ROOT)
}

/// Update a load balancer
pub async fn update(client: &ServiceClient, id: &str, opts: &UpdateOpts) -> Result<LoadBalancer> {
    client
        .put(
            &resource_url(client, id, None)?,
            body_under(ROOT, opts)?,
            RequestConfig::new().ok_codes(&[200, 202]),
        )
        .await?
        .extract(ROOT)
}

/// Delete a load balancer
pub async fn delete(client: &ServiceClient, id: &str, opts: &DeleteOpts) -> Result<ActionOutcome> {
    let mut url = resource_url(client, id, None)?;
    if opts.cascade {
        url.query_pairs_mut().append_pair("cascade", "true");
    }
    client.delete(&url, RequestConfig::new()).await
}

/// Get the status tree of a load balancer
pub async fn get_statuses(client: &ServiceClient, id: &str) -> Result<StatusTree> {
    client
        .get(&resource_url(client, id, Some("status"))?, RequestConfig::new())
        .await?
        .extract("statuses")
}

/// Get the traffic counters of a load balancer
pub async fn get_stats(client: &ServiceClient, id: &str) -> Result<Stats> {
    client
        .get(&resource_url(client, id, Some("stats"))?, RequestConfig::new())
        .await?
        .extract("stats")
}

/// Fail the load balancer over to new amphorae
pub async fn failover(client: &ServiceClient, id: &str) -> Result<ActionOutcome> {
    let outcome = client
        .request(
            Method::PUT,
            &resource_url(client, id, Some("failover"))?,
            RequestConfig::new().ok_codes(&[202]),
        )
        .await?
        .into_outcome();
    info!("Failover of load balancer {} accepted", id);
    Ok(outcome)
}

/// Wait until a load balancer reaches a provisioning status.
///
/// `ERROR` ends the wait like a `*FAILED*` status does.
pub async fn wait_for_provisioning_status(
    client: &ServiceClient,
    id: &str,
    target: &WaitTarget,
    timeout: Duration,
    policy: &PollPolicy,
) -> Result<()> {
    wait_for_status("LoadBalancer", id, target, timeout, policy, || async move {
        let lb = get(client, id).await?;
        if lb.provisioning_status == "ERROR" {
            return Err(Error::resource_failed(
                "LoadBalancer",
                id,
                lb.provisioning_status,
                format!("operating status {}", lb.operating_status),
            ));
        }
        Ok(Observation::new(lb.provisioning_status))
    })
    .await
}

#[cfg(test)]
mod tests;
