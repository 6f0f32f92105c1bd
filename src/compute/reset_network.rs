//! Server network reset action

use crate::error::Result;
use crate::http::{ActionOutcome, RequestConfig};
use crate::service::ServiceClient;
use serde_json::json;
use tracing::info;

/// Reset networking on a server.
///
/// Only meaningful with the Xen hypervisor and nova-network.
pub async fn reset_network(client: &ServiceClient, server_id: &str) -> Result<ActionOutcome> {
    let url = client.service_url(&["servers", server_id, "action"])?;
    let outcome = client
        .post(&url, json!({ "resetNetwork": null }), RequestConfig::new().ok_codes(&[202]))
        .await?
        .into_outcome();
    info!("Network reset of server {} accepted", server_id);
    Ok(outcome)
}
