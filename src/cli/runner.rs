//! CLI runner - executes commands

use crate::cli::commands::{Cli, ClusterCommand, Commands, ContainerCommand, LbCommand, OutputFormat};
use crate::config::{load_cloud, CloudConfig};
use crate::containerinfra::clusters;
use crate::error::{Result, ResultExt};
use crate::http::HttpClient;
use crate::loadbalancer;
use crate::objectstorage::containers;
use crate::service::ServiceClient;
use crate::waiter::WaitTarget;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let cloud = load_cloud(&self.cli.cloud, self.cli.config.as_deref())
            .with_context(|| format!("Loading cloud '{}'", self.cli.cloud))?;
        let transport = cloud.connect()?;

        match &self.cli.command {
            Commands::Lb(command) => self.lb(&cloud, &transport, command).await,
            Commands::Cluster(command) => self.cluster(&cloud, &transport, command).await,
            Commands::Container(command) => self.container(&cloud, &transport, command).await,
        }
    }

    // ========================================================================
    // Load balancers
    // ========================================================================

    async fn lb(&self, cloud: &CloudConfig, transport: &Arc<HttpClient>, command: &LbCommand) -> Result<()> {
        let client = versioned(cloud.service_client(transport, "load-balancer").await?, "v2.0")?;

        match command {
            LbCommand::List {
                name,
                provisioning_status,
                limit,
            } => {
                let opts = loadbalancer::ListOpts {
                    name: name.clone(),
                    provisioning_status: provisioning_status.clone(),
                    limit: *limit,
                    ..Default::default()
                };
                let lbs = loadbalancer::list(&client, &opts)?.all_items().await?;
                self.output(&lbs);
            }
            LbCommand::Show { id } => self.output(&loadbalancer::get(&client, id).await?),
            LbCommand::Stats { id } => self.output(&loadbalancer::get_stats(&client, id).await?),
            LbCommand::Failover { id } => self.output(&loadbalancer::failover(&client, id).await?),
            LbCommand::Wait {
                id,
                status,
                timeout,
            } => {
                let target: WaitTarget = status.parse()?;
                let started = Instant::now();
                loadbalancer::wait_for_provisioning_status(
                    &client,
                    id,
                    &target,
                    Duration::from_secs(*timeout),
                    &cloud.poll_policy(),
                )
                .await?;
                self.output_reached("LoadBalancer", id, &target, started);
            }
        }
        Ok(())
    }

    // ========================================================================
    // Clusters
    // ========================================================================

    async fn cluster(
        &self,
        cloud: &CloudConfig,
        transport: &Arc<HttpClient>,
        command: &ClusterCommand,
    ) -> Result<()> {
        let client = versioned(cloud.service_client(transport, "container-infra").await?, "v1")?;

        match command {
            ClusterCommand::List { detail, limit } => {
                let opts = clusters::ListOpts {
                    limit: *limit,
                    ..Default::default()
                };
                let pager = if *detail {
                    clusters::list_detail(&client, &opts)?
                } else {
                    clusters::list(&client, &opts)?
                };
                self.output(&pager.all_items().await?);
            }
            ClusterCommand::Show { id } => self.output(&clusters::get(&client, id).await?),
            ClusterCommand::Wait {
                id,
                status,
                timeout,
            } => {
                let target: WaitTarget = status.parse()?;
                let started = Instant::now();
                clusters::wait_for_cluster(
                    &client,
                    id,
                    &target,
                    Duration::from_secs(*timeout),
                    &cloud.poll_policy(),
                )
                .await?;
                self.output_reached("Cluster", id, &target, started);
            }
        }
        Ok(())
    }

    // ========================================================================
    // Containers
    // ========================================================================

    async fn container(
        &self,
        cloud: &CloudConfig,
        transport: &Arc<HttpClient>,
        command: &ContainerCommand,
    ) -> Result<()> {
        let client = cloud.service_client(transport, "object-store").await?;

        match command {
            ContainerCommand::List {
                prefix,
                limit,
                names,
            } => {
                let opts = containers::ListOpts {
                    prefix: prefix.clone(),
                    limit: *limit,
                    ..Default::default()
                };
                if *names {
                    self.output(&containers::list_names(&client, &opts)?.all_items().await?);
                } else {
                    self.output(&containers::list_info(&client, &opts)?.all_items().await?);
                }
            }
        }
        Ok(())
    }

    // ========================================================================
    // Output
    // ========================================================================

    fn output_reached(&self, kind: &str, id: &str, target: &WaitTarget, started: Instant) {
        info!("{} {} reached {} in {:?}", kind, id, target, started.elapsed());
        self.output_message(&json!({
            "id": id,
            "status": target.to_string(),
            "elapsed_ms": started.elapsed().as_millis() as u64,
        }));
    }

    fn output<T: Serialize>(&self, value: &T) {
        self.output_message(&serde_json::to_value(value).unwrap_or(Value::Null));
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

/// Resolve resources below `version` unless the endpoint already names it
fn versioned(client: ServiceClient, version: &str) -> Result<ServiceClient> {
    let already = client
        .endpoint()
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .is_some_and(|last| last == version);
    if already {
        Ok(client)
    } else {
        client.with_resource_base(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthConfig;

    fn client(endpoint: &str) -> ServiceClient {
        let transport = Arc::new(
            HttpClient::with_auth(
                Default::default(),
                AuthConfig::Token {
                    token: "t".to_string(),
                },
            )
            .unwrap(),
        );
        ServiceClient::new(transport, endpoint).unwrap()
    }

    #[test]
    fn test_versioned_appends_missing_version() {
        let client = versioned(client("http://octavia:9876"), "v2.0").unwrap();
        assert_eq!(client.resource_base().as_str(), "http://octavia:9876/v2.0/");
    }

    #[test]
    fn test_versioned_keeps_versioned_endpoint() {
        let client = versioned(client("http://magnum:9511/v1"), "v1").unwrap();
        assert_eq!(client.resource_base().as_str(), "http://magnum:9511/v1/");
    }

    #[tokio::test]
    async fn test_missing_config_names_the_cloud() {
        use clap::Parser;

        let cli = Cli::try_parse_from([
            "openstack-client",
            "--cloud",
            "devstack",
            "--config",
            "/nonexistent/clouds.yaml",
            "lb",
            "list",
        ])
        .unwrap();

        let err = Runner::new(cli).run().await.unwrap_err();
        assert!(matches!(err, crate::Error::Other(_)));
        assert_eq!(
            err.to_string(),
            "Loading cloud 'devstack': File not found: /nonexistent/clouds.yaml"
        );
    }
}
