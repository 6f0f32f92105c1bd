//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// OpenStack client CLI
#[derive(Parser, Debug)]
#[command(name = "openstack-client")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Cloud name in clouds.yaml
    #[arg(long, global = true, env = "OS_CLOUD", default_value = "openstack")]
    pub cloud: String,

    /// clouds.yaml path (searched for when omitted)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Octavia load balancers
    #[command(subcommand)]
    Lb(LbCommand),

    /// Magnum clusters
    #[command(subcommand)]
    Cluster(ClusterCommand),

    /// Swift containers
    #[command(subcommand)]
    Container(ContainerCommand),
}

/// Load balancer subcommands
#[derive(Subcommand, Debug)]
pub enum LbCommand {
    /// List load balancers
    List {
        /// Filter by name
        #[arg(long)]
        name: Option<String>,

        /// Filter by provisioning status
        #[arg(long)]
        provisioning_status: Option<String>,

        /// Page size
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Show one load balancer
    Show {
        /// Load balancer ID
        id: String,
    },

    /// Show traffic statistics
    Stats {
        /// Load balancer ID
        id: String,
    },

    /// Fail over the amphorae of a load balancer
    Failover {
        /// Load balancer ID
        id: String,
    },

    /// Wait for a provisioning status
    Wait {
        /// Load balancer ID
        id: String,

        /// Target status (`DELETED` waits for removal)
        #[arg(long, default_value = "ACTIVE")]
        status: String,

        /// Timeout in seconds
        #[arg(long, default_value = "600")]
        timeout: u64,
    },
}

/// Cluster subcommands
#[derive(Subcommand, Debug)]
pub enum ClusterCommand {
    /// List clusters
    List {
        /// Include full cluster details
        #[arg(long)]
        detail: bool,

        /// Page size
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Show one cluster
    Show {
        /// Cluster UUID or name
        id: String,
    },

    /// Wait for a cluster status
    Wait {
        /// Cluster UUID or name
        id: String,

        /// Target status (`DELETE_COMPLETE` waits for removal)
        #[arg(long, default_value = "CREATE_COMPLETE")]
        status: String,

        /// Timeout in seconds
        #[arg(long, default_value = "1800")]
        timeout: u64,
    },
}

/// Container subcommands
#[derive(Subcommand, Debug)]
pub enum ContainerCommand {
    /// List containers
    List {
        /// Only containers whose names start with this prefix
        #[arg(long)]
        prefix: Option<String>,

        /// Page size
        #[arg(long)]
        limit: Option<u32>,

        /// Print names only
        #[arg(long)]
        names: bool,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one document per line)
    Json,
    /// Human-readable output
    Pretty,
}
