//! CLI module
//!
//! Command-line interface over the resource modules.
//!
//! # Commands
//!
//! - `lb list|show|stats|failover|wait` - Octavia load balancers
//! - `cluster list|show|wait` - Magnum clusters
//! - `container list` - Swift containers

mod commands;
mod runner;

pub use commands::{Cli, ClusterCommand, Commands, ContainerCommand, LbCommand, OutputFormat};
pub use runner::Runner;
