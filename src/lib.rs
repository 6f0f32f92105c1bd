// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # OpenStack client
//!
//! Typed async bindings for OpenStack control plane APIs.
//!
//! ## Features
//!
//! - **Keystone v3 auth**: Password or pre-issued token, catalog endpoint lookup
//! - **Lazy pagination**: `<key>_links`, `next` fields and marker listings behind one [`Pager`](pagination::Pager)
//! - **Status waits**: Poll a resource until it reaches a status, fails, or disappears
//! - **Resources**: Octavia load balancers, Magnum clusters, Swift containers, and more
//! - **clouds.yaml**: Named clouds with `OS_*` environment overrides
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use openstack_client::config::load_cloud;
//! use openstack_client::loadbalancer::{self, ListOpts};
//! use openstack_client::waiter::WaitTarget;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> openstack_client::Result<()> {
//!     let cloud = load_cloud("devstack", None)?;
//!     let transport = cloud.connect()?;
//!     let client = cloud
//!         .service_client(&transport, "load-balancer")
//!         .await?
//!         .with_resource_base("v2.0")?;
//!
//!     for lb in loadbalancer::list(&client, &ListOpts::default())?.all_items().await? {
//!         println!("{} {}", lb.id, lb.provisioning_status);
//!     }
//!
//!     loadbalancer::wait_for_provisioning_status(
//!         &client,
//!         "36e08a3e-a78f-4b40-a229-1e7e23eee1ab",
//!         &WaitTarget::status("ACTIVE"),
//!         Duration::from_secs(600),
//!         &cloud.poll_policy(),
//!     )
//!     .await
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Resource modules                         │
//! │  loadbalancer  containerinfra  objectstorage  networking  ...   │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴───────┬───────────┬─────────────┐
//! │    Auth      │   HTTP / Service      │ Paginate  │   Wait      │
//! ├──────────────┼───────────────────────┼───────────┼─────────────┤
//! │ Keystone v3  │ ok codes, request id  │ Links     │ Poll policy │
//! │ Token        │ Rate limit            │ Next field│ Status      │
//! │ Catalog      │ Error bodies          │ Marker    │ Gone (404)  │
//! └──────────────┴───────────────────────┴───────────┴─────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Keystone authentication and service catalog
pub mod auth;

/// HTTP transport with rate limiting
pub mod http;

/// Per-service endpoint handle
pub mod service;

/// Lazy page iteration
pub mod pagination;

/// Polling until a resource reaches a status
pub mod waiter;

/// Octavia load balancers
pub mod loadbalancer;

/// Neutron L7 policies and IP availability
pub mod networking;

/// Magnum clusters, templates and quotas
pub mod containerinfra;

/// Nova networks, usage and server actions
pub mod compute;

/// Heat build info
pub mod orchestration;

/// Poppy CDN service assets
pub mod cdn;

/// Swift containers
pub mod objectstorage;

/// clouds.yaml loading
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use service::ServiceClient;
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
