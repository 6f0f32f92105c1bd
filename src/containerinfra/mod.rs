//! Container infrastructure (Magnum v1)
//!
//! Resource paths are relative to the `v1/` base of the
//! container-infra endpoint. Listings point at their next page with a
//! top-level `next` URL.

pub mod cluster_templates;
pub mod clusters;
pub mod quotas;

use serde::{Deserialize, Serialize};

/// A self or bookmark link attached to a resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    pub href: String,
    pub rel: String,
}
