//! Container request and response types

use crate::pagination::{marker_after, JsonPage, Listed, NextLink, Page, Paging};
use crate::error::Result;
use crate::http::RawResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub(super) const META_PREFIX: &str = "X-Container-Meta-";
pub(super) const REMOVE_META_PREFIX: &str = "X-Remove-Container-Meta-";

// ============================================================================
// Listing
// ============================================================================

/// A container as reported by a `format=json` listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerInfo {
    pub name: String,
    /// Number of objects in the container
    pub count: u64,
    /// Total size of the objects in bytes
    pub bytes: u64,
    pub last_modified: Option<String>,
}

impl Listed for ContainerInfo {
    const COLLECTION: &'static str = "";
    const PAGING: Paging = Paging::Marker;

    fn marker(&self) -> Option<&str> {
        Some(&self.name)
    }
}

/// A page of container details
pub type ContainerInfoPage = JsonPage<ContainerInfo>;

/// A page of a plain-text listing: one container name per line
#[derive(Debug, Clone)]
pub struct ContainerNamePage {
    response: RawResponse,
    names: Vec<String>,
}

impl Page for ContainerNamePage {
    type Item = String;

    fn from_response(response: RawResponse) -> Result<Self> {
        let names = response
            .text()?
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Ok(Self { response, names })
    }

    fn response(&self) -> &RawResponse {
        &self.response
    }

    fn items(&self) -> &[String] {
        &self.names
    }

    fn into_items(self) -> Vec<String> {
        self.names
    }

    fn next_link(&self) -> Result<NextLink> {
        Ok(marker_after(self.names.last().map(String::as_str)))
    }
}

/// Options for listing containers
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListOpts {
    /// Only containers whose names start with this prefix
    pub prefix: Option<String>,
    /// Roll names up at the first occurrence of this character
    pub delimiter: Option<String>,
    pub limit: Option<u32>,
    /// Start after this name
    pub marker: Option<String>,
    /// Stop before this name
    pub end_marker: Option<String>,
}

// ============================================================================
// Create / Update
// ============================================================================

/// Options for creating a container
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateOpts {
    /// Custom metadata, sent as `X-Container-Meta-<key>`
    pub metadata: HashMap<String, String>,
    /// Read ACL (`X-Container-Read`)
    pub container_read: Option<String>,
    /// Write ACL (`X-Container-Write`)
    pub container_write: Option<String>,
    pub container_sync_to: Option<String>,
    pub container_sync_key: Option<String>,
    pub versions_location: Option<String>,
    pub history_location: Option<String>,
    pub storage_policy: Option<String>,
    pub content_type: Option<String>,
    pub detect_content_type: Option<bool>,
}

impl CreateOpts {
    /// Request headers carrying these options
    pub fn headers(&self) -> Vec<(String, String)> {
        let mut headers = meta_headers(META_PREFIX, &self.metadata);
        push_opt(&mut headers, "X-Container-Read", &self.container_read);
        push_opt(&mut headers, "X-Container-Write", &self.container_write);
        push_opt(&mut headers, "X-Container-Sync-To", &self.container_sync_to);
        push_opt(&mut headers, "X-Container-Sync-Key", &self.container_sync_key);
        push_opt(&mut headers, "X-Versions-Location", &self.versions_location);
        push_opt(&mut headers, "X-History-Location", &self.history_location);
        push_opt(&mut headers, "X-Storage-Policy", &self.storage_policy);
        push_opt(&mut headers, "Content-Type", &self.content_type);
        if let Some(detect) = self.detect_content_type {
            headers.push(("X-Detect-Content-Type".to_string(), detect.to_string()));
        }
        headers
    }
}

/// Options for updating a container
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateOpts {
    /// Metadata to set, sent as `X-Container-Meta-<key>`
    pub metadata: HashMap<String, String>,
    /// Metadata keys to remove, sent as `X-Remove-Container-Meta-<key>`
    pub remove_metadata: Vec<String>,
    pub container_read: Option<String>,
    pub container_write: Option<String>,
    pub container_sync_to: Option<String>,
    pub container_sync_key: Option<String>,
    pub versions_location: Option<String>,
    pub remove_versions_location: bool,
    pub history_location: Option<String>,
    pub remove_history_location: bool,
    pub content_type: Option<String>,
    pub detect_content_type: Option<bool>,
}

impl UpdateOpts {
    /// Request headers carrying these options
    pub fn headers(&self) -> Vec<(String, String)> {
        let mut headers = meta_headers(META_PREFIX, &self.metadata);
        for key in &self.remove_metadata {
            headers.push((format!("{REMOVE_META_PREFIX}{key}"), "remove".to_string()));
        }
        push_opt(&mut headers, "X-Container-Read", &self.container_read);
        push_opt(&mut headers, "X-Container-Write", &self.container_write);
        push_opt(&mut headers, "X-Container-Sync-To", &self.container_sync_to);
        push_opt(&mut headers, "X-Container-Sync-Key", &self.container_sync_key);
        push_opt(&mut headers, "X-Versions-Location", &self.versions_location);
        if self.remove_versions_location {
            headers.push(("X-Remove-Versions-Location".to_string(), "true".to_string()));
        }
        push_opt(&mut headers, "X-History-Location", &self.history_location);
        if self.remove_history_location {
            headers.push(("X-Remove-History-Location".to_string(), "true".to_string()));
        }
        push_opt(&mut headers, "Content-Type", &self.content_type);
        if let Some(detect) = self.detect_content_type {
            headers.push(("X-Detect-Content-Type".to_string(), detect.to_string()));
        }
        headers
    }
}

fn meta_headers(prefix: &str, metadata: &HashMap<String, String>) -> Vec<(String, String)> {
    let mut headers: Vec<(String, String)> = metadata
        .iter()
        .map(|(key, value)| (format!("{prefix}{key}"), value.clone()))
        .collect();
    headers.sort();
    headers
}

fn push_opt(headers: &mut Vec<(String, String)>, name: &str, value: &Option<String>) {
    if let Some(value) = value {
        headers.push((name.to_string(), value.clone()));
    }
}

// ============================================================================
// Get
// ============================================================================

/// Options for reading container metadata
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetOpts {
    /// Ask every replica and answer with the most recent (`X-Newest`)
    pub newest: bool,
}

/// Standard headers of a container `HEAD` response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerHeaders {
    pub bytes_used: u64,
    pub object_count: u64,
    pub content_type: Option<String>,
    pub date: Option<DateTime<Utc>>,
    /// Read ACL entries
    pub read: Vec<String>,
    /// Write ACL entries
    pub write: Vec<String>,
    pub storage_policy: Option<String>,
    pub versions_location: Option<String>,
    pub history_location: Option<String>,
    pub trans_id: Option<String>,
}

/// Container metadata returned by `get`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    pub headers: ContainerHeaders,
    /// Custom metadata with the `X-Container-Meta-` prefix removed and
    /// keys in `Title-Case`
    pub metadata: HashMap<String, String>,
}

// ============================================================================
// Bulk delete
// ============================================================================

/// Result of a bulk delete
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulkDeleteResponse {
    #[serde(rename = "Number Deleted")]
    pub number_deleted: u64,
    #[serde(rename = "Number Not Found")]
    pub number_not_found: u64,
    #[serde(rename = "Response Status")]
    pub response_status: String,
    #[serde(rename = "Response Body")]
    pub response_body: String,
    /// `[name, status]` pairs of the deletes that failed
    #[serde(rename = "Errors")]
    pub errors: Vec<Vec<String>>,
}
