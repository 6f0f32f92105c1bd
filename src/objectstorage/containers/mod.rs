//! Object storage containers (Swift v1)
//!
//! Container names become a single percent-encoded path segment below the
//! account endpoint, so names containing `/`, `?` or `&` are safe.

mod types;

pub use types::{
    BulkDeleteResponse, Container, ContainerHeaders, ContainerInfo, ContainerInfoPage,
    ContainerNamePage, CreateOpts, GetOpts, ListOpts, UpdateOpts,
};

use crate::error::{Error, Result};
use crate::http::{ActionOutcome, RawResponse, RequestConfig};
use crate::pagination::Pager;
use crate::service::ServiceClient;
use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Method;
use std::collections::HashMap;
use tracing::{debug, info};
use types::META_PREFIX;

/// Characters escaped in bulk delete bodies: all but RFC 3986 unreserved
const PATH_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// List containers with their object counts and sizes
pub fn list_info(client: &ServiceClient, opts: &ListOpts) -> Result<Pager<ContainerInfoPage>> {
    let mut url = client.service_url_with_query(&[], opts)?;
    url.query_pairs_mut().append_pair("format", "json");
    Ok(Pager::new(client.clone(), url))
}

/// List container names only
pub fn list_names(client: &ServiceClient, opts: &ListOpts) -> Result<Pager<ContainerNamePage>> {
    let url = client.service_url_with_query(&[], opts)?;
    Ok(Pager::new(client.clone(), url).header("Accept", "text/plain"))
}

/// Create a container
pub async fn create(client: &ServiceClient, name: &str, opts: &CreateOpts) -> Result<ActionOutcome> {
    let url = client.service_url(&[name])?;
    let mut config = RequestConfig::new().ok_codes(&[201, 202, 204]);
    for (key, value) in opts.headers() {
        config = config.header(key, value);
    }

    let outcome = client.request(Method::PUT, &url, config).await?.into_outcome();
    info!("Created container {}", name);
    Ok(outcome)
}

/// Update container metadata and ACLs
pub async fn update(client: &ServiceClient, name: &str, opts: &UpdateOpts) -> Result<ActionOutcome> {
    let url = client.service_url(&[name])?;
    let mut config = RequestConfig::new().ok_codes(&[201, 202, 204]);
    for (key, value) in opts.headers() {
        config = config.header(key, value);
    }

    Ok(client.request(Method::POST, &url, config).await?.into_outcome())
}

/// Read container metadata
pub async fn get(client: &ServiceClient, name: &str, opts: &GetOpts) -> Result<Container> {
    let url = client.service_url(&[name])?;
    let mut config = RequestConfig::new().ok_codes(&[200, 204]);
    if opts.newest {
        config = config.header("X-Newest", "true");
    }

    let response = client.head(&url, config).await?;
    Ok(Container {
        headers: container_headers(&response)?,
        metadata: container_metadata(&response),
    })
}

/// Delete an empty container
pub async fn delete(client: &ServiceClient, name: &str) -> Result<ActionOutcome> {
    let url = client.service_url(&[name])?;
    client.delete(&url, RequestConfig::new().ok_codes(&[204])).await
}

/// Delete several empty containers in one request
pub async fn bulk_delete(client: &ServiceClient, names: &[&str]) -> Result<BulkDeleteResponse> {
    let mut url = client.service_url(&[])?;
    url.query_pairs_mut().append_pair("bulk-delete", "true");

    let body: String = names
        .iter()
        .map(|name| format!("{}\n", utf8_percent_encode(name, PATH_ESCAPE)))
        .collect();

    let result: BulkDeleteResponse = client
        .request(Method::POST, &url, RequestConfig::new().text(body).ok_codes(&[200]))
        .await?
        .json()?;
    debug!(
        "Bulk delete of {} containers: {} deleted, {} not found",
        names.len(),
        result.number_deleted,
        result.number_not_found
    );
    Ok(result)
}

fn container_headers(response: &RawResponse) -> Result<ContainerHeaders> {
    let count = |name: &str| -> Result<u64> {
        response.header(name).map_or(Ok(0), |value| {
            value
                .trim()
                .parse()
                .map_err(|_| Error::decode(format!("{name} is not a number: '{value}'")))
        })
    };
    let text = |name: &str| response.header(name).map(str::to_string);
    let acl = |name: &str| -> Vec<String> {
        response
            .header(name)
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|entry| !entry.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    };

    Ok(ContainerHeaders {
        bytes_used: count("x-container-bytes-used")?,
        object_count: count("x-container-object-count")?,
        content_type: text("content-type"),
        date: response.header("date").and_then(parse_http_date),
        read: acl("x-container-read"),
        write: acl("x-container-write"),
        storage_policy: text("x-storage-policy"),
        versions_location: text("x-versions-location"),
        history_location: text("x-history-location"),
        trans_id: text("x-trans-id"),
    })
}

fn container_metadata(response: &RawResponse) -> HashMap<String, String> {
    let prefix = META_PREFIX.to_ascii_lowercase();
    response
        .headers
        .iter()
        .filter_map(|(name, value)| {
            let key = name.as_str().strip_prefix(prefix.as_str())?;
            Some((title_case(key), value.to_str().ok()?.to_string()))
        })
        .collect()
}

/// `backup-tier` becomes `Backup-Tier`
fn title_case(key: &str) -> String {
    key.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
