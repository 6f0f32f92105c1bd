//! Next link strategies
//!
//! Each OpenStack service locates its next page differently. These helpers
//! read the common shapes out of a decoded list body.

use super::types::{NextLink, Paging};
use crate::error::{Error, Result};
use serde_json::Value;

/// Find the next link for a page using the given paging style.
///
/// `last_marker` is the marker of the last record on the page, used by
/// [`Paging::Marker`].
pub fn next_link(paging: Paging, body: &Value, last_marker: Option<&str>) -> Result<NextLink> {
    match paging {
        Paging::Links(key) => next_from_links(body, key),
        Paging::NextField(key) => next_from_field(body, key),
        Paging::Marker => Ok(marker_after(last_marker)),
        Paging::Single => Ok(NextLink::None),
    }
}

/// `{"<key>": [{"href": "...", "rel": "next"}, ...]}`
///
/// A missing or `null` links array means this is the last page.
pub fn next_from_links(body: &Value, key: &str) -> Result<NextLink> {
    let links = match body.get(key) {
        None | Some(Value::Null) => return Ok(NextLink::None),
        Some(Value::Array(links)) => links,
        Some(other) => {
            return Err(Error::decode(format!(
                "'{key}' should be an array of links, got {other}"
            )))
        }
    };

    let next = links.iter().find_map(|link| {
        let rel = link.get("rel").and_then(Value::as_str)?;
        if rel != "next" {
            return None;
        }
        link.get("href").and_then(Value::as_str)
    });

    Ok(match next {
        Some(href) if !href.is_empty() => NextLink::Absolute(href.to_string()),
        _ => NextLink::None,
    })
}

/// `{"<key>": "https://..."}`, with a missing, `null` or empty value ending the list
pub fn next_from_field(body: &Value, key: &str) -> Result<NextLink> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(NextLink::None),
        Some(Value::String(href)) if href.is_empty() => Ok(NextLink::None),
        Some(Value::String(href)) => Ok(NextLink::Absolute(href.clone())),
        Some(other) => Err(Error::decode(format!(
            "'{key}' should be a URL string, got {other}"
        ))),
    }
}

/// Marker pagination continues after the last record until a page comes back empty
pub fn marker_after(last: Option<&str>) -> NextLink {
    match last {
        Some(marker) if !marker.is_empty() => NextLink::Marker(marker.to_string()),
        _ => NextLink::None,
    }
}
