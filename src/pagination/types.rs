//! Pagination types and traits
//!
//! Defines the page abstraction shared by every list operation.

use crate::error::Result;
use crate::http::RawResponse;
use serde::de::DeserializeOwned;
use url::Url;

/// Where the page after the current one lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextLink {
    /// Full URL of the next page (absolute, or relative to the current page)
    Absolute(String),
    /// Same URL as the current page with `marker` set to this value
    Marker(String),
    /// No more pages
    None,
}

impl NextLink {
    /// Check if there is no next page
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Resolve against the URL of the page that produced this link
    pub fn resolve(&self, current: &Url) -> Result<Option<Url>> {
        match self {
            Self::Absolute(href) => Ok(Some(current.join(href)?)),
            Self::Marker(marker) => {
                let kept: Vec<(String, String)> = current
                    .query_pairs()
                    .filter(|(key, _)| key != "marker")
                    .map(|(key, value)| (key.into_owned(), value.into_owned()))
                    .collect();

                let mut next = current.clone();
                next.query_pairs_mut()
                    .clear()
                    .extend_pairs(kept)
                    .append_pair("marker", marker);
                Ok(Some(next))
            }
            Self::None => Ok(None),
        }
    }
}

/// How a JSON list response points at its next page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paging {
    /// `{"<key>": [{"href": ..., "rel": "next"}]}`
    Links(&'static str),
    /// `{"<key>": "https://..."}`
    NextField(&'static str),
    /// Request again with `marker` set to the last record's marker
    Marker,
    /// The whole collection comes back in one response
    Single,
}

/// One page of a list response
pub trait Page: Sized + Send + 'static {
    /// Record type on the page
    type Item: Send + 'static;

    /// Decode a page from a list response
    fn from_response(response: RawResponse) -> Result<Self>;

    /// The response this page was decoded from
    fn response(&self) -> &RawResponse;

    /// Records on this page, in server order
    fn items(&self) -> &[Self::Item];

    /// Take ownership of the records
    fn into_items(self) -> Vec<Self::Item>;

    /// Link to the next page
    fn next_link(&self) -> Result<NextLink>;

    /// Empty pages end a traversal without being visited
    fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

/// A record type returned by a JSON list endpoint
pub trait Listed: DeserializeOwned + Send + 'static {
    /// Top-level key holding the records; empty when the body is a bare array
    const COLLECTION: &'static str;

    /// How the next page is found
    const PAGING: Paging;

    /// Value passed as `marker` to fetch the records after this one
    fn marker(&self) -> Option<&str> {
        None
    }
}
