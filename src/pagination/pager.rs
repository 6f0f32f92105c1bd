//! Lazy multi-page traversal

use super::types::Page;
use crate::error::{Error, Result};
use crate::http::RequestConfig;
use crate::service::ServiceClient;
use futures::stream::{self, Stream, TryStreamExt};
use std::collections::HashSet;
use std::marker::PhantomData;
use std::pin::Pin;
use tracing::{debug, warn};
use url::Url;

/// Type alias for the page stream returned by [`Pager::into_stream`]
pub type PageStream<P> = Pin<Box<dyn Stream<Item = Result<P>> + Send>>;

/// Walks a paginated list one page at a time.
///
/// Nothing is fetched until the pager is consumed, and each page is only
/// requested once the previous one has been handed to the caller.
pub struct Pager<P> {
    client: ServiceClient,
    initial: Url,
    config: RequestConfig,
    _page: PhantomData<fn() -> P>,
}

struct Cursor {
    client: ServiceClient,
    config: RequestConfig,
    next: Option<Url>,
    seen: HashSet<String>,
}

impl<P: Page> Pager<P> {
    /// Create a pager starting at `initial` (query parameters included)
    pub fn new(client: ServiceClient, initial: Url) -> Self {
        Self {
            client,
            initial,
            config: RequestConfig::new(),
            _page: PhantomData,
        }
    }

    /// Send a header with every page request
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config = self.config.header(key, value);
        self
    }

    /// URL of the first page
    pub fn initial_url(&self) -> &Url {
        &self.initial
    }

    /// Turn the pager into a stream of pages.
    ///
    /// The stream ends after a page without a next link, or before the
    /// first empty page. A next link pointing at an already fetched URL
    /// fails with [`Error::PaginationLoop`].
    pub fn into_stream(self) -> PageStream<P> {
        let cursor = Cursor {
            client: self.client,
            config: self.config,
            next: Some(self.initial),
            seen: HashSet::new(),
        };

        Box::pin(stream::try_unfold(cursor, |mut cursor| async move {
            let Some(url) = cursor.next.take() else {
                return Ok(None);
            };

            if !cursor.seen.insert(url.to_string()) {
                warn!("Next page link points back at {}", url);
                return Err(Error::PaginationLoop {
                    url: url.to_string(),
                });
            }

            let response = cursor.client.get(&url, cursor.config.clone()).await?;
            let page = P::from_response(response)?;
            if page.is_empty() {
                debug!("Empty page at {}, pagination done", url);
                return Ok(None);
            }

            cursor.next = page.next_link()?.resolve(&url)?;
            debug!(
                "Fetched page {} with {} records, next: {:?}",
                cursor.seen.len(),
                page.items().len(),
                cursor.next.as_ref().map(Url::as_str)
            );
            Ok(Some((page, cursor)))
        }))
    }

    /// Visit pages in order until `visit` returns `false` or an error.
    ///
    /// Pages after the last visited one are never requested.
    pub async fn each_page<F>(self, mut visit: F) -> Result<()>
    where
        F: FnMut(P) -> Result<bool>,
    {
        let mut pages = self.into_stream();
        while let Some(page) = pages.try_next().await? {
            if !visit(page)? {
                break;
            }
        }
        Ok(())
    }

    /// Fetch every page
    pub async fn all_pages(self) -> Result<Vec<P>> {
        self.into_stream().try_collect().await
    }

    /// Fetch every page and concatenate their records in server order
    pub async fn all_items(self) -> Result<Vec<P::Item>> {
        let mut items = Vec::new();
        let mut pages = self.into_stream();
        while let Some(page) = pages.try_next().await? {
            items.extend(page.into_items());
        }
        Ok(items)
    }
}

impl<P> std::fmt::Debug for Pager<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("initial", &self.initial.as_str())
            .finish_non_exhaustive()
    }
}
