//! Pagination module
//!
//! Supports: `<key>_links` arrays, plain `next` URL fields, marker pagination
//!
//! # Overview
//!
//! A list operation returns a [`Pager`]. The pager fetches pages lazily,
//! decodes each response into a resource-specific [`Page`], and follows the
//! page's [`NextLink`] until the list is exhausted. Most resources use the
//! generic [`JsonPage`] by implementing [`Listed`] for their record type.

mod page;
mod pager;
mod strategies;
mod types;

pub use page::JsonPage;
pub use pager::{PageStream, Pager};
pub use strategies::{marker_after, next_from_field, next_from_links, next_link};
pub use types::{Listed, NextLink, Page, Paging};
