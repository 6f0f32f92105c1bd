//! Generic JSON list page

use super::strategies::next_link;
use super::types::{Listed, NextLink, Page};
use crate::error::{Error, Result};
use crate::http::RawResponse;
use serde_json::Value;

/// A page of records of type `T` decoded from a JSON list response
#[derive(Debug, Clone)]
pub struct JsonPage<T> {
    response: RawResponse,
    items: Vec<T>,
    next: NextLink,
}

impl<T: Listed> Page for JsonPage<T> {
    type Item = T;

    fn from_response(response: RawResponse) -> Result<Self> {
        // Object storage answers an exhausted listing with 204 and no body
        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self {
                response,
                items: Vec::new(),
                next: NextLink::None,
            });
        }

        let mut body: Value = response.json()?;
        let records = if T::COLLECTION.is_empty() {
            body.take()
        } else {
            body.get_mut(T::COLLECTION).map(Value::take).ok_or_else(|| {
                Error::decode(format!("list response has no '{}' field", T::COLLECTION))
            })?
        };

        let items: Vec<T> = match records {
            Value::Null => Vec::new(),
            records => serde_json::from_value(records)?,
        };

        let next = next_link(T::PAGING, &body, items.last().and_then(T::marker))?;

        Ok(Self {
            response,
            items,
            next,
        })
    }

    fn response(&self) -> &RawResponse {
        &self.response
    }

    fn items(&self) -> &[T] {
        &self.items
    }

    fn into_items(self) -> Vec<T> {
        self.items
    }

    fn next_link(&self) -> Result<NextLink> {
        Ok(self.next.clone())
    }
}
