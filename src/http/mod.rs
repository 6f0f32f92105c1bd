//! HTTP transport module
//!
//! Provides the shared HTTP client every service handle talks through.
//!
//! # Features
//!
//! - **Authentication**: `X-Auth-Token` injected by the auth module
//! - **Rate Limiting**: Optional token bucket rate limiter using governor
//! - **Status Checks**: Any 2xx by default, or an explicit accepted set per call
//! - **Error Decoding**: Service error bodies turned into [`crate::error::ApiError`]

mod client;
mod rate_limit;
mod response;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestBody, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use response::{api_error, decode_error_body, request_id, ActionOutcome, Created, RawResponse};
