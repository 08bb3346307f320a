//! HTTP transport
//!
//! Every API call goes through [`HttpClient`], which joins route paths onto the
//! configured endpoint and applies authentication.
//!
//! # Features
//!
//! - **Automatic Retries**: 429, 5xx, timeouts and connect errors are retried with backoff
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Backoff Strategies**: Constant, linear, and exponential backoff

mod client;
mod rate_limit;

pub use client::{
    HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig, DEFAULT_BASE_URL,
};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
