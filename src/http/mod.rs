//! HTTP client module
//!
//! Thin transport over `reqwest`: URL joining, query parameters,
//! authentication, and mapping of non-2xx responses to errors.
//!
//! Requests are never retried. A failure aborts the read of the stream that
//! issued it.

mod client;

pub use client::{join_url, ApiResponse, HttpClient, HttpClientConfig, RequestConfig};
