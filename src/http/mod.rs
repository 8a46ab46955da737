//! HTTP transport module
//!
//! The transport collaborator behind the pagination engine: one network
//! round trip per call, base URL resolution, default headers, basic auth.
//! Retry and backoff are deliberately absent; a failed request surfaces
//! immediately to the caller.

mod client;

pub use client::{RequestConfig, RestClient, RestClientConfig, RestClientConfigBuilder};

#[cfg(test)]
mod tests;
