// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::needless_pass_by_value)]

//! # pageflow
//!
//! A minimal, Rust-native engine for streaming paginated REST resource
//! collections.
//!
//! Every collection exposed by a resource API comes down to the same three
//! reads: stream records lazily until told to stop, collect a bounded list,
//! or fetch one raw page. pageflow implements that triad once (limit
//! policy, page chaining, early termination) so a resource layer only has
//! to say where its collection lives and what its records deserialize into.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pageflow::{ReadOptions, ResourceList, RestClient, RestClientConfig, Result};
//! use serde::Deserialize;
//! use std::sync::Arc;
//!
//! #[derive(Debug, Deserialize)]
//! struct Device {
//!     sid: String,
//!     name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = RestClientConfig::builder()
//!         .base_url("https://api.example.com")
//!         .basic_auth("AC123", "secret")
//!         .build();
//!     let client = Arc::new(RestClient::with_config(config));
//!
//!     let devices: ResourceList<Device> =
//!         ResourceList::new(client, "/v1/Devices", "devices");
//!
//!     // Bounded collection: never more than 200 records, in arrival order.
//!     let first_two_hundred = devices.list(ReadOptions::new().limit(200)).await?;
//!
//!     // Lazy stream with early termination.
//!     devices
//!         .each(ReadOptions::new(), |device, stop| {
//!             if device.name.starts_with("retired-") {
//!                 stop.stop();
//!             }
//!         })
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   ResourceList<T> surface                   │
//! │  each() → streamed records    list() → bounded Vec<T>       │
//! │  page() → one raw Page<T>     get(sid) → ResourceContext<T> │
//! └─────────────────────────────────────────────────────────────┘
//!                 │
//! ┌────────┬──────┴──────┬─────────────┬──────────────┐
//! │ Limits │    Page     │  Transport  │   Context    │
//! ├────────┼─────────────┼─────────────┼──────────────┤
//! │ size   │ records     │ GET/POST    │ fetch        │
//! │ pages  │ next page   │ base URL    │ update       │
//! │ cap    │ metadata    │ basic auth  │ remove       │
//! └────────┴─────────────┴─────────────┴──────────────┘
//! ```
//!
//! Page fetches are strictly sequential, never concurrent, so ordered,
//! at-most-limit delivery is trivially correct and memory stays bounded to
//! one page regardless of collection size.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Limit policy calculation
pub mod limits;

/// The page abstraction
pub mod page;

/// HTTP transport
pub mod http;

/// Resource collections, streaming, and instance contexts
pub mod collection;

/// Resource path construction
pub mod uri;

// ============================================================================
// Re-exports
// ============================================================================

pub use collection::{
    Identified, PageOptions, ReadOptions, RecordHandle, ResourceContext, ResourceList, StopSignal,
};
pub use error::{Error, Result};
pub use http::{RequestConfig, RestClient, RestClientConfig};
pub use limits::{ReadLimits, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use page::Page;
pub use uri::QueryParams;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
