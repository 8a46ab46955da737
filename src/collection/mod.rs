//! Resource collection surface
//!
//! # Overview
//!
//! `ResourceList<T>` is the caller-facing surface every remote collection is
//! built on:
//!
//! - [`ResourceList::each`]: lazy, early-terminable streaming of records
//! - [`ResourceList::list`]: bounded in-memory collection
//! - [`ResourceList::page`]: a single raw page fetch
//! - [`ResourceList::get`]: named lookup of one instance context
//!
//! Page fetches are strictly sequential. Exactly one request is outstanding
//! at a time per session; independent sessions share nothing and may
//! overlap freely.

mod context;

pub use context::{Identified, RecordHandle, ResourceContext};

use crate::error::Result;
use crate::http::{RequestConfig, RestClient};
use crate::limits;
use crate::page::Page;
use crate::uri::{self, QueryParams};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;


/// Wire name of the continuation token parameter
const PAGE_TOKEN_PARAM: &str = "page_token";
/// Wire name of the page number parameter
const PAGE_NUMBER_PARAM: &str = "page";
/// Wire name of the page size parameter
const PAGE_SIZE_PARAM: &str = "page_size";

/// Early-termination capability handed to each record callback
///
/// Calling [`StopSignal::stop`] marks the session terminated: no further
/// record of the current page is delivered and no subsequent page is
/// fetched. The flag is monotonic; calling `stop` again has no additional
/// effect.
#[derive(Debug, Default)]
pub struct StopSignal {
    stopped: AtomicBool,
}

impl StopSignal {
    fn new() -> Self {
        Self::default()
    }

    /// Terminate the streaming session
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Relaxed);
    }

    /// Check whether the session has been terminated
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }
}

/// Options for a streaming or collecting read
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Upper limit for the number of records to return; no limit when unset
    pub limit: Option<usize>,
    /// Number of records to fetch per request
    ///
    /// When unset and a limit is given, the limit is read with the most
    /// efficient page size, i.e. `min(limit, 1000)`; otherwise 50.
    pub page_size: Option<u32>,
    /// Resource-specific filter fields, forwarded as query parameters
    pub filters: QueryParams,
}

impl ReadOptions {
    /// Create empty read options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the total-record limit
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the per-request page size
    #[must_use]
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Add a resource filter field
    #[must_use]
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }
}

/// Options for a single raw page fetch
#[derive(Debug, Clone, Default)]
pub struct PageOptions {
    /// Continuation token provided by a previous page
    pub page_token: Option<String>,
    /// Page number hint, client-side bookkeeping only
    ///
    /// The upstream API is not required to treat it as authoritative.
    pub page_number: Option<u32>,
    /// Number of records to request
    pub page_size: Option<u32>,
    /// Resource-specific filter fields, forwarded as query parameters
    pub filters: QueryParams,
}

impl PageOptions {
    /// Create empty page options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the continuation token
    #[must_use]
    pub fn page_token(mut self, token: impl Into<String>) -> Self {
        self.page_token = Some(token.into());
        self
    }

    /// Set the client-side page number hint
    #[must_use]
    pub fn page_number(mut self, number: u32) -> Self {
        self.page_number = Some(number);
        self
    }

    /// Set the page size
    #[must_use]
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Add a resource filter field
    #[must_use]
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }
}

/// One remote resource collection
///
/// Holds the transport client, the collection path, and the payload key its
/// records live under. Cheap to clone; sessions started from the same list
/// are fully independent.
pub struct ResourceList<T> {
    client: Arc<RestClient>,
    path: String,
    records_key: String,
    _records: PhantomData<fn() -> T>,
}

impl<T> Clone for ResourceList<T> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            path: self.path.clone(),
            records_key: self.records_key.clone(),
            _records: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for ResourceList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceList")
            .field("path", &self.path)
            .field("records_key", &self.records_key)
            .finish_non_exhaustive()
    }
}

impl<T: DeserializeOwned> ResourceList<T> {
    /// Create a collection at the given path
    ///
    /// `records_key` names the payload field the record list lives under.
    pub fn new(
        client: Arc<RestClient>,
        path: impl Into<String>,
        records_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            path: path.into(),
            records_key: records_key.into(),
            _records: PhantomData,
        }
    }

    /// Create a collection whose path is rendered from path parameters
    ///
    /// Used for nested collections, e.g.
    /// `/v1/Devices/{device_sid}/Commands`.
    pub fn with_path_params(
        client: Arc<RestClient>,
        template: &str,
        params: &QueryParams,
        records_key: impl Into<String>,
    ) -> Result<Self> {
        let path = uri::render(template, params)?;
        Ok(Self::new(client, path, records_key))
    }

    /// The collection path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Stream records from the collection
    ///
    /// Lazily fetches pages one at a time and feeds each record, in arrival
    /// order, to `on_record` together with a [`StopSignal`]. Streaming ends
    /// at the first of: the stop signal firing, the limit policy's page cap,
    /// the upstream reporting no further page, or a failed fetch. Exactly
    /// one of those outcomes resolves the returned future.
    ///
    /// Invalid limit or page-size arguments fail before any request is
    /// made.
    pub async fn each<F>(&self, opts: ReadOptions, mut on_record: F) -> Result<()>
    where
        F: FnMut(T, &StopSignal),
    {
        let limits = limits::compute(opts.limit, opts.page_size)?;
        if limits.page_limit == Some(0) {
            return Ok(());
        }

        let signal = StopSignal::new();
        let mut pages_fetched: u32 = 1;

        let first = PageOptions {
            page_size: Some(limits.page_size),
            filters: opts.filters,
            ..PageOptions::default()
        };
        let mut page = self.page(first).await?;

        loop {
            let next_url = page.next_page_url().map(str::to_owned);
            debug!(
                "Page {} of {} carried {} records",
                pages_fetched,
                self.path,
                page.len()
            );

            for record in page.into_records() {
                if signal.is_stopped() {
                    break;
                }
                on_record(record, &signal);
            }

            // A stop observed mid-page ends the session before the page
            // count or continuation are consulted.
            if signal.is_stopped() {
                return Ok(());
            }

            if !limits.allows_page(pages_fetched) {
                return Ok(());
            }

            let Some(url) = next_url else {
                return Ok(());
            };

            pages_fetched += 1;
            page = self.fetch_page_url(&url).await?;
        }
    }

    /// Collect records from the collection into a bounded vector
    ///
    /// Built strictly atop [`ResourceList::each`]: accumulates records in
    /// arrival order and stops the instant the accumulated length reaches
    /// `opts.limit`. Never returns more than the requested limit. On a
    /// failure mid-stream the partial accumulation is discarded and the
    /// error returned instead.
    pub async fn list(&self, opts: ReadOptions) -> Result<Vec<T>> {
        let limit = opts.limit;
        let mut records = Vec::new();

        self.each(opts, |record, signal| {
            records.push(record);
            if limit.is_some_and(|requested| records.len() >= requested) {
                signal.stop();
            }
        })
        .await?;

        Ok(records)
    }

    /// Fetch a single raw page
    ///
    /// One transport round trip, executed immediately. Transport failures
    /// propagate unwrapped.
    pub async fn page(&self, opts: PageOptions) -> Result<Page<T>> {
        let mut request = RequestConfig::new();

        for (key, value) in &opts.filters {
            request = request.query(key, value);
        }
        if let Some(ref token) = opts.page_token {
            request = request.query(PAGE_TOKEN_PARAM, token);
        }
        if let Some(number) = opts.page_number {
            request = request.query(PAGE_NUMBER_PARAM, number.to_string());
        }
        if let Some(size) = opts.page_size {
            request = request.query(PAGE_SIZE_PARAM, size.to_string());
        }

        let payload: Value = self
            .client
            .get_json_with_config(&self.path, request)
            .await?;
        Page::from_payload(payload, &self.records_key)
    }

    /// Fetch the page following `page`, or `None` when the collection is
    /// exhausted
    pub async fn next_page(&self, page: &Page<T>) -> Result<Option<Page<T>>> {
        match page.next_page_url() {
            Some(url) => Ok(Some(self.fetch_page_url(url).await?)),
            None => Ok(None),
        }
    }

    /// Look up the context of one instance by identifier
    pub fn get(&self, sid: &str) -> ResourceContext<T> {
        ResourceContext::new(Arc::clone(&self.client), format!("{}/{sid}", self.path))
    }

    /// Couple a fetched record with its lazily constructed context
    pub fn handle(&self, record: T) -> RecordHandle<T>
    where
        T: Identified,
    {
        RecordHandle::new(Arc::clone(&self.client), self.path.clone(), record)
    }

    /// Fetch a page through its continuation URL
    async fn fetch_page_url(&self, url: &str) -> Result<Page<T>> {
        let payload: Value = self.client.get_json(url).await?;
        Page::from_payload(payload, &self.records_key)
    }
}
