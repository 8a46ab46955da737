//! Instance contexts
//!
//! The per-instance I/O wrappers every collection pairs its records with:
//! fetch, update, remove against one instance URI, plus a handle type that
//! couples a fetched record with a lazily constructed context.

use crate::error::{Error, Result};
use crate::http::RestClient;
use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

/// A record that exposes its own string identifier
pub trait Identified {
    /// The unique identifier of this record
    fn sid(&self) -> &str;
}

/// Context for one remote instance
///
/// Carries the instance URI and the simple I/O operations on it.
pub struct ResourceContext<T> {
    client: Arc<RestClient>,
    uri: String,
    _record: PhantomData<fn() -> T>,
}

impl<T> ResourceContext<T> {
    /// Create a context for the given instance URI
    pub fn new(client: Arc<RestClient>, uri: impl Into<String>) -> Self {
        Self {
            client,
            uri: uri.into(),
            _record: PhantomData,
        }
    }

    /// The instance URI
    pub fn uri(&self) -> &str {
        &self.uri
    }
}

impl<T> std::fmt::Debug for ResourceContext<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceContext")
            .field("uri", &self.uri)
            .finish_non_exhaustive()
    }
}

impl<T: DeserializeOwned> ResourceContext<T> {
    /// Fetch the instance
    pub async fn fetch(&self) -> Result<T> {
        self.client.get_json(&self.uri).await
    }

    /// Update the instance with the given JSON body
    pub async fn update(&self, body: Value) -> Result<T> {
        let response = self.client.post(&self.uri, body).await?;
        let record = response.json().await.map_err(Error::Http)?;
        Ok(record)
    }

    /// Remove the instance
    pub async fn remove(&self) -> Result<()> {
        self.client.delete(&self.uri).await?;
        Ok(())
    }
}

/// A fetched record coupled with its instance context
///
/// The context is constructed on first use and cached for the lifetime of
/// the handle. Sessions are single-threaded, so a single initialization
/// check suffices.
pub struct RecordHandle<T> {
    client: Arc<RestClient>,
    collection_path: String,
    record: T,
    context: OnceCell<ResourceContext<T>>,
}

impl<T> std::fmt::Debug for RecordHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordHandle")
            .field("collection_path", &self.collection_path)
            .field("context_initialized", &self.context.get().is_some())
            .finish_non_exhaustive()
    }
}

impl<T: Identified> RecordHandle<T> {
    pub(crate) fn new(client: Arc<RestClient>, collection_path: String, record: T) -> Self {
        Self {
            client,
            collection_path,
            record,
            context: OnceCell::new(),
        }
    }

    /// The record itself
    pub fn record(&self) -> &T {
        &self.record
    }

    /// Consume the handle, yielding the record
    pub fn into_record(self) -> T {
        self.record
    }

    /// The instance context, constructed on first access
    pub fn context(&self) -> &ResourceContext<T> {
        self.context.get_or_init(|| {
            ResourceContext::new(
                Arc::clone(&self.client),
                format!("{}/{}", self.collection_path, self.record.sid()),
            )
        })
    }
}

impl<T: Identified + DeserializeOwned> RecordHandle<T> {
    /// Fetch a fresh copy of the record
    pub async fn fetch(&self) -> Result<T> {
        self.context().fetch().await
    }

    /// Update the record with the given JSON body
    pub async fn update(&self, body: Value) -> Result<T> {
        self.context().update(body).await
    }

    /// Remove the record
    pub async fn remove(&self) -> Result<()> {
        self.context().remove().await
    }
}
