//! Page abstraction
//!
//! One network-fetched batch of records plus the continuation reference
//! needed to request the next batch. A page is immutable once constructed
//! and owned by whichever call fetched it; the engine discards it after its
//! records are consumed and, if needed, its continuation followed.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// One page of deserialized records
///
/// `next_page_url` is `None` exactly when the upstream reports no further
/// page.
#[derive(Debug, Clone)]
pub struct Page<T> {
    records: Vec<T>,
    next_page_url: Option<String>,
}

impl<T: DeserializeOwned> Page<T> {
    /// Build a page from a raw response payload
    ///
    /// Records are taken from `payload[records_key]` and deserialized in the
    /// order received. Older payload generations omit the explicit key; for
    /// those the list is found through the `meta.key` field. The
    /// continuation lives at `meta.next_page_url`, with the legacy top-level
    /// `next_page_uri` as fallback; JSON null, absence, or an empty string
    /// all mean the collection is exhausted.
    pub fn from_payload(mut payload: Value, records_key: &str) -> Result<Self> {
        let next_page_url = extract_next_page_url(&payload);
        let raw_records = take_records(&mut payload, records_key)?;

        let mut records = Vec::with_capacity(raw_records.len());
        for raw in raw_records {
            records.push(serde_json::from_value(raw)?);
        }

        Ok(Self {
            records,
            next_page_url,
        })
    }
}

impl<T> Page<T> {
    /// The records of this page, in arrival order
    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Consume the page, yielding its records in arrival order
    pub fn into_records(self) -> Vec<T> {
        self.records
    }

    /// Continuation reference for the next page, if one exists
    pub fn next_page_url(&self) -> Option<&str> {
        self.next_page_url.as_deref()
    }

    /// Check whether the upstream has more records after this page
    pub fn has_next_page(&self) -> bool {
        self.next_page_url.is_some()
    }

    /// Number of records in this page
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check whether this page carries no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Pull the raw record list out of a payload
fn take_records(payload: &mut Value, records_key: &str) -> Result<Vec<Value>> {
    let object = payload.as_object_mut().ok_or_else(|| {
        Error::record_extraction(records_key, "payload is not a JSON object")
    })?;

    if let Some(value) = object.remove(records_key) {
        return match value {
            Value::Array(items) => Ok(items),
            _ => Err(Error::record_extraction(records_key, "value is not a list")),
        };
    }

    // Older payloads name their record list inside the pagination metadata.
    let meta_key = object
        .get("meta")
        .and_then(|meta| meta.get("key"))
        .and_then(Value::as_str)
        .map(str::to_owned);

    if let Some(key) = meta_key {
        if let Some(Value::Array(items)) = object.remove(&key) {
            return Ok(items);
        }
    }

    Err(Error::record_extraction(
        records_key,
        "no record list in payload",
    ))
}

/// Extract the continuation URL from the pagination metadata
fn extract_next_page_url(payload: &Value) -> Option<String> {
    let url = payload
        .get("meta")
        .and_then(|meta| meta.get("next_page_url"))
        .and_then(Value::as_str)
        .or_else(|| payload.get("next_page_uri").and_then(Value::as_str))?;

    if url.is_empty() {
        None
    } else {
        Some(url.to_string())
    }
}
