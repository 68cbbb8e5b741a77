//! # Node.js Bindings
//!
//! Exposes `HashTable` to JavaScript through N-API when the crate is built with
//! the `node` feature. Strings cross the boundary by copy; table errors become
//! JS exceptions carrying the error message.

use crate::table::HashTable;
use napi::{Error, Result};
use napi_derive::napi;

/// A key/value pair handed to JavaScript.
#[napi(object)]
pub struct JsEntry {
    pub key: String,
    pub value: String,
}

/// The `HashTable` class seen from JavaScript.
#[napi(js_name = "HashTable")]
pub struct JsHashTable {
    inner: HashTable,
}

#[napi]
impl JsHashTable {
    #[napi(constructor)]
    pub fn new() -> Self {
        Self {
            inner: HashTable::new(),
        }
    }

    #[napi]
    pub fn insert(&mut self, key: String, value: String) -> Result<Option<String>> {
        self.inner
            .insert(&key, &value)
            .map_err(|e| Error::from_reason(e.to_string()))
    }

    #[napi]
    pub fn batch_insert(&mut self, keys: Vec<String>, values: Vec<String>) -> Result<()> {
        self.inner
            .batch_insert(&keys, &values)
            .map_err(|e| Error::from_reason(e.to_string()))
    }

    #[napi]
    pub fn search(&self, key: String) -> Option<String> {
        self.inner.search(&key).map(str::to_owned)
    }

    #[napi]
    pub fn delete(&mut self, key: String) -> bool {
        self.inner.delete(&key)
    }

    #[napi]
    pub fn entries(&self) -> Vec<JsEntry> {
        self.inner
            .iter()
            .map(|(key, value)| JsEntry {
                key: key.to_owned(),
                value: value.to_owned(),
            })
            .collect()
    }

    #[napi(getter)]
    pub fn count(&self) -> Result<u32> {
        u32::try_from(self.inner.len()).map_err(|e| Error::from_reason(e.to_string()))
    }

    #[napi(getter)]
    pub fn size(&self) -> Result<u32> {
        u32::try_from(self.inner.size()).map_err(|e| Error::from_reason(e.to_string()))
    }

    #[napi]
    pub fn average_collisions(&self) -> f64 {
        self.inner.average_collisions()
    }

    #[napi]
    pub fn memory_usage(&self) -> Result<i64> {
        i64::try_from(self.inner.memory_usage()).map_err(|e| Error::from_reason(e.to_string()))
    }
}

impl Default for JsHashTable {
    fn default() -> Self {
        Self::new()
    }
}
