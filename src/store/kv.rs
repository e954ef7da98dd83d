//! Key-value backends
//!
//! `KeyValueStore` has the shape of the browser `Storage` interface: string
//! keys, string values, whole-value overwrite. The entry store sits on top of
//! it, so the same guestbook logic runs against localStorage in the browser,
//! a JSON file on the server, or a map in tests.

use std::collections::HashMap;
use std::sync::Mutex;

use super::error::{StoreError, StoreResult};

/// String key-value storage
pub trait KeyValueStore {
    /// Read the value under `key`, `None` if it was never written
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write `value` under `key`, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> StoreResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set_item(key, value)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set_item(key, value)
    }
}

/// In-memory key-value store
#[derive(Debug, Default)]
pub struct MemoryKeyValue {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: seed a raw value
    pub fn with_item(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Ok(mut items) = self.items.lock() {
            items.insert(key.into(), value.into());
        }
        self
    }
}

impl KeyValueStore for MemoryKeyValue {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        let items = self
            .items
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut items = self
            .items
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
