//! Entry collection store
//!
//! `EntryStore` is the seam the guestbook operations depend on. The
//! key-value implementation keeps the whole collection as one JSON list under
//! the `greetings` key.

use crate::entry::Entry;

use super::error::{StoreError, StoreResult};
use super::kv::KeyValueStore;

/// Storage key holding the serialized entry list
pub const ENTRIES_KEY: &str = "greetings";

/// Persistence for the ordered entry collection (newest first)
pub trait EntryStore {
    /// Load the collection
    ///
    /// Returns an empty list when nothing was ever written and
    /// `StoreError::Malformed` when the stored value cannot be parsed.
    fn load_entries(&self) -> StoreResult<Vec<Entry>>;

    /// Replace the stored collection with `entries`
    fn save_entries(&self, entries: &[Entry]) -> StoreResult<()>;
}

impl<T: EntryStore + ?Sized> EntryStore for Box<T> {
    fn load_entries(&self) -> StoreResult<Vec<Entry>> {
        (**self).load_entries()
    }

    fn save_entries(&self, entries: &[Entry]) -> StoreResult<()> {
        (**self).save_entries(entries)
    }
}

/// Entry store on top of any `KeyValueStore`
#[derive(Debug)]
pub struct KeyValueEntryStore<K> {
    kv: K,
    key: String,
}

impl<K: KeyValueStore> KeyValueEntryStore<K> {
    /// Store entries under `ENTRIES_KEY`
    pub fn new(kv: K) -> Self {
        Self::with_key(kv, ENTRIES_KEY)
    }

    /// Store entries under a custom key
    pub fn with_key(kv: K, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Access the underlying key-value store
    pub fn inner(&self) -> &K {
        &self.kv
    }
}

impl<K: KeyValueStore> EntryStore for KeyValueEntryStore<K> {
    fn load_entries(&self) -> StoreResult<Vec<Entry>> {
        let Some(raw) = self.kv.get_item(&self.key)? else {
            return Ok(Vec::new());
        };

        // A stored `null` reads as an empty collection
        let entries: Option<Vec<Entry>> =
            serde_json::from_str(&raw).map_err(|e| StoreError::Malformed {
                key: self.key.clone(),
                reason: e.to_string(),
            })?;

        let entries = entries.unwrap_or_default();
        tracing::debug!(key = %self.key, count = entries.len(), "Loaded entries");
        Ok(entries)
    }

    fn save_entries(&self, entries: &[Entry]) -> StoreResult<()> {
        let json = serde_json::to_string(entries)?;
        self.kv.set_item(&self.key, &json)?;

        tracing::debug!(key = %self.key, count = entries.len(), "Saved entries");
        Ok(())
    }
}
