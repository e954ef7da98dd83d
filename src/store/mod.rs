//! Guestbook Storage
//!
//! This module provides persistence for the entry collection:
//!
//! - **kv**: `KeyValueStore`, the browser-Storage-shaped backend trait, and an in-memory backend
//! - **file**: JSON-file backend used by the host server
//! - **entries**: `EntryStore`, the collection-level interface, over any key-value backend
//! - **error**: Error types
//!
//! # Architecture
//!
//! ```text
//! Guestbook → EntryStore (load_entries / save_entries)
//!                 │
//!                 └─ KeyValueEntryStore → KeyValueStore ─┬─ MemoryKeyValue
//!                                                        ├─ FileKeyValue
//!                                                        └─ WebStorage (guestbook-ui)
//! ```

pub mod entries;
pub mod error;
pub mod file;
pub mod kv;

pub use entries::{EntryStore, KeyValueEntryStore, ENTRIES_KEY};
pub use error::{StoreError, StoreResult};
pub use file::{FileKeyValue, DEFAULT_FILE_NAME};
pub use kv::{KeyValueStore, MemoryKeyValue};
