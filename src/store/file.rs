//! File-backed key-value store
//!
//! Persists all keys as one JSON object in a single file, the server-side
//! counterpart of the browser's localStorage. Every write rewrites the whole
//! file through a temporary sibling and a rename.
//!
//! Reads of a corrupted file fail with `StoreError::Malformed`. A write to a
//! corrupted file moves it aside to `<name>.corrupt` and starts from an empty
//! map, like `localStorage.setItem` over a value that never parsed.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::error::{StoreError, StoreResult};
use super::kv::KeyValueStore;

/// Default file name inside the data directory
pub const DEFAULT_FILE_NAME: &str = "local_storage.json";

/// Key-value store kept in a JSON file
#[derive(Debug)]
pub struct FileKeyValue {
    path: PathBuf,
    /// Serializes read-modify-write of the file within this process
    lock: Mutex<()>,
}

impl FileKeyValue {
    /// Open a store at `path`, creating parent directories as needed
    ///
    /// The file itself is created on first write.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        tracing::debug!("Opened key-value file {:?}", path);

        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    /// Open `DEFAULT_FILE_NAME` inside `data_dir`
    pub fn in_dir(data_dir: impl AsRef<Path>) -> StoreResult<Self> {
        Self::open(data_dir.as_ref().join(DEFAULT_FILE_NAME))
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> StoreResult<BTreeMap<String, String>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&raw).map_err(|e| StoreError::Malformed {
            key: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Move an unreadable file out of the way so writes can proceed
    fn quarantine(&self) -> StoreResult<PathBuf> {
        let backup = self.path.with_extension("json.corrupt");
        std::fs::rename(&self.path, &backup)?;
        Ok(backup)
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(map)?;

        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }
}

impl KeyValueStore for FileKeyValue {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        let _guard = self
            .lock
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))?;

        let map = self.read_map()?;
        Ok(map.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))?;

        let mut map = match self.read_map() {
            Ok(map) => map,
            Err(StoreError::Malformed { reason, .. }) => {
                let backup = self.quarantine()?;
                tracing::warn!(
                    %reason,
                    "Key-value file {:?} is corrupted, moved to {:?} and starting empty",
                    self.path,
                    backup
                );
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)?;

        tracing::debug!(key, bytes = value.len(), "Wrote key to {:?}", self.path);
        Ok(())
    }
}
