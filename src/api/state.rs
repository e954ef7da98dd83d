//! Application State
//!
//! Shared state accessible by all handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

use crate::api::error::{ApiError, ApiResult};
use crate::clock::{Clock, LocalClock};
use crate::config::{Config, ServerConfig};
use crate::entry::Submission;
use crate::guestbook::{Guestbook, SubmitOutcome};
use crate::store::{EntryStore, FileKeyValue, KeyValueEntryStore, MemoryKeyValue, StoreResult};

/// Guestbook over type-erased store and clock, shareable across threads
pub type SharedGuestbook =
    Guestbook<Box<dyn EntryStore + Send + Sync>, Box<dyn Clock + Send + Sync>>;

/// Shared application state for all handlers
pub struct AppState {
    /// Server-side guestbook
    pub guestbook: Arc<SharedGuestbook>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
    /// Serializes read-modify-write saves within this process
    write_lock: Mutex<()>,
}

impl AppState {
    /// Create state around an existing guestbook
    pub fn new(guestbook: SharedGuestbook, config: ServerConfig) -> Self {
        Self {
            guestbook: Arc::new(guestbook),
            config: Arc::new(config),
            start_time: Instant::now(),
            write_lock: Mutex::new(()),
        }
    }

    /// Create state backed by the configured entry file
    pub fn from_config(config: &Config) -> StoreResult<Self> {
        let kv = FileKeyValue::open(config.storage.file_path())?;
        tracing::info!("Entry file: {:?}", kv.path());

        let store: Box<dyn EntryStore + Send + Sync> = Box::new(KeyValueEntryStore::new(kv));
        let guestbook = Self::build_guestbook(store, Box::new(LocalClock::new()))
            .render_policy(config.render.policy())
            .malformed_policy(config.storage.on_malformed);

        Ok(Self::new(guestbook, config.server.clone()))
    }

    /// Create state with an in-memory store
    pub fn in_memory(config: ServerConfig, clock: Box<dyn Clock + Send + Sync>) -> Self {
        let store: Box<dyn EntryStore + Send + Sync> =
            Box::new(KeyValueEntryStore::new(MemoryKeyValue::new()));
        Self::new(Self::build_guestbook(store, clock), config)
    }

    fn build_guestbook(
        store: Box<dyn EntryStore + Send + Sync>,
        clock: Box<dyn Clock + Send + Sync>,
    ) -> SharedGuestbook {
        Guestbook::with_clock(store, clock)
    }

    /// Validate and save a submission, one writer at a time
    ///
    /// The store does blocking file IO, so the save runs on the blocking pool
    /// while the write lock is held.
    pub async fn submit(&self, submission: &Submission) -> ApiResult<SubmitOutcome> {
        let _guard = self.write_lock.lock().await;

        let guestbook = Arc::clone(&self.guestbook);
        let submission = submission.clone();
        let outcome = tokio::task::spawn_blocking(move || guestbook.handle_submit(&submission))
            .await
            .map_err(|e| ApiError::Internal(format!("Save task failed: {}", e)))??;

        Ok(outcome)
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
