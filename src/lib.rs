//! # Guestbook
//!
//! A guestbook widget that renders stored greetings on page load and prepends
//! new ones on form submission, plus an optional Axum server that hosts the
//! page and accepts the form's native submission.
//!
//! ## Modules
//!
//! - [`entry`]: The `Entry` model and raw form `Submission`
//! - [`store`]: Key-value backends and the `EntryStore` interface
//! - [`render`]: Display blocks and HTML with an explicit escaping policy
//! - [`clock`]: Timestamp sources
//! - [`guestbook`]: Render-on-load, save-entry and submission handling
//! - `config` and `api` (feature `server`): configuration and HTTP server
//!
//! The core modules have no async or server dependencies and compile to
//! WASM with `default-features = false`.
//!
//! ## Quick Start
//!
//! ```rust
//! use guestbook::{Guestbook, KeyValueEntryStore, MemoryKeyValue, Submission};
//!
//! let book = Guestbook::new(KeyValueEntryStore::new(MemoryKeyValue::new()));
//!
//! book.handle_submit(&Submission::new("Ann", "Hi")).unwrap();
//! book.handle_submit(&Submission::new("", "Hello")).unwrap();
//!
//! let rendered = book.render_on_load();
//! assert_eq!(rendered.blocks()[0].header(), "Anonymous wrote:");
//! assert_eq!(rendered.blocks()[1].header(), "Ann wrote:");
//! ```

pub mod clock;
pub mod entry;
pub mod guestbook;
pub mod render;
pub mod store;

#[cfg(feature = "server")]
pub mod api;
#[cfg(feature = "server")]
pub mod config;

// Re-export top-level types for convenience
pub use clock::{Clock, FixedClock, LocalClock};
pub use entry::{Entry, Submission};
pub use guestbook::{Guestbook, MalformedPolicy, SubmitOutcome, EMPTY_CONTENT_ALERT};
pub use render::{render_entries, EntryBlock, RenderPolicy, RenderedEntries, EMPTY_NOTICE};
pub use store::{
    EntryStore, FileKeyValue, KeyValueEntryStore, KeyValueStore, MemoryKeyValue, StoreError,
    StoreResult,
};

#[cfg(feature = "server")]
pub use api::{build_router, serve, ApiError, AppState};
#[cfg(feature = "server")]
pub use config::{Config, ConfigError};
