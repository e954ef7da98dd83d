//! Guestbook Entries
//!
//! The entry model shared by the browser widget and the host server:
//!
//! - **types**: `Entry`, the stored greeting, and `Submission`, the raw form input
//!
//! # Storage shape
//!
//! ```text
//! [{"Author": "Ann", "Content": "Hi", "Date": "10/18/2026, 3:04:05 PM"}, ...]
//! ```
//!
//! The list is ordered newest first.

pub mod types;

pub use types::{Entry, Submission, ANONYMOUS_AUTHOR, ANONYMOUS_DISPLAY_AUTHOR};
