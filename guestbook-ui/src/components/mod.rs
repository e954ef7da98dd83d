//! UI Components
//!
//! Leptos components for the guestbook widget.

pub mod entry_list;
pub mod sign_form;

pub use entry_list::EntryList;
pub use sign_form::SignForm;
