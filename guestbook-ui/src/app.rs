//! App Root Component
//!
//! Builds the browser guestbook and provides it to the components.

use leptos::*;
use std::rc::Rc;

use guestbook::{Guestbook, KeyValueEntryStore, RenderPolicy};

use crate::clock::BrowserClock;
use crate::components::{EntryList, SignForm};
use crate::storage::WebStorage;

/// Guestbook persisted in the browser's localStorage
pub type BrowserGuestbook = Rc<Guestbook<KeyValueEntryStore<WebStorage>, BrowserClock>>;

/// Root application component
#[component]
pub fn App(policy: RenderPolicy) -> impl IntoView {
    let book: BrowserGuestbook = Rc::new(
        Guestbook::with_clock(KeyValueEntryStore::new(WebStorage::local()), BrowserClock)
            .render_policy(policy),
    );
    provide_context(book.clone());

    // Read once per page load
    let rendered = book.render_on_load();

    view! {
        <EntryList rendered=rendered policy=policy />
        <SignForm />
    }
}
