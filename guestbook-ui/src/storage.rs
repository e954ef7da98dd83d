//! localStorage backend
//!
//! `KeyValueStore` over the browser `Storage` object. When storage is
//! unavailable (no window, storage disabled by privacy settings), every call
//! fails with `StoreError::Unavailable`, which the guestbook renders as an
//! empty collection.

use guestbook::store::{KeyValueStore, StoreError, StoreResult};
use wasm_bindgen::JsValue;

/// Browser `Storage` as a key-value store
#[derive(Debug, Clone)]
pub struct WebStorage {
    storage: Option<web_sys::Storage>,
}

impl WebStorage {
    /// The window's `localStorage`
    pub fn local() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        Self { storage }
    }

    fn storage(&self) -> StoreResult<&web_sys::Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| StoreError::Unavailable("localStorage is not available".to_string()))
    }
}

fn js_error(err: JsValue) -> StoreError {
    StoreError::Unavailable(
        err.as_string()
            .unwrap_or_else(|| format!("{:?}", err)),
    )
}

impl KeyValueStore for WebStorage {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        self.storage()?.get_item(key).map_err(js_error)
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        self.storage()?.set_item(key, value).map_err(js_error)
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use guestbook::{Guestbook, KeyValueEntryStore, Submission};
    use guestbook::FixedClock;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const TEST_KEY: &str = "guestbook-ui-test";

    fn clear() {
        if let Some(storage) = WebStorage::local().storage {
            let _ = storage.remove_item(TEST_KEY);
        }
    }

    #[wasm_bindgen_test]
    fn round_trip_through_local_storage() {
        clear();
        let kv = WebStorage::local();
        kv.set_item(TEST_KEY, "[]").unwrap();
        assert_eq!(kv.get_item(TEST_KEY).unwrap().as_deref(), Some("[]"));
        clear();
    }

    #[wasm_bindgen_test]
    fn guestbook_prepends_in_local_storage() {
        clear();
        let book = Guestbook::with_clock(
            KeyValueEntryStore::with_key(WebStorage::local(), TEST_KEY),
            FixedClock::new("now"),
        );

        book.handle_submit(&Submission::new("Ann", "Hi")).unwrap();
        book.handle_submit(&Submission::new("Bob", "Yo")).unwrap();
        assert!(!book.handle_submit(&Submission::new("Eve", "  ")).unwrap().is_saved());

        let rendered = book.render_on_load();
        let authors: Vec<_> = rendered.blocks().iter().map(|b| b.author.clone()).collect();
        assert_eq!(authors, vec!["Bob", "Ann"]);
        clear();
    }

    #[wasm_bindgen_test]
    fn missing_storage_is_unavailable() {
        let kv = WebStorage { storage: None };
        assert!(matches!(kv.get_item(TEST_KEY), Err(StoreError::Unavailable(_))));
    }
}
