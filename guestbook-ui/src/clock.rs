//! Browser clock
//!
//! Formats the save time with the browser's own locale settings.

use guestbook::Clock;
use wasm_bindgen::JsValue;

/// Clock backed by JavaScript `Date`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_string(&self) -> String {
        js_sys::Date::new_0()
            .to_locale_string("default", &JsValue::UNDEFINED)
            .into()
    }
}
