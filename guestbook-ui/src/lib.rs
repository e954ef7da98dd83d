//! Guestbook Widget
//!
//! Browser-side guestbook built with Leptos (WASM).
//!
//! # Behavior
//!
//! - On load, renders the greetings stored in `localStorage` under `greetings`
//! - On submit, rejects blank messages with an alert, otherwise prepends the
//!   greeting to `localStorage` and lets the form submit natively to `/sign`
//!
//! # Mounting
//!
//! The widget mounts into the element with id `guestbook`, replacing its
//! server-rendered fallback. Stored markup is escaped unless that element
//! carries `data-render="raw"`.

use leptos::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use guestbook::RenderPolicy;

mod app;
mod clock;
mod components;
mod storage;

pub use clock::BrowserClock;
pub use storage::WebStorage;

/// Id of the element the widget mounts into
pub const MOUNT_ID: &str = "guestbook";

#[wasm_bindgen(start)]
pub fn start() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    let Some(root) = document()
        .get_element_by_id(MOUNT_ID)
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
    else {
        web_sys::console::warn_1(&format!("#{} not found, guestbook widget not mounted", MOUNT_ID).into());
        return;
    };

    let policy = render_policy(&root);
    root.set_inner_html("");

    mount_to(root, move || view! { <app::App policy=policy /> });
}

/// Markup policy from the mount element's `data-render` attribute
fn render_policy(root: &web_sys::HtmlElement) -> RenderPolicy {
    let raw = root
        .get_attribute("data-render")
        .map(|v| v.eq_ignore_ascii_case("raw"))
        .unwrap_or(false);
    RenderPolicy::from_raw_flag(raw)
}
