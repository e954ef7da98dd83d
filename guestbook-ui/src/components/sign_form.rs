//! Sign Form Component
//!
//! Form for adding a greeting. Saving happens in the browser; the form then
//! submits natively to its action so the server sees the greeting too.

use leptos::*;
use wasm_bindgen::JsCast;

use guestbook::store::EntryStore;
use guestbook::{Clock, Guestbook, Submission, SubmitOutcome};

use crate::app::BrowserGuestbook;

/// Sign form with `#author` and `#content` fields
#[component]
pub fn SignForm() -> impl IntoView {
    let book = use_context::<BrowserGuestbook>().expect("BrowserGuestbook not found");

    let author_ref = create_node_ref::<html::Input>();
    let content_ref = create_node_ref::<html::Textarea>();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let author = author_ref.get().map(|el| el.value()).unwrap_or_default();
        let content = content_ref.get().map(|el| el.value()).unwrap_or_default();

        match submit_action(&book, &Submission::new(author, content)) {
            FormAction::Alert(message) => show_alert(&message),
            FormAction::Resubmit => submit_natively(&ev),
        }
    };

    view! {
        <form id="guestbook-form" action="/sign" method="post" on:submit=on_submit>
            <div>
                <input id="author" name="author" placeholder="Your name" node_ref=author_ref />
            </div>
            <div>
                <textarea id="content" name="content" rows="3" cols="60" node_ref=content_ref />
            </div>
            <div>
                <input type="submit" value="Sign Guestbook" />
            </div>
        </form>
    }
}

/// Alert shown when the greeting could not be written to storage
pub const SAVE_FAILED_ALERT: &str = "Your message could not be saved.";

/// What the form does after its submit event was intercepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    /// Stay on the page and show the message
    Alert(String),
    /// The greeting is stored; let the browser post the form
    Resubmit,
}

/// Validate and store a submission, deciding how the form continues
pub fn submit_action<S: EntryStore, C: Clock>(
    book: &Guestbook<S, C>,
    submission: &Submission,
) -> FormAction {
    match book.handle_submit(submission) {
        Ok(SubmitOutcome::Rejected { alert }) => FormAction::Alert(alert),
        Ok(SubmitOutcome::Saved { .. }) => FormAction::Resubmit,
        Err(e) => {
            web_sys::console::error_1(&format!("Failed to save greeting: {}", e).into());
            FormAction::Alert(SAVE_FAILED_ALERT.to_string())
        }
    }
}

/// Blocking browser alert
fn show_alert(message: &str) {
    if let Err(e) = window().alert_with_message(message) {
        web_sys::console::error_1(&e);
    }
}

/// Re-run the form's own submission; `submit()` does not fire `submit` again
fn submit_natively(ev: &web_sys::SubmitEvent) {
    let form = ev
        .target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlFormElement>().ok());

    match form.map(|f| f.submit()) {
        Some(Ok(())) => {}
        Some(Err(e)) => web_sys::console::error_1(&e),
        None => web_sys::console::error_1(&"Submit event has no form target".into()),
    }
}
