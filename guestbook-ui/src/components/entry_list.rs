//! Entry List Component
//!
//! Renders the stored greetings, or the empty notice.

use leptos::*;

use guestbook::{RenderPolicy, RenderedEntries, EMPTY_NOTICE};

/// Container `#entries` with one `.entry` block per greeting
#[component]
pub fn EntryList(rendered: RenderedEntries, policy: RenderPolicy) -> impl IntoView {
    let content = match rendered {
        RenderedEntries::Empty => view! { <p>{EMPTY_NOTICE}</p> }.into_view(),
        RenderedEntries::Entries(blocks) => blocks
            .into_iter()
            .map(|block| view! { <div class="entry" inner_html=block.to_html(policy) /> })
            .collect_view(),
    };

    view! { <div id="entries">{content}</div> }
}
