//! Page Routes
//!
//! - GET / - The guestbook page
//! - anything unmatched - 404
//!
//! The page works without scripts: server-side entries are rendered inline
//! and the form posts to `/sign`. When the widget bundle is present under
//! `/static/`, it mounts into `#guestbook` and takes over the form, keeping a
//! browser-local copy of every greeting it submits.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
};
use std::sync::Arc;

use crate::api::state::AppState;

/// Script path of the compiled widget bundle
pub const WIDGET_SCRIPT: &str = "/static/guestbook_ui.js";

/// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_page(&state.guestbook.render_html()))
}

/// Fallback for unmatched paths
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "404 page not found")
}

/// Full page HTML around pre-rendered server entries
pub fn render_page(server_entries_html: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Guestbook</title>
  <style>
    body {{ font-family: sans-serif; max-width: 40em; margin: 2em auto; }}
    .entry {{ border-bottom: 1px solid #ddd; padding: 0.5em 0; }}
    pre {{ white-space: pre-wrap; }}
  </style>
</head>
<body>
  <h1>Guestbook</h1>
  <div id="guestbook">
    <div id="entries"></div>
    <form id="guestbook-form" action="/sign" method="post">
      <div><input id="author" name="author" placeholder="Your name"></div>
      <div><textarea id="content" name="content" rows="3" cols="60"></textarea></div>
      <div><input type="submit" value="Sign Guestbook"></div>
    </form>
  </div>
  <h2>Signed on this server</h2>
  <div id="server-entries">{server_entries_html}</div>
  <script type="module">
    import init from "{WIDGET_SCRIPT}";
    init().catch(() => {{}});
  </script>
</body>
</html>
"#
    )
}
