//! Entry rendering
//!
//! Turns the entry collection into display blocks and HTML fragments.
//!
//! Each entry becomes:
//!
//! ```text
//! <p><b>{author}</b> wrote:</p><pre>{content}</pre><small>{date}</small>
//! ```
//!
//! Field text is escaped unless the caller opts into `RenderPolicy::Raw`,
//! in which case stored markup is inserted as-is.

use serde::{Deserialize, Serialize};

use crate::entry::Entry;

/// Notice shown in place of entries when the collection is empty
pub const EMPTY_NOTICE: &str = "No entries yet. Be the first!";

/// How entry fields are placed into markup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderPolicy {
    /// HTML-escape every field
    #[default]
    Escape,
    /// Insert fields verbatim; stored markup and scripts run as markup
    Raw,
}

impl RenderPolicy {
    /// `Raw` when `raw` is set, `Escape` otherwise
    pub fn from_raw_flag(raw: bool) -> Self {
        if raw {
            RenderPolicy::Raw
        } else {
            RenderPolicy::Escape
        }
    }

    fn apply<'a>(&self, text: &'a str) -> std::borrow::Cow<'a, str> {
        match self {
            RenderPolicy::Escape => escape_html(text),
            RenderPolicy::Raw => std::borrow::Cow::Borrowed(text),
        }
    }
}

/// Display block for one entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryBlock {
    pub author: String,
    pub body: String,
    pub timestamp: String,
}

impl EntryBlock {
    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            author: entry.display_author().to_string(),
            body: entry.content.clone(),
            timestamp: entry.date.clone(),
        }
    }

    /// Header line, e.g. `Ann wrote:`
    pub fn header(&self) -> String {
        format!("{} wrote:", self.author)
    }

    /// Inner HTML of the entry block
    pub fn to_html(&self, policy: RenderPolicy) -> String {
        format!(
            "<p><b>{}</b> wrote:</p><pre>{}</pre><small>{}</small>",
            policy.apply(&self.author),
            policy.apply(&self.body),
            policy.apply(&self.timestamp),
        )
    }
}

/// Result of a render pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedEntries {
    /// No entries; show `EMPTY_NOTICE`
    Empty,
    /// One block per entry, in storage order
    Entries(Vec<EntryBlock>),
}

impl RenderedEntries {
    pub fn is_empty(&self) -> bool {
        matches!(self, RenderedEntries::Empty)
    }

    pub fn blocks(&self) -> &[EntryBlock] {
        match self {
            RenderedEntries::Empty => &[],
            RenderedEntries::Entries(blocks) => blocks,
        }
    }

    /// HTML for the whole entries container
    pub fn to_html(&self, policy: RenderPolicy) -> String {
        match self {
            RenderedEntries::Empty => format!("<p>{}</p>", EMPTY_NOTICE),
            RenderedEntries::Entries(blocks) => blocks
                .iter()
                .map(|b| format!("<div class=\"entry\">{}</div>", b.to_html(policy)))
                .collect(),
        }
    }
}

/// Build display blocks for `entries`
pub fn render_entries(entries: &[Entry]) -> RenderedEntries {
    if entries.is_empty() {
        RenderedEntries::Empty
    } else {
        RenderedEntries::Entries(entries.iter().map(EntryBlock::from_entry).collect())
    }
}

/// Escape `&`, `<`, `>`, `"` and `'` for use in HTML text and attributes
pub fn escape_html(text: &str) -> std::borrow::Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return std::borrow::Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    std::borrow::Cow::Owned(out)
}
