//! Guestbook operations
//!
//! The three operations behind the widget, written against an injected
//! `EntryStore` and `Clock`:
//!
//! - `render_on_load`: read the collection and build display blocks
//! - `save_entry`: prepend one entry and write the collection back
//! - `handle_submit`: validate form input, then save
//!
//! All operations are synchronous. The read-modify-write in `save_entry` is
//! not atomic across writers sharing the same backend; callers that share a
//! store between threads serialize saves themselves.

use serde::{Deserialize, Serialize};

use crate::clock::{Clock, LocalClock};
use crate::entry::{Entry, Submission};
use crate::render::{render_entries, RenderPolicy, RenderedEntries};
use crate::store::{EntryStore, StoreError, StoreResult};

/// Alert text shown when a submission has no message
pub const EMPTY_CONTENT_ALERT: &str = "Message cannot be empty.";

/// What to do when the stored collection cannot be parsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Treat as an empty collection; the next save overwrites it
    #[default]
    Reset,
    /// Surface `StoreError::Malformed` and leave the stored value untouched
    Fail,
}

/// Outcome of a form submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing was stored; show `alert` and stay on the page
    Rejected { alert: String },
    /// Entry stored; the form's native submission should proceed
    Saved { entry: Entry },
}

impl SubmitOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SubmitOutcome::Saved { .. })
    }
}

/// Guestbook service over a store and a clock
pub struct Guestbook<S, C = LocalClock> {
    store: S,
    clock: C,
    render_policy: RenderPolicy,
    malformed_policy: MalformedPolicy,
}

impl<S: EntryStore> Guestbook<S, LocalClock> {
    /// Create a guestbook stamped by the local wall clock
    pub fn new(store: S) -> Self {
        Self::with_clock(store, LocalClock::new())
    }
}

impl<S: EntryStore, C: Clock> Guestbook<S, C> {
    /// Create a guestbook with a custom clock
    pub fn with_clock(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            render_policy: RenderPolicy::default(),
            malformed_policy: MalformedPolicy::default(),
        }
    }

    /// Builder method: set the markup policy
    pub fn render_policy(mut self, policy: RenderPolicy) -> Self {
        self.render_policy = policy;
        self
    }

    /// Builder method: set the malformed-storage policy
    pub fn malformed_policy(mut self, policy: MalformedPolicy) -> Self {
        self.malformed_policy = policy;
        self
    }

    pub fn policy(&self) -> RenderPolicy {
        self.render_policy
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the collection, applying the malformed-storage policy
    pub fn entries(&self) -> StoreResult<Vec<Entry>> {
        match self.store.load_entries() {
            Err(StoreError::Malformed { key, reason })
                if self.malformed_policy == MalformedPolicy::Reset =>
            {
                tracing::warn!(%key, %reason, "Stored entries are malformed, treating as empty");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    /// Build the page-load view of the collection
    ///
    /// Never fails: any load error degrades to the empty notice.
    pub fn render_on_load(&self) -> RenderedEntries {
        match self.entries() {
            Ok(entries) => render_entries(&entries),
            Err(e) => {
                tracing::warn!("Failed to load entries, rendering none: {}", e);
                RenderedEntries::Empty
            }
        }
    }

    /// HTML for the entries container, using the configured markup policy
    pub fn render_html(&self) -> String {
        self.render_on_load().to_html(self.render_policy)
    }

    /// Prepend a new entry and write the collection back
    ///
    /// `author` falls back to `Anonymous`; `content` is stored unmodified.
    pub fn save_entry(&self, author: Option<&str>, content: &str) -> StoreResult<Entry> {
        let entry = Entry::new(author, content, self.clock.now_string());

        let mut entries = self.entries()?;
        entries.insert(0, entry.clone());
        self.store.save_entries(&entries)?;

        tracing::info!(
            author = entry.author.as_deref().unwrap_or_default(),
            total = entries.len(),
            "Saved guestbook entry"
        );
        Ok(entry)
    }

    /// Validate a submission and save it
    ///
    /// Blank content (after trimming) is rejected without touching the store.
    /// Accepted submissions are saved with their untrimmed values.
    pub fn handle_submit(&self, submission: &Submission) -> StoreResult<SubmitOutcome> {
        if submission.is_blank() {
            tracing::debug!("Rejected submission with empty content");
            return Ok(SubmitOutcome::Rejected {
                alert: EMPTY_CONTENT_ALERT.to_string(),
            });
        }

        let entry = self.save_entry(submission.author(), &submission.content)?;
        Ok(SubmitOutcome::Saved { entry })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::render::EMPTY_NOTICE;
    use crate::store::{KeyValueEntryStore, KeyValueStore, MemoryKeyValue, ENTRIES_KEY};

    type TestGuestbook = Guestbook<KeyValueEntryStore<MemoryKeyValue>, FixedClock>;

    fn guestbook() -> TestGuestbook {
        guestbook_with(MemoryKeyValue::new())
    }

    fn guestbook_with(kv: MemoryKeyValue) -> TestGuestbook {
        Guestbook::with_clock(
            KeyValueEntryStore::new(kv),
            FixedClock::new("10/18/2026, 3:04:05 PM"),
        )
    }

    fn raw(gb: &TestGuestbook) -> Option<String> {
        gb.store().inner().get_item(ENTRIES_KEY).unwrap()
    }

    #[test]
    fn test_render_empty() {
        let gb = guestbook();
        let rendered = gb.render_on_load();

        assert!(rendered.is_empty());
        assert_eq!(rendered.blocks().len(), 0);
        assert_eq!(gb.render_html(), format!("<p>{}</p>", EMPTY_NOTICE));
    }

    #[test]
    fn test_anonymous_save() {
        let gb = guestbook();
        let entry = gb.save_entry(Some(""), "Hello").unwrap();

        assert_eq!(entry.author.as_deref(), Some("Anonymous"));
        assert_eq!(entry.content, "Hello");
        assert!(!entry.date.is_empty());

        let stored: serde_json::Value = serde_json::from_str(&raw(&gb).unwrap()).unwrap();
        assert_eq!(stored[0]["Author"], "Anonymous");
        assert_eq!(stored[0]["Content"], "Hello");
        assert_eq!(stored[0]["Date"], "10/18/2026, 3:04:05 PM");
    }

    #[test]
    fn test_stored_without_author_renders_fallback() {
        let gb = guestbook_with(
            MemoryKeyValue::new().with_item(ENTRIES_KEY, r#"[{"Content":"Hello","Date":"x"}]"#),
        );
        let rendered = gb.render_on_load();

        assert_eq!(rendered.blocks()[0].header(), "An anonymous person wrote:");
        assert_eq!(rendered.blocks()[0].body, "Hello");
    }

    #[test]
    fn test_newest_first() {
        let gb = guestbook();
        gb.save_entry(Some("Ann"), "Hi").unwrap();
        gb.save_entry(Some("Bob"), "Yo").unwrap();

        let rendered = gb.render_on_load();
        let blocks = rendered.blocks();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].author, "Bob");
        assert_eq!(blocks[0].body, "Yo");
        assert_eq!(blocks[1].author, "Ann");
        assert_eq!(blocks[1].body, "Hi");
    }

    #[test]
    fn test_reverse_chronological_for_many_saves() {
        let gb = guestbook();
        for i in 0..10 {
            let author = format!("author-{i}");
            gb.save_entry(Some(author.as_str()), &format!("message {i}"))
                .unwrap();
        }

        let entries = gb.entries().unwrap();
        let contents: Vec<_> = entries.iter().map(|e| e.content.clone()).collect();
        let expected: Vec<_> = (0..10).rev().map(|i| format!("message {i}")).collect();
        assert_eq!(contents, expected);
    }

    #[test]
    fn test_round_trip_preserves_fields() {
        let gb = guestbook();
        gb.save_entry(Some("Ann"), "  line one\nline two  ").unwrap();
        gb.save_entry(None, "<b>bold</b>").unwrap();

        let entries = gb.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].author.as_deref(), Some("Ann"));
        assert_eq!(entries[1].content, "  line one\nline two  ");
        assert_eq!(entries[0].content, "<b>bold</b>");
        assert!(entries.iter().all(|e| !e.date.is_empty()));
    }

    #[test]
    fn test_submit_blank_rejected() {
        let gb = guestbook();
        gb.save_entry(Some("Ann"), "Hi").unwrap();
        let before = gb.entries().unwrap().len();

        for content in ["", "   ", "\n\t"] {
            let outcome = gb.handle_submit(&Submission::new("Bob", content)).unwrap();
            assert_eq!(
                outcome,
                SubmitOutcome::Rejected {
                    alert: "Message cannot be empty.".to_string()
                }
            );
        }

        assert_eq!(gb.entries().unwrap().len(), before);
    }

    #[test]
    fn test_submit_blank_does_not_write() {
        let gb = guestbook();
        gb.handle_submit(&Submission::new("", "  ")).unwrap();
        assert_eq!(raw(&gb), None);
    }

    #[test]
    fn test_submit_saves_untrimmed() {
        let gb = guestbook();
        let outcome = gb.handle_submit(&Submission::new(" Ann ", "  Hi  ")).unwrap();

        assert!(outcome.is_saved());
        let entries = gb.entries().unwrap();
        assert_eq!(entries[0].author.as_deref(), Some(" Ann "));
        assert_eq!(entries[0].content, "  Hi  ");
    }

    #[test]
    fn test_malformed_reset_renders_empty_and_overwrites() {
        let gb = guestbook_with(MemoryKeyValue::new().with_item(ENTRIES_KEY, "garbage"));

        assert!(gb.render_on_load().is_empty());

        gb.save_entry(Some("Ann"), "Hi").unwrap();
        assert_eq!(gb.entries().unwrap().len(), 1);
    }

    #[test]
    fn test_malformed_fail_preserves_value() {
        let gb = guestbook_with(MemoryKeyValue::new().with_item(ENTRIES_KEY, "garbage"))
            .malformed_policy(MalformedPolicy::Fail);

        assert!(matches!(gb.entries(), Err(StoreError::Malformed { .. })));
        assert!(gb.render_on_load().is_empty());

        let err = gb.handle_submit(&Submission::new("Ann", "Hi")).unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
        assert_eq!(raw(&gb).as_deref(), Some("garbage"));
    }

    #[test]
    fn test_corrupt_file_store_reset_accepts_saves() {
        use crate::store::FileKeyValue;

        let dir = tempfile::tempdir().unwrap();
        let kv = FileKeyValue::in_dir(dir.path()).unwrap();
        std::fs::write(kv.path(), "not json").unwrap();
        let gb = Guestbook::with_clock(KeyValueEntryStore::new(kv), FixedClock::new("now"));

        assert!(gb.render_on_load().is_empty());
        assert!(gb.handle_submit(&Submission::new("Ann", "Hi")).unwrap().is_saved());
        assert!(gb.handle_submit(&Submission::new("Bob", "Yo")).unwrap().is_saved());

        let entries = gb.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].content, "Yo");
    }

    #[test]
    fn test_corrupt_file_store_fail_leaves_file() {
        use crate::store::FileKeyValue;

        let dir = tempfile::tempdir().unwrap();
        let kv = FileKeyValue::in_dir(dir.path()).unwrap();
        let path = kv.path().to_path_buf();
        std::fs::write(&path, "not json").unwrap();
        let gb = Guestbook::with_clock(KeyValueEntryStore::new(kv), FixedClock::new("now"))
            .malformed_policy(MalformedPolicy::Fail);

        let err = gb.handle_submit(&Submission::new("Ann", "Hi")).unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "not json");
    }

    #[test]
    fn test_render_html_policy() {
        let gb = guestbook();
        gb.save_entry(Some("Ann"), "<em>hi</em>").unwrap();

        assert!(gb.render_html().contains("&lt;em&gt;hi&lt;/em&gt;"));

        let gb = gb.render_policy(RenderPolicy::Raw);
        assert!(gb.render_html().contains("<pre><em>hi</em></pre>"));
    }
}
