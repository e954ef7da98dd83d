//! Core data types for guestbook entries
//!
//! - `Entry`: one stored greeting (author, content, timestamp)
//! - `Submission`: the author and content fields exactly as the form sent them

use serde::{Deserialize, Serialize};

/// Author stored when a greeting is saved without one
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// Author shown when a stored greeting has no author
pub const ANONYMOUS_DISPLAY_AUTHOR: &str = "An anonymous person";

/// A single guestbook greeting
///
/// Field names on the wire are `Author`, `Content` and `Date`. Every field is
/// tolerated as missing when reading, since the stored list may have been
/// written by other code sharing the same origin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entry {
    /// Who wrote the greeting
    #[serde(rename = "Author", default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Message body, kept verbatim
    #[serde(rename = "Content", default)]
    pub content: String,
    /// Locale-formatted save time
    #[serde(rename = "Date", default)]
    pub date: String,
}

impl Entry {
    /// Create an entry, substituting `Anonymous` for an empty author
    pub fn new(author: Option<&str>, content: impl Into<String>, date: impl Into<String>) -> Self {
        let author = match author {
            Some(a) if !a.is_empty() => a.to_string(),
            _ => ANONYMOUS_AUTHOR.to_string(),
        };

        Self {
            author: Some(author),
            content: content.into(),
            date: date.into(),
        }
    }

    /// Author text for display, falling back to `An anonymous person`
    pub fn display_author(&self) -> &str {
        match self.author.as_deref() {
            Some(a) if !a.is_empty() => a,
            _ => ANONYMOUS_DISPLAY_AUTHOR,
        }
    }
}

/// Raw form input for a new greeting
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Submission {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub content: String,
}

impl Submission {
    pub fn new(author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            content: content.into(),
        }
    }

    /// True when the content is empty after trimming surrounding whitespace
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Author as an optional value, `None` when the field was left empty
    pub fn author(&self) -> Option<&str> {
        if self.author.is_empty() {
            None
        } else {
            Some(&self.author)
        }
    }
}
