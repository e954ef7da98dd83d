//! Data Transfer Objects
//!
//! Request and response types for the endpoints.

use serde::{Deserialize, Serialize};

use crate::entry::{Entry, Submission};

/// Native form submission to `/sign`
#[derive(Debug, Default, Deserialize)]
pub struct SignForm {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub content: String,
}

impl From<SignForm> for Submission {
    fn from(form: SignForm) -> Self {
        Submission::new(form.author, form.content)
    }
}

/// JSON entry creation request
#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub content: String,
}

impl From<CreateEntryRequest> for Submission {
    fn from(req: CreateEntryRequest) -> Self {
        Submission::new(req.author.unwrap_or_default(), req.content)
    }
}

/// One entry in API responses
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct EntryResponse {
    pub author: String,
    pub content: String,
    pub date: String,
}

impl From<&Entry> for EntryResponse {
    fn from(entry: &Entry) -> Self {
        Self {
            author: entry.display_author().to_string(),
            content: entry.content.clone(),
            date: entry.date.clone(),
        }
    }
}

/// Entry list response, newest first
#[derive(Debug, Serialize, Deserialize)]
pub struct EntriesResponse {
    pub entries: Vec<EntryResponse>,
    pub count: usize,
}

/// Health status response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: "healthy" or "degraded"
    pub status: String,
    /// Storage status: "ok" or "error"
    pub storage: String,
    /// Number of stored entries, when storage is readable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<usize>,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Server version
    pub version: String,
}
