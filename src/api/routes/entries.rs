//! Entry Routes
//!
//! JSON access to the server-side guestbook.
//!
//! - GET /api/v1/entries - List entries, newest first
//! - POST /api/v1/entries - Add an entry

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::{CreateEntryRequest, EntriesResponse, EntryResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::entry::Submission;
use crate::guestbook::SubmitOutcome;

/// GET /api/v1/entries
pub async fn list_entries(State(state): State<Arc<AppState>>) -> ApiResult<Json<EntriesResponse>> {
    let entries: Vec<EntryResponse> = state
        .guestbook
        .entries()?
        .iter()
        .map(EntryResponse::from)
        .collect();

    Ok(Json(EntriesResponse {
        count: entries.len(),
        entries,
    }))
}

/// POST /api/v1/entries
///
/// Same validation as the form: blank content is rejected.
pub async fn create_entry(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateEntryRequest>,
) -> ApiResult<(StatusCode, Json<EntryResponse>)> {
    let submission = Submission::from(req);

    match state.submit(&submission).await? {
        SubmitOutcome::Saved { entry } => {
            Ok((StatusCode::CREATED, Json(EntryResponse::from(&entry))))
        }
        SubmitOutcome::Rejected { alert } => Err(ApiError::Validation(alert)),
    }
}
