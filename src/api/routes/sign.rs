//! Sign Route
//!
//! Target of the guestbook form's native submission.
//!
//! - POST /sign - form-encoded `author` and `content`, redirects back to `/`

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Form,
};
use std::sync::Arc;

use crate::api::dto::SignForm;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::entry::Submission;
use crate::guestbook::SubmitOutcome;

/// Plain-text body for a blank submission
pub const EMPTY_CONTENT_MESSAGE: &str = "Content cannot be empty";

/// POST /sign
pub async fn sign(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SignForm>,
) -> ApiResult<Response> {
    let submission = Submission::from(form);

    let response = match state.submit(&submission).await? {
        SubmitOutcome::Saved { .. } => (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response(),
        SubmitOutcome::Rejected { .. } => {
            (StatusCode::BAD_REQUEST, EMPTY_CONTENT_MESSAGE).into_response()
        }
    };

    Ok(response)
}
