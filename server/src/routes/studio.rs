//! Comic studio routes.
//!
//! Every endpoint answers with a [`ComicSnapshot`] body, including failures:
//! the status code says what happened and the snapshot's `error` carries the
//! single user-facing message.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use comic::{ComicSnapshot, ContinueRequest, GenerateRequest};
use uuid::Uuid;

use crate::services::session::SessionError;
use crate::services::studio::{self, StudioError};
use crate::state::AppState;

/// `GET /api/comic/{session_id}`: current session snapshot.
pub async fn get_comic(State(state): State<AppState>, Path(session_id): Path<Uuid>) -> Json<ComicSnapshot> {
    Json(studio::snapshot(&state, session_id).await)
}

/// `POST /api/comic/{session_id}/generate`: start a new comic.
pub async fn generate_comic(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(body): Json<GenerateRequest>,
) -> (StatusCode, Json<ComicSnapshot>) {
    let result = studio::start_generation(&state, session_id, &body.story_prompt, &body.character_prompt).await;
    reply(&state, session_id, result).await
}

/// `POST /api/comic/{session_id}/continue`: append the next page.
pub async fn continue_comic(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(body): Json<ContinueRequest>,
) -> (StatusCode, Json<ComicSnapshot>) {
    let result = studio::continue_generation(&state, session_id, &body.next_story_part).await;
    reply(&state, session_id, result).await
}

/// `DELETE /api/comic/{session_id}`: discard the comic and start over.
pub async fn reset_comic(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> (StatusCode, Json<ComicSnapshot>) {
    let result = studio::reset(&state, session_id).await;
    reply(&state, session_id, result).await
}

async fn reply(
    state: &AppState,
    session_id: Uuid,
    result: Result<ComicSnapshot, StudioError>,
) -> (StatusCode, Json<ComicSnapshot>) {
    match result {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)),
        Err(err) => {
            let mut snapshot = studio::snapshot(state, session_id).await;
            if let StudioError::Rejected(_) = err {
                // Rejections leave the session untouched; the message rides on this response only.
                snapshot.error = Some(err.to_string());
            }
            (studio_error_to_status(&err), Json(snapshot))
        }
    }
}

pub(crate) fn studio_error_to_status(err: &StudioError) -> StatusCode {
    match err {
        StudioError::Rejected(SessionError::Busy | SessionError::PageLimitReached { .. }) => StatusCode::CONFLICT,
        StudioError::Rejected(SessionError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
        StudioError::Generation(_) => StatusCode::BAD_GATEWAY,
    }
}

#[cfg(test)]
#[path = "studio_test.rs"]
mod tests;
