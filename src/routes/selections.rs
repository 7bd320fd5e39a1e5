//! Climber selection routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use holdboard_canvas::doc::MarkerId;
use holdboard_canvas::session::{SelectionSubmission, SessionContext};
use serde::Deserialize;
use time::OffsetDateTime;
use tracing::error;

use crate::services::selection::{self, SelectionError, SelectionRecord};
use crate::state::AppState;

/// Body of a submission. The puzzle comes from the path; a missing or blank
/// climber name is recorded as anonymous.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitSelectionBody {
    pub selected_circle_id: MarkerId,
    pub climber_name: Option<String>,
}

/// `GET /api/puzzles/:id/selections`: answers for one puzzle.
pub async fn list_selections(
    State(state): State<AppState>,
    Path(puzzle_id): Path<String>,
) -> Result<Json<Vec<SelectionRecord>>, StatusCode> {
    let records = selection::selections_for_puzzle(&state, &puzzle_id)
        .await
        .map_err(selection_error_to_status)?;
    Ok(Json(records))
}

/// `POST /api/puzzles/:id/selections`: record or replace a climber's answer.
pub async fn submit_selection(
    State(state): State<AppState>,
    Path(puzzle_id): Path<String>,
    Json(body): Json<SubmitSelectionBody>,
) -> Result<(StatusCode, Json<SelectionRecord>), StatusCode> {
    let session = SessionContext::new(body.climber_name.as_deref());
    let submission = SelectionSubmission {
        puzzle_id,
        marker_id: body.selected_circle_id,
        climber_name: session.climber_name().to_owned(),
    };
    let record = selection::submit_selection(&state, submission, OffsetDateTime::now_utc())
        .await
        .map_err(selection_error_to_status)?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub(crate) fn selection_error_to_status(err: SelectionError) -> StatusCode {
    match err {
        SelectionError::UnknownPuzzle(_) => StatusCode::NOT_FOUND,
        SelectionError::UnknownMarker { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        SelectionError::Puzzle(e) => super::puzzles::puzzle_error_to_status(e),
        SelectionError::Store(e) => {
            error!(error = %e, "selection storage failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
#[path = "selections_test.rs"]
mod tests;
