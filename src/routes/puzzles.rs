//! Puzzle routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use holdboard_canvas::doc::Puzzle;
use serde::Deserialize;
use time::OffsetDateTime;
use tracing::error;

use crate::services::puzzle::{self, PuzzleError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePuzzleBody {
    pub name: String,
    pub image_url: String,
}

/// `GET /api/puzzles`: every puzzle in save order.
pub async fn list_puzzles(State(state): State<AppState>) -> Result<Json<Vec<Puzzle>>, StatusCode> {
    let puzzles = puzzle::load_puzzles(&state).await.map_err(puzzle_error_to_status)?;
    Ok(Json(puzzles))
}

/// `PUT /api/puzzles`: replace the whole list.
pub async fn replace_puzzles(
    State(state): State<AppState>,
    Json(body): Json<Vec<Puzzle>>,
) -> Result<Json<Vec<Puzzle>>, StatusCode> {
    let stored = puzzle::replace_puzzles(&state, body).await.map_err(puzzle_error_to_status)?;
    Ok(Json(stored))
}

/// `POST /api/puzzles`: start a new empty puzzle.
pub async fn create_puzzle(
    State(state): State<AppState>,
    Json(body): Json<CreatePuzzleBody>,
) -> Result<(StatusCode, Json<Puzzle>), StatusCode> {
    let created = puzzle::create_puzzle(&state, &body.name, &body.image_url, OffsetDateTime::now_utc())
        .await
        .map_err(puzzle_error_to_status)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /api/puzzles/:id`: fetch one puzzle.
pub async fn get_puzzle(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Puzzle>, StatusCode> {
    let found = puzzle::find_puzzle(&state, &id).await.map_err(puzzle_error_to_status)?;
    Ok(Json(found))
}

/// `PUT /api/puzzles/:id`: save an edited puzzle (the editor's save action).
pub async fn put_puzzle(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Puzzle>,
) -> Result<Json<Puzzle>, StatusCode> {
    if body.id != id {
        return Err(puzzle_error_to_status(PuzzleError::IdMismatch { path: id, body: body.id }));
    }
    let saved = puzzle::upsert_puzzle(&state, body).await.map_err(puzzle_error_to_status)?;
    Ok(Json(saved))
}

/// `DELETE /api/puzzles/:id`: remove a puzzle.
pub async fn delete_puzzle(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, StatusCode> {
    puzzle::delete_puzzle(&state, &id).await.map_err(puzzle_error_to_status)?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) fn puzzle_error_to_status(err: PuzzleError) -> StatusCode {
    match err {
        PuzzleError::NotFound(_) => StatusCode::NOT_FOUND,
        PuzzleError::MissingName
        | PuzzleError::MissingImage
        | PuzzleError::IdMismatch { .. }
        | PuzzleError::DuplicateMarker(_)
        | PuzzleError::DuplicatePuzzle(_) => StatusCode::BAD_REQUEST,
        PuzzleError::Store(e) => {
            error!(error = %e, "puzzle storage failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
#[path = "puzzles_test.rs"]
mod tests;
