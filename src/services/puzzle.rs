//! Puzzle service: list, create, save and delete annotated photos.
//!
//! DESIGN
//! ======
//! All puzzles live in one JSON array under [`PUZZLES_KEY`]. Saving a
//! puzzle removes any stored puzzle with the same id and appends the new
//! one, so the most recently saved puzzle sorts last and the last write
//! wins. Markers are renumbered 1..N in list order on every write,
//! whatever numbers the client sent.

use std::collections::HashSet;

use holdboard_canvas::doc::{MarkerId, Puzzle};
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::services::store::{self, StoreError};
use crate::state::AppState;

/// Storage key of the puzzle list.
pub const PUZZLES_KEY: &str = "climbing-puzzles";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum PuzzleError {
    #[error("puzzle not found: {0}")]
    NotFound(String),
    #[error("puzzle name is required")]
    MissingName,
    #[error("puzzle image is required")]
    MissingImage,
    #[error("puzzle id mismatch: path {path}, body {body}")]
    IdMismatch { path: String, body: String },
    #[error("marker id {0} appears more than once")]
    DuplicateMarker(MarkerId),
    #[error("puzzle id {0} appears more than once")]
    DuplicatePuzzle(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

// =============================================================================
// READS
// =============================================================================

/// All stored puzzles in save order. An empty store has no puzzles.
///
/// # Errors
///
/// Returns [`PuzzleError::Store`] if the document cannot be read or decoded.
pub async fn load_puzzles(state: &AppState) -> Result<Vec<Puzzle>, PuzzleError> {
    Ok(store::get_json(state.store.as_ref(), PUZZLES_KEY).await?.unwrap_or_default())
}

/// Look up one puzzle by id.
///
/// # Errors
///
/// Returns [`PuzzleError::NotFound`] if no stored puzzle has this id.
pub async fn find_puzzle(state: &AppState, id: &str) -> Result<Puzzle, PuzzleError> {
    load_puzzles(state)
        .await?
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| PuzzleError::NotFound(id.to_owned()))
}

// =============================================================================
// WRITES
// =============================================================================

async fn save_puzzles(state: &AppState, puzzles: &[Puzzle]) -> Result<(), PuzzleError> {
    store::put_json(state.store.as_ref(), PUZZLES_KEY, &puzzles).await?;
    Ok(())
}

fn validate(puzzle: &Puzzle) -> Result<(), PuzzleError> {
    if puzzle.name.trim().is_empty() {
        return Err(PuzzleError::MissingName);
    }
    if puzzle.image_url.trim().is_empty() {
        return Err(PuzzleError::MissingImage);
    }
    let mut seen = HashSet::new();
    if let Some(dup) = puzzle.markers.iter().find(|m| !seen.insert(&m.id)) {
        return Err(PuzzleError::DuplicateMarker(dup.id.clone()));
    }
    Ok(())
}

/// Start a new, empty puzzle and store it.
///
/// # Errors
///
/// Returns [`PuzzleError::MissingName`] or [`PuzzleError::MissingImage`] for
/// blank input, or a store error.
pub async fn create_puzzle(
    state: &AppState,
    name: &str,
    image_url: &str,
    now: OffsetDateTime,
) -> Result<Puzzle, PuzzleError> {
    let puzzle = Puzzle::new(Uuid::new_v4().to_string(), name.trim(), image_url, now);
    validate(&puzzle)?;

    let _guard = state.write_lock.lock().await;
    let mut puzzles = load_puzzles(state).await?;
    puzzles.push(puzzle.clone());
    save_puzzles(state, &puzzles).await?;

    info!(puzzle_id = %puzzle.id, name = %puzzle.name, "puzzle created");
    Ok(puzzle)
}

/// Save `puzzle`, replacing any stored puzzle with the same id. Returns the
/// stored (renumbered) puzzle.
///
/// # Errors
///
/// Returns a validation error for a blank name or image or a repeated marker
/// id, or a store error.
pub async fn upsert_puzzle(state: &AppState, puzzle: Puzzle) -> Result<Puzzle, PuzzleError> {
    validate(&puzzle)?;
    let puzzle = puzzle.renumbered();

    let _guard = state.write_lock.lock().await;
    let mut puzzles = load_puzzles(state).await?;
    puzzles.retain(|p| p.id != puzzle.id);
    puzzles.push(puzzle.clone());
    save_puzzles(state, &puzzles).await?;

    info!(puzzle_id = %puzzle.id, markers = puzzle.markers.len(), "puzzle saved");
    Ok(puzzle)
}

/// Replace the whole puzzle list.
///
/// # Errors
///
/// Returns a validation error if any puzzle is invalid or two puzzles share
/// an id (nothing is written), or a store error.
pub async fn replace_puzzles(state: &AppState, puzzles: Vec<Puzzle>) -> Result<Vec<Puzzle>, PuzzleError> {
    let mut seen = HashSet::new();
    for puzzle in &puzzles {
        validate(puzzle)?;
        if !seen.insert(puzzle.id.as_str()) {
            return Err(PuzzleError::DuplicatePuzzle(puzzle.id.clone()));
        }
    }
    let puzzles: Vec<Puzzle> = puzzles.iter().map(Puzzle::renumbered).collect();

    let _guard = state.write_lock.lock().await;
    save_puzzles(state, &puzzles).await?;

    info!(count = puzzles.len(), "puzzle list replaced");
    Ok(puzzles)
}

/// Remove a puzzle. Selections recorded against it are kept.
///
/// # Errors
///
/// Returns [`PuzzleError::NotFound`] if no stored puzzle has this id.
pub async fn delete_puzzle(state: &AppState, id: &str) -> Result<(), PuzzleError> {
    let _guard = state.write_lock.lock().await;
    let mut puzzles = load_puzzles(state).await?;
    let before = puzzles.len();
    puzzles.retain(|p| p.id != id);
    if puzzles.len() == before {
        return Err(PuzzleError::NotFound(id.to_owned()));
    }
    save_puzzles(state, &puzzles).await?;

    info!(puzzle_id = %id, "puzzle deleted");
    Ok(())
}

#[cfg(test)]
#[path = "puzzle_test.rs"]
mod tests;
