//! Selection service: climbers' submitted answers.
//!
//! Each climber keeps at most one answer per puzzle: submitting again
//! replaces the earlier record. Records are matched on the exact climber
//! name, so two climbers sharing a name share one answer.

use holdboard_canvas::doc::MarkerId;
use holdboard_canvas::session::SelectionSubmission;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::info;

use crate::services::puzzle::{self, PuzzleError};
use crate::services::store::{self, StoreError};
use crate::state::AppState;

/// Storage key of the selection list.
pub const SELECTIONS_KEY: &str = "climber-selections";

#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    #[error("puzzle not found: {0}")]
    UnknownPuzzle(String),
    #[error("puzzle {puzzle_id} has no marker {marker_id}")]
    UnknownMarker { puzzle_id: String, marker_id: MarkerId },
    #[error(transparent)]
    Puzzle(PuzzleError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<PuzzleError> for SelectionError {
    fn from(err: PuzzleError) -> Self {
        match err {
            PuzzleError::NotFound(id) => Self::UnknownPuzzle(id),
            PuzzleError::Store(e) => Self::Store(e),
            other => Self::Puzzle(other),
        }
    }
}

/// A stored answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionRecord {
    pub puzzle_id: String,
    pub selected_circle_id: MarkerId,
    pub climber_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl SelectionRecord {
    #[must_use]
    pub fn from_submission(submission: SelectionSubmission, timestamp: OffsetDateTime) -> Self {
        Self {
            puzzle_id: submission.puzzle_id,
            selected_circle_id: submission.marker_id,
            climber_name: submission.climber_name,
            timestamp,
        }
    }
}

/// Every stored selection in submission order.
///
/// # Errors
///
/// Returns [`SelectionError::Store`] if the document cannot be read or decoded.
pub async fn load_selections(state: &AppState) -> Result<Vec<SelectionRecord>, SelectionError> {
    Ok(store::get_json(state.store.as_ref(), SELECTIONS_KEY).await?.unwrap_or_default())
}

/// Selections for one puzzle, in submission order.
///
/// # Errors
///
/// Returns [`SelectionError::UnknownPuzzle`] if the puzzle does not exist.
pub async fn selections_for_puzzle(state: &AppState, puzzle_id: &str) -> Result<Vec<SelectionRecord>, SelectionError> {
    puzzle::find_puzzle(state, puzzle_id).await?;
    let mut selections = load_selections(state).await?;
    selections.retain(|s| s.puzzle_id == puzzle_id);
    Ok(selections)
}

/// Record a climber's answer, replacing their earlier answer to the same
/// puzzle.
///
/// # Errors
///
/// Returns [`SelectionError::UnknownPuzzle`] or
/// [`SelectionError::UnknownMarker`] if the submission does not name an
/// existing puzzle and one of its markers. The check runs under the write
/// lock, so a concurrent save cannot remove the marker before the record lands.
pub async fn submit_selection(
    state: &AppState,
    submission: SelectionSubmission,
    now: OffsetDateTime,
) -> Result<SelectionRecord, SelectionError> {
    let _guard = state.write_lock.lock().await;
    let puzzle = puzzle::find_puzzle(state, &submission.puzzle_id).await?;
    if !puzzle.markers.contains(&submission.marker_id) {
        return Err(SelectionError::UnknownMarker { puzzle_id: puzzle.id, marker_id: submission.marker_id });
    }
    let record = SelectionRecord::from_submission(submission, now);

    let mut selections = load_selections(state).await?;
    selections.retain(|s| !(s.puzzle_id == record.puzzle_id && s.climber_name == record.climber_name));
    selections.push(record.clone());
    store::put_json(state.store.as_ref(), SELECTIONS_KEY, &selections).await?;

    info!(
        puzzle_id = %record.puzzle_id,
        marker_id = %record.selected_circle_id,
        climber = %record.climber_name,
        "selection submitted"
    );
    Ok(record)
}

#[cfg(test)]
#[path = "selection_test.rs"]
mod tests;
