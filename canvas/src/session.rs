//! Per-session context handed to the engine instead of read from ambient
//! browser storage.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::{Deserialize, Serialize};

use crate::doc::{MarkerId, PuzzleId};

/// Name recorded when the climber gives none.
pub const ANONYMOUS_CLIMBER: &str = "Anonymous";

/// Who is using this viewer. The host asks once per session and passes the
/// result in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    climber_name: String,
}

impl SessionContext {
    /// Blank or missing names become [`ANONYMOUS_CLIMBER`].
    #[must_use]
    pub fn new(climber_name: Option<&str>) -> Self {
        let name = climber_name.map(str::trim).filter(|n| !n.is_empty()).unwrap_or(ANONYMOUS_CLIMBER);
        Self { climber_name: name.to_owned() }
    }

    #[must_use]
    pub fn climber_name(&self) -> &str {
        &self.climber_name
    }
}

/// A climber's answer for one puzzle, as handed to the persistence service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionSubmission {
    pub puzzle_id: PuzzleId,
    #[serde(rename = "selectedCircleId")]
    pub marker_id: MarkerId,
    pub climber_name: String,
}
