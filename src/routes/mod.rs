//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON endpoints the browser engine talks to when it
//! emits `SavePuzzle` and `SelectionSubmitted` actions, plus the puzzle
//! listing and admin endpoints, under a single Axum router.

pub mod puzzles;
pub mod selections;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/puzzles",
            get(puzzles::list_puzzles)
                .put(puzzles::replace_puzzles)
                .post(puzzles::create_puzzle),
        )
        .route(
            "/api/puzzles/{id}",
            get(puzzles::get_puzzle)
                .put(puzzles::put_puzzle)
                .delete(puzzles::delete_puzzle),
        )
        .route(
            "/api/puzzles/{id}/selections",
            get(selections::list_selections).post(selections::submit_selection),
        )
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
