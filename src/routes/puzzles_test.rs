use super::*;
use crate::services::store::StoreError;
use crate::state::test_helpers::{dummy_puzzle, test_app_state};

// =============================================================================
// Error mapping
// =============================================================================

#[test]
fn puzzle_error_to_status_maps_not_found() {
    assert_eq!(puzzle_error_to_status(PuzzleError::NotFound("x".into())), StatusCode::NOT_FOUND);
}

#[test]
fn puzzle_error_to_status_maps_validation_to_bad_request() {
    assert_eq!(puzzle_error_to_status(PuzzleError::MissingName), StatusCode::BAD_REQUEST);
    assert_eq!(puzzle_error_to_status(PuzzleError::MissingImage), StatusCode::BAD_REQUEST);
    let mismatch = PuzzleError::IdMismatch { path: "a".into(), body: "b".into() };
    assert_eq!(puzzle_error_to_status(mismatch), StatusCode::BAD_REQUEST);
    assert_eq!(puzzle_error_to_status(PuzzleError::DuplicateMarker("m1".into())), StatusCode::BAD_REQUEST);
    assert_eq!(puzzle_error_to_status(PuzzleError::DuplicatePuzzle("a".into())), StatusCode::BAD_REQUEST);
}

#[test]
fn puzzle_error_to_status_maps_store_to_internal() {
    let err = PuzzleError::Store(StoreError::InvalidKey("../x".into()));
    assert_eq!(puzzle_error_to_status(err), StatusCode::INTERNAL_SERVER_ERROR);
}

// =============================================================================
// Handlers
// =============================================================================

#[tokio::test]
async fn create_then_get_and_list() {
    let state = test_app_state();
    let body = CreatePuzzleBody { name: "Roof".into(), image_url: "https://img.test/roof.jpg".into() };
    let (status, Json(created)) = create_puzzle(State(state.clone()), Json(body)).await.unwrap();
    assert_eq!(status, StatusCode::CREATED);

    let Json(fetched) = get_puzzle(State(state.clone()), Path(created.id.clone())).await.unwrap();
    assert_eq!(fetched, created);

    let Json(all) = list_puzzles(State(state)).await.unwrap();
    assert_eq!(all, vec![created]);
}

#[tokio::test]
async fn create_with_blank_name_is_bad_request() {
    let state = test_app_state();
    let body = CreatePuzzleBody { name: " ".into(), image_url: "img".into() };
    assert_eq!(create_puzzle(State(state), Json(body)).await.unwrap_err(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_unknown_is_not_found() {
    let state = test_app_state();
    assert_eq!(get_puzzle(State(state), Path("nope".into())).await.unwrap_err(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn put_saves_renumbered_puzzle() {
    let state = test_app_state();
    let mut puzzle = dummy_puzzle("p1", 3);
    puzzle.markers.remove(&"m1".into());
    let Json(saved) = put_puzzle(State(state.clone()), Path("p1".into()), Json(puzzle)).await.unwrap();
    let numbers: Vec<u32> = saved.markers.iter().map(|m| m.number).collect();
    assert_eq!(numbers, vec![1, 2]);
}

#[tokio::test]
async fn put_with_mismatched_id_is_bad_request() {
    let state = test_app_state();
    let err = put_puzzle(State(state.clone()), Path("other".into()), Json(dummy_puzzle("p1", 0)))
        .await
        .unwrap_err();
    assert_eq!(err, StatusCode::BAD_REQUEST);
    let Json(all) = list_puzzles(State(state)).await.unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn replace_then_delete() {
    let state = test_app_state();
    let list = vec![dummy_puzzle("a", 1), dummy_puzzle("b", 1)];
    let Json(stored) = replace_puzzles(State(state.clone()), Json(list)).await.unwrap();
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().all(|p| p.markers.as_slice()[0].number == 1));

    let status = delete_puzzle(State(state.clone()), Path("a".into())).await.unwrap();
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(delete_puzzle(State(state.clone()), Path("a".into())).await.unwrap_err(), StatusCode::NOT_FOUND);

    let Json(all) = list_puzzles(State(state)).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, "b");
}

#[tokio::test]
async fn put_with_repeated_marker_id_is_bad_request() {
    let state = test_app_state();
    let mut puzzle = dummy_puzzle("p1", 1);
    let repeat = puzzle.markers.as_slice()[0].clone();
    puzzle.markers.push(repeat);

    let err = put_puzzle(State(state.clone()), Path("p1".into()), Json(puzzle)).await.unwrap_err();
    assert_eq!(err, StatusCode::BAD_REQUEST);
    assert_eq!(get_puzzle(State(state), Path("p1".into())).await.unwrap_err(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn replace_with_repeated_puzzle_id_is_bad_request() {
    let state = test_app_state();
    let list = vec![dummy_puzzle("a", 0), dummy_puzzle("a", 1)];
    let err = replace_puzzles(State(state.clone()), Json(list)).await.unwrap_err();
    assert_eq!(err, StatusCode::BAD_REQUEST);
    let Json(all) = list_puzzles(State(state)).await.unwrap();
    assert!(all.is_empty());
}

#[test]
fn create_body_uses_camel_case() {
    let body: CreatePuzzleBody = serde_json::from_str(r#"{"name":"Slab","imageUrl":"blob:x"}"#).unwrap();
    assert_eq!(body.image_url, "blob:x");
}
