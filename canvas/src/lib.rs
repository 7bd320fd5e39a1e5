//! Viewport and annotation engine for climbing-hold puzzles.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns
//! the interactive surface of a puzzle photo: fitting the image to its
//! container, pan and zoom, hit-testing the numbered hold markers, and the
//! two interaction state machines built on top (a read-only viewer for
//! climbers and an editor for puzzle authors). The host JavaScript layer
//! only wires DOM events into [`engine::EngineCore::dispatch`] and forwards
//! the resulting [`engine::Action`]s to the persistence service.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`viewport`] | Image/screen similarity transform, fit and zoom |
//! | [`mode`] | Viewer vs editor capabilities and constants |
//! | [`doc`] | Puzzle and marker types, renumbering |
//! | [`hit`] | Hit-testing markers and the resize handle |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`session`] | Climber identity and selection submissions |
//! | [`render`] | Scene projection and `Canvas2D` drawing |
//! | [`consts`] | Shared numeric constants (zoom limits, radii, etc.) |

pub mod consts;
pub mod doc;
pub mod engine;
pub mod hit;
pub mod input;
pub mod mode;
pub mod render;
pub mod session;
pub mod viewport;
