//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own validation and storage so route handlers stay
//! focused on protocol translation. Every service function takes the
//! shared `AppState` and writes under its write lock.

pub mod puzzle;
pub mod selection;
pub mod store;
