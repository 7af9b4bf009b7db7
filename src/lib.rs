//! Agent Wallboard Backend Library
//!
//! This library exposes modules for testing and external use.
//! The main binary is in `src/main.rs`.

pub mod api;
pub mod config;
pub mod error;
/// Application state management
///
/// Holds the in-memory agent registry and its shared handle.
pub mod state;
