//! Round engine: entities, pure helpers, and the phase state machine.
//!
//! This module provides:
//! - Players, puzzles, wheel sectors, and the presentation snapshot
//! - Scoring and solve-detection helpers
//! - The `Spinning -> Guessing -> Solved` state machine and its intents

pub mod constants;
pub mod entities;
pub mod functional;
pub mod state_machine;

pub use state_machine::*;
