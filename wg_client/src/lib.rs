//! Console front end for the wheel game.
//!
//! This library provides command parsing and plain-text rendering used by
//! the wg_client binary.

pub mod commands;
pub mod render;
