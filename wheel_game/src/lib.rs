//! # Wheel Game
//!
//! A turn-based party word-guessing game: players take turns spinning a
//! reward wheel, guessing letters of a hidden phrase, or trying to solve the
//! phrase outright.
//!
//! ## Architecture
//!
//! The round is a finite state machine with three phases:
//!
//! - **Spinning**: waiting for a spin or a full-phrase guess
//! - **Guessing**: a points value is at stake, waiting for a letter
//! - **Solved**: nothing more to guess until the next puzzle loads
//!
//! Transitions are driven by [`Intent`]s. Anything that has to happen later
//! (the wheel landing, the turn moving on after a notification) comes back
//! out as an [`Effect`] for the host to schedule. [`session::Match`] does that
//! on a virtual clock, and [`session::MatchActor`] runs a match on a Tokio
//! task against wall-clock time.
//!
//! ## Core Modules
//!
//! - [`game`]: entities, scoring helpers, and the state machine
//! - [`scheduler`]: virtual-clock timers keyed by match
//! - [`wheel`]: sector pickers
//! - [`config`]: startup configuration
//! - [`session`]: match driver and actor
//!
//! ## Example
//!
//! ```
//! use wheel_game::{GameConfig, GamePhase, Intent, session::Match, wheel::ScriptedWheel};
//! use wheel_game::entities::{Letter, WheelSector};
//! use std::time::Duration;
//!
//! let config = GameConfig::default();
//! let mut game = Match::new(&config, ScriptedWheel::new([WheelSector::points(200)]));
//!
//! game.dispatch(Intent::RequestSpin);
//! game.advance_time(Duration::from_secs(4));
//! assert_eq!(game.state().phase(), GamePhase::Guessing);
//!
//! game.dispatch(Intent::GuessLetter(Letter::new('a').unwrap()));
//! assert_eq!(game.state().players()[0].score, 800);
//! ```

pub mod config;
pub mod game;
pub mod scheduler;
pub mod session;
pub mod wheel;

pub use config::{ConfigError, GameConfig, TimingConfig};
pub use game::{
    Effect, GameEvent, GameStateManagement, Intent, RoundError, RoundSettings, RoundState,
    constants,
    entities::{self, GamePhase},
    functional, reduce,
};
