//! Match hosting: the synchronous driver and its async actor.
//!
//! This module implements:
//! - Match: state machine + wheel + virtual timers, stepped explicitly
//! - MatchActor: Tokio task feeding wall-clock ticks into a Match
//! - Message-based communication with tokio channels
//!
//! ## Example
//!
//! ```no_run
//! use wheel_game::{GameConfig, Intent, session::MatchActor, wheel::RandomWheel};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = GameConfig::default();
//!     let (actor, handle) = MatchActor::new(&config, RandomWheel::new());
//!     tokio::spawn(actor.run());
//!
//!     let view = handle.dispatch(Intent::RequestSpin).await.unwrap();
//!     println!("{}", view.status);
//! }
//! ```

pub mod actor;
pub mod game_match;
pub mod messages;

pub use actor::{DEFAULT_TICK, MatchActor, MatchHandle};
pub use game_match::{Match, TimerTask};
pub use messages::{MatchError, MatchMessage};
