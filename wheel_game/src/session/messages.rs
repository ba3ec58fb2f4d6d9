//! Match actor message types.

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

use crate::game::{Intent, RoundError, entities::GameView};

/// Messages that can be sent to a MatchActor
#[derive(Debug)]
pub enum MatchMessage {
    /// Any play or admin intent
    Dispatch {
        intent: Intent,
        response: oneshot::Sender<GameView>,
    },

    /// Load the puzzle after the current one
    NextPuzzle {
        response: oneshot::Sender<Result<GameView, RoundError>>,
    },

    GetView {
        response: oneshot::Sender<GameView>,
    },

    /// Receive a fresh view whenever the match changes
    Subscribe {
        id: Uuid,
        sender: mpsc::Sender<GameView>,
    },

    Unsubscribe { id: Uuid },

    /// Cancel pending timers and stop the actor
    Close { response: oneshot::Sender<()> },
}

/// Errors returned through a MatchHandle
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("match is closed")]
    Closed,

    #[error(transparent)]
    Round(#[from] RoundError),
}
