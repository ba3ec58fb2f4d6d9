//! Match actor: runs one [`Match`] on its own task.

use super::{
    game_match::Match,
    messages::{MatchError, MatchMessage},
};
use crate::{
    config::GameConfig,
    game::{GameStateManagement, Intent, entities::GameView},
    scheduler::MatchId,
    wheel::WheelKind,
};
use std::collections::HashMap;
use tokio::{
    sync::{mpsc, oneshot},
    time::{Duration, Instant, MissedTickBehavior, interval},
};
use uuid::Uuid;

/// How often wall-clock time is fed into the match timers.
pub const DEFAULT_TICK: Duration = Duration::from_millis(100);

/// Match actor handle for sending messages
#[derive(Clone, Debug)]
pub struct MatchHandle {
    sender: mpsc::Sender<MatchMessage>,
    match_id: MatchId,
}

impl MatchHandle {
    pub fn new(sender: mpsc::Sender<MatchMessage>, match_id: MatchId) -> Self {
        Self { sender, match_id }
    }

    pub fn match_id(&self) -> MatchId {
        self.match_id
    }

    /// Send a raw message to the match
    pub async fn send(&self, message: MatchMessage) -> Result<(), MatchError> {
        self.sender
            .send(message)
            .await
            .map_err(|_| MatchError::Closed)
    }

    /// Apply an intent and return the resulting view
    pub async fn dispatch(&self, intent: Intent) -> Result<GameView, MatchError> {
        let (response, rx) = oneshot::channel();
        self.send(MatchMessage::Dispatch { intent, response }).await?;
        rx.await.map_err(|_| MatchError::Closed)
    }

    pub async fn next_puzzle(&self) -> Result<GameView, MatchError> {
        let (response, rx) = oneshot::channel();
        self.send(MatchMessage::NextPuzzle { response }).await?;
        Ok(rx.await.map_err(|_| MatchError::Closed)??)
    }

    pub async fn view(&self) -> Result<GameView, MatchError> {
        let (response, rx) = oneshot::channel();
        self.send(MatchMessage::GetView { response }).await?;
        rx.await.map_err(|_| MatchError::Closed)
    }

    /// Subscribe to views pushed after every change
    pub async fn subscribe(
        &self,
        capacity: usize,
    ) -> Result<(Uuid, mpsc::Receiver<GameView>), MatchError> {
        let id = Uuid::new_v4();
        let (sender, receiver) = mpsc::channel(capacity);
        self.send(MatchMessage::Subscribe { id, sender }).await?;
        Ok((id, receiver))
    }

    pub async fn unsubscribe(&self, id: Uuid) -> Result<(), MatchError> {
        self.send(MatchMessage::Unsubscribe { id }).await
    }

    pub async fn close(&self) -> Result<(), MatchError> {
        let (response, rx) = oneshot::channel();
        self.send(MatchMessage::Close { response }).await?;
        rx.await.map_err(|_| MatchError::Closed)
    }
}

/// Match actor owning a single match
pub struct MatchActor {
    game: Match,

    /// Message inbox
    inbox: mpsc::Receiver<MatchMessage>,

    /// Interval at which elapsed time is pushed into the match timers
    tick: Duration,

    is_closed: bool,

    /// Subscribers for state change notifications
    subscribers: HashMap<Uuid, mpsc::Sender<GameView>>,
}

impl MatchActor {
    /// Create a new match actor
    ///
    /// # Returns
    ///
    /// * `(MatchActor, MatchHandle)` - Actor and handle for sending messages
    pub fn new(config: &GameConfig, wheel: impl Into<WheelKind>) -> (Self, MatchHandle) {
        let (sender, inbox) = mpsc::channel(100);
        let game = Match::new(config, wheel);
        let handle = MatchHandle::new(sender, game.id());

        let actor = Self {
            game,
            inbox,
            tick: DEFAULT_TICK,
            is_closed: false,
            subscribers: HashMap::new(),
        };

        (actor, handle)
    }

    #[must_use]
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Run the match actor event loop
    pub async fn run(mut self) {
        let id = self.game.id();
        log::info!("Match {id} starting");

        let mut ticker = interval(self.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_tick = Instant::now();

        loop {
            tokio::select! {
                message = self.inbox.recv() => {
                    let Some(message) = message else {
                        log::debug!("Match {id}: all handles dropped");
                        break;
                    };
                    self.handle_message(message);

                    if self.is_closed {
                        break;
                    }
                }

                _ = ticker.tick() => {
                    let now = Instant::now();
                    let elapsed = now.saturating_duration_since(last_tick);
                    last_tick = now;
                    self.advance(elapsed);
                }
            }
        }

        self.game.cancel_timers();
        log::info!("Match {id} closed");
    }

    fn handle_message(&mut self, message: MatchMessage) {
        match message {
            MatchMessage::Dispatch { intent, response } => {
                self.game.dispatch(intent);
                self.after_change();
                let _ = response.send(self.game.get_view());
            }

            MatchMessage::NextPuzzle { response } => {
                let result = self.game.next_puzzle().map(|()| self.game.get_view());
                if result.is_ok() {
                    self.after_change();
                }
                let _ = response.send(result);
            }

            MatchMessage::GetView { response } => {
                let _ = response.send(self.game.get_view());
            }

            MatchMessage::Subscribe { id, sender } => {
                let _ = sender.try_send(self.game.get_view());
                self.subscribers.insert(id, sender);
                log::debug!("Subscriber {id} joined match {}", self.game.id());
            }

            MatchMessage::Unsubscribe { id } => {
                self.subscribers.remove(&id);
                log::debug!("Subscriber {id} left match {}", self.game.id());
            }

            MatchMessage::Close { response } => {
                self.is_closed = true;
                let _ = response.send(());
            }
        }
    }

    fn advance(&mut self, elapsed: Duration) {
        let version = self.game.state().version();
        self.game.advance_time(elapsed);
        if self.game.state().version() != version {
            self.after_change();
        }
    }

    /// Log what happened and push the new view out
    fn after_change(&mut self) {
        for event in self.game.drain_events() {
            log::info!("Match {}: {event}", self.game.id());
        }
        if self.subscribers.is_empty() {
            return;
        }

        let view = self.game.get_view();
        self.subscribers
            .retain(|id, sender| match sender.try_send(view.clone()) {
                Ok(()) => true,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    log::warn!("Subscriber {id} channel full, dropping view");
                    true
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    log::debug!("Subscriber {id} disconnected, removing");
                    false
                }
            });
    }
}
