//! A single match: state machine, wheel, and timers wired together.

use log::{debug, info, warn};
use std::{collections::VecDeque, time::Duration};

use crate::{
    config::GameConfig,
    game::{
        Effect, GameEvent, GameStateManagement, Intent, RoundError, RoundState,
        entities::{GameView, WheelSector},
    },
    scheduler::{MatchId, Scheduler},
    wheel::{Wheel, WheelKind},
};

/// Follow-ups delivered back into the state machine when their delay ends.
#[derive(Clone, Debug, PartialEq)]
pub enum TimerTask {
    ResolveSpin(WheelSector),
    AdvanceTurn,
}

#[derive(Debug)]
pub struct Match {
    id: MatchId,
    state: RoundState,
    sectors: Vec<WheelSector>,
    wheel: WheelKind,
    timers: Scheduler<TimerTask>,
}

impl Match {
    #[must_use]
    pub fn new(config: &GameConfig, wheel: impl Into<WheelKind>) -> Self {
        let id = MatchId::new();
        info!(
            "match {id} starting with {} player(s) and {} puzzle(s)",
            config.players.len(),
            config.puzzles.len()
        );
        Self {
            id,
            state: RoundState::from(config),
            sectors: config.sectors.clone(),
            wheel: wheel.into(),
            timers: Scheduler::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> MatchId {
        self.id
    }

    #[must_use]
    pub fn state(&self) -> &RoundState {
        &self.state
    }

    /// Current virtual time of this match's timers.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.pending(self.id)
    }

    /// Apply an intent and schedule whatever follow-up it asks for.
    pub fn dispatch(&mut self, intent: Intent) {
        if let Some(effect) = self.state.apply(intent) {
            self.handle_effect(effect);
        }
    }

    /// # Errors
    ///
    /// Returns [`RoundError::QueueExhausted`] when nothing follows the
    /// current puzzle
    pub fn next_puzzle(&mut self) -> Result<(), RoundError> {
        self.state.next_puzzle()
    }

    /// Move the clock forward by `by`, firing every timer that comes due,
    /// including ones scheduled by timers fired along the way.
    pub fn advance_time(&mut self, by: Duration) {
        let until = self.timers.now().saturating_add(by);
        while let Some(scheduled) = self.timers.pop_due(until) {
            debug!("match {}: timer {:?} fired", self.id, scheduled.task);
            let intent = match scheduled.task {
                TimerTask::ResolveSpin(sector) => Intent::ResolveSpin(sector),
                TimerTask::AdvanceTurn => Intent::AdvanceTurn,
            };
            self.dispatch(intent);
        }
        self.timers.advance_to(until);
    }

    /// Fire everything still pending, however far off.
    pub fn run_until_idle(&mut self) {
        while let Some(due) = self.timers.next_due() {
            let by = due.saturating_sub(self.timers.now());
            self.advance_time(by);
        }
    }

    /// Drop all pending timers, returning how many were dropped.
    pub fn cancel_timers(&mut self) -> usize {
        let dropped = self.timers.cancel_owner(self.id);
        if dropped > 0 {
            info!("match {}: cancelled {dropped} pending timer(s)", self.id);
        }
        dropped
    }

    fn handle_effect(&mut self, effect: Effect) {
        match effect {
            Effect::SpinRequested { duration } => match self.wheel.pick(&self.sectors) {
                Some(sector) => {
                    self.timers
                        .schedule(self.id, duration, TimerTask::ResolveSpin(sector));
                }
                None => {
                    warn!("match {}: wheel produced no sector", self.id);
                    self.state.abort_spin();
                }
            },
            Effect::ScheduleTurnAdvance { delay } => {
                self.timers.schedule(self.id, delay, TimerTask::AdvanceTurn);
            }
        }
    }
}

impl GameStateManagement for Match {
    fn drain_events(&mut self) -> VecDeque<GameEvent> {
        self.state.drain_events()
    }

    fn get_view(&self) -> GameView {
        self.state.get_view()
    }
}
