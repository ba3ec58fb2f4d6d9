//! Round state machine.
//!
//! A [`RoundState`] owns everything about the puzzle in play: roster and
//! scores, the puzzle queue, guessed letters, the phase, and the wheel value
//! currently at stake. Every mutating entry point is an [`Intent`]; applying
//! one runs to completion and may ask the host for a delayed follow-up
//! through an [`Effect`]. The state machine never waits on anything itself.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::{collections::VecDeque, fmt, time::Duration};
use thiserror::Error;

use super::constants::{DEFAULT_NOTIFICATION_DELAY, DEFAULT_SPIN_DURATION};
use super::entities::{
    GamePhase, GameView, GuessedLetters, Letter, Notification, NotificationKind, Player, PlayerId,
    PlayerView, Puzzle, PuzzleId, QueueEntryView, Score, ScoreDelta, SectorKind, WheelSector,
};
use super::functional::{
    count_occurrences, distinct_letters, is_fully_revealed, mask_phrase, phrase_matches,
};

/// Errors surfaced to the operator
#[derive(Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum RoundError {
    #[error("queue exhausted, add more puzzles")]
    QueueExhausted,
}

/// Events that occur during a round
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum GameEvent {
    PuzzleLoaded { category: String },
    SpinStarted,
    SpinAborted,
    WheelLanded { value: u32 },
    Bankrupt { player: String },
    TurnPassed,
    LetterHit { letter: Letter, count: usize, points: Score },
    LetterMiss { letter: Letter },
    PuzzleSolved { player: String },
    PhraseSolved { player: String },
    WrongSolve { guess: String },
    NextPlayer,
    ScoreAdjusted { player: String, delta: ScoreDelta, score: Score },
    PuzzleAdded { id: PuzzleId, category: String },
    PuzzleRemoved { id: PuzzleId },
    QueueCleared { removed: usize },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::PuzzleLoaded { category } => format!("New round: {category}"),
            Self::SpinStarted => "Spinning...".to_string(),
            Self::SpinAborted => "The wheel stopped without a result. Spin again!".to_string(),
            Self::WheelLanded { value } => format!("Playing for {value}! Pick a letter."),
            Self::Bankrupt { player } => format!("Too bad, {player}! You lost your points."),
            Self::TurnPassed => "The turn passes to the next player.".to_string(),
            Self::LetterHit {
                letter,
                count,
                points,
            } => format!(
                "Correct! Letter {letter} appears {count}x (+{points}). Spin again or solve."
            ),
            Self::LetterMiss { letter } => format!("Letter {letter} is not in the phrase."),
            Self::PuzzleSolved { player } => format!("Congratulations! {player} solved the puzzle!"),
            Self::PhraseSolved { player } => {
                format!("Amazing! {player} guessed the whole phrase!")
            }
            Self::WrongSolve { guess } => format!("\"{guess}\" is wrong!"),
            Self::NextPlayer => "Next player!".to_string(),
            Self::ScoreAdjusted {
                player,
                delta,
                score,
            } => format!("{player} adjusted by {delta:+} to {score}"),
            Self::PuzzleAdded { id, category } => format!("puzzle {id} ({category}) queued"),
            Self::PuzzleRemoved { id } => format!("puzzle {id} removed from the queue"),
            Self::QueueCleared { removed } => format!("queue cleared ({removed} removed)"),
        };
        write!(f, "{repr}")
    }
}

/// Fixed delays the host uses when scheduling follow-ups
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct RoundSettings {
    pub spin_duration: Duration,
    pub notification_delay: Duration,
}

impl Default for RoundSettings {
    fn default() -> Self {
        Self {
            spin_duration: DEFAULT_SPIN_DURATION,
            notification_delay: DEFAULT_NOTIFICATION_DELAY,
        }
    }
}

/// Every mutating entry point of the state machine.
#[derive(Clone, Debug, PartialEq)]
pub enum Intent {
    RequestSpin,
    /// Delivered by the wheel collaborator once per spin.
    ResolveSpin(WheelSector),
    GuessLetter(Letter),
    AttemptSolve(String),
    UpdateScore {
        player_id: PlayerId,
        delta: ScoreDelta,
    },
    LoadPuzzle(PuzzleId),
    AddPuzzle(Puzzle),
    DeletePuzzle(PuzzleId),
    ClearQueue,
    /// Delivered by the host once a notification delay has elapsed.
    AdvanceTurn,
}

/// Follow-up work the host must schedule on behalf of the state machine.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Effect {
    /// Start the wheel; deliver [`Intent::ResolveSpin`] after `duration`.
    SpinRequested { duration: Duration },
    /// Deliver [`Intent::AdvanceTurn`] after `delay`.
    ScheduleTurnAdvance { delay: Duration },
}

/// Trait for reading out what the state machine has done
pub trait GameStateManagement {
    fn drain_events(&mut self) -> VecDeque<GameEvent>;

    /// Snapshot for the presentation layer
    #[must_use]
    fn get_view(&self) -> GameView;
}

#[derive(Clone, Debug)]
pub struct RoundState {
    players: Vec<Player>,
    /// Always a valid index into `players` (or zero with an empty roster).
    active_player: usize,
    current_puzzle: Option<Puzzle>,
    queue: Vec<Puzzle>,
    guessed_letters: GuessedLetters,
    phase: GamePhase,
    /// Only set while `phase` is `Guessing`.
    wheel_value: Option<u32>,
    spin_in_progress: bool,
    /// Set between a notification and the delayed turn advance it causes.
    /// Play intents are ignored meanwhile.
    turn_advance_pending: bool,
    notification: Option<Notification>,
    status: String,
    events: VecDeque<GameEvent>,
    /// Bumped on every transition that changes state.
    version: u64,
    settings: RoundSettings,
}

impl RoundState {
    /// Create a round with a fixed roster and an initial queue. The first
    /// queued puzzle, if any, is loaded immediately.
    #[must_use]
    pub fn new(players: Vec<Player>, puzzles: Vec<Puzzle>, settings: RoundSettings) -> Self {
        let mut state = Self {
            players,
            active_player: 0,
            current_puzzle: None,
            queue: puzzles,
            guessed_letters: GuessedLetters::new(),
            phase: GamePhase::Spinning,
            wheel_value: None,
            spin_in_progress: false,
            turn_advance_pending: false,
            notification: None,
            status: "Spin the wheel to begin!".to_string(),
            events: VecDeque::new(),
            version: 0,
            settings,
        };
        if let Some(first) = state.queue.first().map(|p| p.id.clone()) {
            state.load_puzzle(&first);
        }
        state
    }

    /// Roster with the given names in turn order, ids `1..=n`.
    #[must_use]
    pub fn roster(names: &[&str]) -> Vec<Player> {
        names
            .iter()
            .zip(1u32..)
            .map(|(name, id)| Player::new(PlayerId(id), name))
            .collect()
    }

    pub fn apply(&mut self, intent: Intent) -> Option<Effect> {
        match intent {
            Intent::RequestSpin => self.request_spin(),
            Intent::ResolveSpin(sector) => self.resolve_spin(&sector),
            Intent::GuessLetter(letter) => self.guess_letter(letter),
            Intent::AttemptSolve(guess) => self.attempt_solve(&guess),
            Intent::UpdateScore { player_id, delta } => {
                self.update_score(player_id, delta);
                None
            }
            Intent::LoadPuzzle(id) => {
                self.load_puzzle(&id);
                None
            }
            Intent::AddPuzzle(puzzle) => {
                self.add_puzzle(puzzle);
                None
            }
            Intent::DeletePuzzle(id) => {
                self.delete_puzzle(&id);
                None
            }
            Intent::ClearQueue => {
                self.clear_queue();
                None
            }
            Intent::AdvanceTurn => {
                self.advance_turn();
                None
            }
        }
    }

    /// Make `id` the current puzzle. Unknown ids are ignored. Scores and the
    /// active player carry over.
    pub fn load_puzzle(&mut self, id: &PuzzleId) {
        let Some(puzzle) = self.queue.iter().find(|p| &p.id == id).cloned() else {
            debug!("ignoring load of unknown puzzle {id}");
            return;
        };

        info!("loading puzzle {} ({})", puzzle.id, puzzle.category);
        let category = puzzle.category.clone();
        self.current_puzzle = Some(puzzle);
        self.guessed_letters.clear();
        self.wheel_value = None;
        self.phase = GamePhase::Spinning;
        self.announce(GameEvent::PuzzleLoaded { category });
    }

    /// Load the puzzle queued after the current one. Without a current
    /// puzzle in the queue, the queue head is loaded instead.
    pub fn next_puzzle(&mut self) -> Result<(), RoundError> {
        let next_idx = self
            .current_puzzle
            .as_ref()
            .and_then(|current| self.queue.iter().position(|p| p.id == current.id))
            .map_or(0, |idx| idx + 1);

        let Some(next) = self.queue.get(next_idx).map(|p| p.id.clone()) else {
            warn!("puzzle queue exhausted after {} puzzle(s)", self.queue.len());
            return Err(RoundError::QueueExhausted);
        };
        self.load_puzzle(&next);
        Ok(())
    }

    pub fn request_spin(&mut self) -> Option<Effect> {
        if self.turn_advance_pending
            || self.spin_in_progress
            || self.phase != GamePhase::Spinning
        {
            debug!(
                "ignoring spin request (phase {}, spinning {})",
                self.phase, self.spin_in_progress
            );
            return None;
        }

        self.spin_in_progress = true;
        self.announce(GameEvent::SpinStarted);
        Some(Effect::SpinRequested {
            duration: self.settings.spin_duration,
        })
    }

    /// Release the spin gate when the wheel could not produce a sector.
    pub fn abort_spin(&mut self) {
        if self.spin_in_progress {
            self.spin_in_progress = false;
            self.announce(GameEvent::SpinAborted);
        }
    }

    pub fn resolve_spin(&mut self, sector: &WheelSector) -> Option<Effect> {
        self.spin_in_progress = false;
        if self.turn_advance_pending {
            debug!("discarding sector {sector} while a turn advance is pending");
            self.version += 1;
            return None;
        }
        if self.phase == GamePhase::Solved {
            debug!("discarding sector {sector} for a solved puzzle");
            self.version += 1;
            return None;
        }

        debug!("wheel landed on {sector}");
        match sector.kind {
            SectorKind::Bankrupt => {
                let player = self.active_player_name();
                if let Some(active) = self.players.get_mut(self.active_player) {
                    active.score = 0;
                }
                let event = GameEvent::Bankrupt { player };
                let message = event.to_string();
                self.announce(event);
                self.notify(NotificationKind::Bankrupt, message)
            }
            SectorKind::PassTurn => {
                let event = GameEvent::TurnPassed;
                let message = event.to_string();
                self.announce(event);
                self.notify(NotificationKind::Pass, message)
            }
            SectorKind::Points { value } => {
                self.wheel_value = Some(value);
                self.phase = GamePhase::Guessing;
                self.announce(GameEvent::WheelLanded { value });
                None
            }
        }
    }

    /// Guess one letter. Not gated on the phase: the keyboard is the one
    /// that only enables input while guessing. Letters already guessed for
    /// this puzzle are ignored.
    pub fn guess_letter(&mut self, letter: Letter) -> Option<Effect> {
        if self.turn_advance_pending {
            debug!("ignoring guess {letter} while a turn advance is pending");
            return None;
        }
        let Some(puzzle) = self.current_puzzle.as_ref() else {
            debug!("ignoring guess {letter} without a puzzle");
            return None;
        };
        if self.guessed_letters.contains(&letter) {
            debug!("ignoring repeated guess {letter}");
            return None;
        }

        self.guessed_letters.insert(letter);
        let count = count_occurrences(&puzzle.phrase, letter);
        let solved = is_fully_revealed(&puzzle.phrase, &self.guessed_letters);
        let wheel_value = self.wheel_value.take();

        if count == 0 {
            self.announce(GameEvent::LetterMiss { letter });
            return self.notify(
                NotificationKind::WrongGuess,
                format!("The letter {letter} is not in the phrase."),
            );
        }

        let points = Score::from(wheel_value.unwrap_or(0)) * count as Score;
        if let Some(active) = self.players.get_mut(self.active_player) {
            active.score = active.score.saturating_add(points);
        }
        self.announce(GameEvent::LetterHit {
            letter,
            count,
            points,
        });

        if solved {
            let player = self.active_player_name();
            info!("{player} solved the puzzle letter by letter");
            self.phase = GamePhase::Solved;
            self.announce(GameEvent::PuzzleSolved { player });
        } else {
            // Same player keeps the turn.
            self.phase = GamePhase::Spinning;
        }
        None
    }

    /// Guess the whole phrase. A miss always costs the turn. Not accepted
    /// while the wheel is turning or once the puzzle is solved.
    pub fn attempt_solve(&mut self, guess: &str) -> Option<Effect> {
        if self.turn_advance_pending {
            debug!("ignoring solve attempt while a turn advance is pending");
            return None;
        }
        if self.spin_in_progress || self.phase == GamePhase::Solved {
            debug!(
                "ignoring solve attempt (phase {}, spinning {})",
                self.phase, self.spin_in_progress
            );
            return None;
        }
        let Some(puzzle) = self.current_puzzle.as_ref() else {
            debug!("ignoring solve attempt without a puzzle");
            return None;
        };

        if phrase_matches(guess, &puzzle.phrase) {
            let letters = distinct_letters(&puzzle.phrase);
            self.guessed_letters.extend(letters);
            self.phase = GamePhase::Solved;
            self.wheel_value = None;
            let player = self.active_player_name();
            info!("{player} solved the whole phrase");
            self.announce(GameEvent::PhraseSolved { player });
            return None;
        }

        self.wheel_value = None;
        self.announce(GameEvent::WrongSolve {
            guess: guess.to_string(),
        });
        self.notify(
            NotificationKind::WrongGuess,
            format!("\"{guess}\" is not the correct answer."),
        )
    }

    /// Hand the turn to the next player in roster order.
    pub fn advance_turn(&mut self) {
        self.active_player = (self.active_player + 1)
            .checked_rem(self.players.len())
            .unwrap_or(0);
        self.phase = GamePhase::Spinning;
        self.wheel_value = None;
        self.notification = None;
        self.turn_advance_pending = false;
        self.announce(GameEvent::NextPlayer);
    }

    /// Operator override: apply `delta` to a player's score, floored at
    /// zero. Unknown ids are ignored.
    pub fn update_score(&mut self, player_id: PlayerId, delta: ScoreDelta) {
        let Some(player) = self.players.iter_mut().find(|p| p.id == player_id) else {
            debug!("ignoring score update for unknown player {player_id}");
            return;
        };
        player.apply_delta(delta);
        let event = GameEvent::ScoreAdjusted {
            player: player.name.clone(),
            delta,
            score: player.score,
        };
        self.record(event);
    }

    pub fn add_puzzle(&mut self, puzzle: Puzzle) {
        let event = GameEvent::PuzzleAdded {
            id: puzzle.id.clone(),
            category: puzzle.category.clone(),
        };
        self.queue.push(puzzle);
        self.record(event);
    }

    /// Remove a puzzle from the queue. The current puzzle stays on the board
    /// if it is the one removed.
    pub fn delete_puzzle(&mut self, id: &PuzzleId) {
        let before = self.queue.len();
        self.queue.retain(|p| &p.id != id);
        if self.queue.len() != before {
            self.record(GameEvent::PuzzleRemoved { id: id.clone() });
        }
    }

    pub fn clear_queue(&mut self) {
        let removed = self.queue.len();
        self.queue.clear();
        self.record(GameEvent::QueueCleared { removed });
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn active_player_index(&self) -> usize {
        self.active_player
    }

    #[must_use]
    pub fn active_player(&self) -> Option<&Player> {
        self.players.get(self.active_player)
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn current_puzzle(&self) -> Option<&Puzzle> {
        self.current_puzzle.as_ref()
    }

    #[must_use]
    pub fn queue(&self) -> &[Puzzle] {
        &self.queue
    }

    #[must_use]
    pub fn guessed_letters(&self) -> &GuessedLetters {
        &self.guessed_letters
    }

    #[must_use]
    pub fn wheel_value(&self) -> Option<u32> {
        self.wheel_value
    }

    #[must_use]
    pub fn is_spin_in_progress(&self) -> bool {
        self.spin_in_progress
    }

    #[must_use]
    pub fn is_turn_advance_pending(&self) -> bool {
        self.turn_advance_pending
    }

    #[must_use]
    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[must_use]
    pub fn settings(&self) -> &RoundSettings {
        &self.settings
    }

    fn active_player_name(&self) -> String {
        self.active_player()
            .map(|p| p.name.clone())
            .unwrap_or_default()
    }

    fn notify(&mut self, kind: NotificationKind, message: String) -> Option<Effect> {
        self.notification = Some(Notification { kind, message });
        self.turn_advance_pending = true;
        Some(Effect::ScheduleTurnAdvance {
            delay: self.settings.notification_delay,
        })
    }

    /// Record an event and make it the status line.
    fn announce(&mut self, event: GameEvent) {
        self.status = event.to_string();
        self.record(event);
    }

    fn record(&mut self, event: GameEvent) {
        debug!("{event}");
        self.version += 1;
        self.events.push_back(event);
    }
}

impl GameStateManagement for RoundState {
    fn drain_events(&mut self) -> VecDeque<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn get_view(&self) -> GameView {
        let current_id = self.current_puzzle.as_ref().map(|p| &p.id);
        GameView {
            phase: self.phase,
            players: self
                .players
                .iter()
                .enumerate()
                .map(|(idx, p)| PlayerView {
                    id: p.id,
                    name: p.name.clone(),
                    score: p.score,
                    is_active: idx == self.active_player && self.phase != GamePhase::Solved,
                })
                .collect(),
            active_player: self.active_player,
            category: self.current_puzzle.as_ref().map(|p| p.category.clone()),
            board: self
                .current_puzzle
                .as_ref()
                .map(|p| mask_phrase(&p.phrase, &self.guessed_letters))
                .unwrap_or_default(),
            guessed_letters: self.guessed_letters.iter().copied().collect(),
            wheel_value: self.wheel_value,
            spin_in_progress: self.spin_in_progress,
            status: self.status.clone(),
            notification: self.notification.clone(),
            queue: self
                .queue
                .iter()
                .map(|p| QueueEntryView {
                    id: p.id.clone(),
                    category: p.category.clone(),
                    is_current: Some(&p.id) == current_id,
                })
                .collect(),
        }
    }
}

/// Pure form of [`RoundState::apply`]: the input state is left untouched.
#[must_use]
pub fn reduce(state: &RoundState, intent: Intent) -> (RoundState, Option<Effect>) {
    let mut next = state.clone();
    let effect = next.apply(intent);
    (next, effect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::Tile;

    fn letter(c: char) -> Letter {
        Letter::new(c).unwrap()
    }

    fn coca_cola() -> Puzzle {
        Puzzle::new(PuzzleId::new("1"), "DRINKS", "COCA COLA GELADA")
    }

    fn state_with(puzzles: Vec<Puzzle>) -> RoundState {
        RoundState::new(
            RoundState::roster(&["alice", "bob", "carol"]),
            puzzles,
            RoundSettings::default(),
        )
    }

    fn guessing(value: u32) -> RoundState {
        let mut state = state_with(vec![coca_cola()]);
        assert!(state.request_spin().is_some());
        assert!(state.resolve_spin(&WheelSector::points(value)).is_none());
        state
    }

    // === Construction ===

    #[test]
    fn test_new_loads_first_puzzle() {
        let state = state_with(vec![coca_cola()]);
        assert_eq!(state.current_puzzle().map(|p| p.phrase.as_str()), Some("COCA COLA GELADA"));
        assert_eq!(state.phase(), GamePhase::Spinning);
        assert_eq!(state.status(), "New round: DRINKS");
    }

    #[test]
    fn test_new_without_puzzles() {
        let state = state_with(vec![]);
        assert!(state.current_puzzle().is_none());
        assert_eq!(state.status(), "Spin the wheel to begin!");
        assert_eq!(state.version(), 0);
    }

    // === Spinning ===

    #[test]
    fn test_request_spin_sets_gate() {
        let mut state = state_with(vec![coca_cola()]);
        let effect = state.request_spin();
        assert_eq!(
            effect,
            Some(Effect::SpinRequested {
                duration: DEFAULT_SPIN_DURATION
            })
        );
        assert!(state.is_spin_in_progress());
        assert_eq!(state.status(), "Spinning...");
    }

    #[test]
    fn test_request_spin_ignored_while_spinning() {
        let mut state = state_with(vec![coca_cola()]);
        state.request_spin();
        let version = state.version();
        assert!(state.request_spin().is_none());
        assert_eq!(state.version(), version);
    }

    #[test]
    fn test_request_spin_ignored_while_guessing() {
        let mut state = guessing(100);
        assert!(state.request_spin().is_none());
        assert_eq!(state.phase(), GamePhase::Guessing);
    }

    #[test]
    fn test_points_sector_enters_guessing() {
        let state = guessing(250);
        assert_eq!(state.phase(), GamePhase::Guessing);
        assert_eq!(state.wheel_value(), Some(250));
        assert!(!state.is_spin_in_progress());
        assert_eq!(state.active_player_index(), 0);
        assert_eq!(state.status(), "Playing for 250! Pick a letter.");
    }

    #[test]
    fn test_bankrupt_zeroes_active_player_only() {
        let mut state = state_with(vec![coca_cola()]);
        state.update_score(PlayerId(1), 700);
        state.update_score(PlayerId(2), 300);
        state.request_spin();
        let effect = state.resolve_spin(&WheelSector::bankrupt());

        assert_eq!(
            effect,
            Some(Effect::ScheduleTurnAdvance {
                delay: DEFAULT_NOTIFICATION_DELAY
            })
        );
        assert_eq!(state.player(PlayerId(1)).unwrap().score, 0);
        assert_eq!(state.player(PlayerId(2)).unwrap().score, 300);
        assert_eq!(
            state.notification().map(|n| n.kind),
            Some(NotificationKind::Bankrupt)
        );
        // Turn only moves once the delay fires.
        assert_eq!(state.active_player_index(), 0);
        assert!(state.is_turn_advance_pending());
    }

    #[test]
    fn test_pass_turn_keeps_score() {
        let mut state = state_with(vec![coca_cola()]);
        state.update_score(PlayerId(1), 500);
        state.request_spin();
        let effect = state.resolve_spin(&WheelSector::pass_turn());
        assert!(matches!(effect, Some(Effect::ScheduleTurnAdvance { .. })));
        assert_eq!(state.player(PlayerId(1)).unwrap().score, 500);
        assert_eq!(
            state.notification().map(|n| n.kind),
            Some(NotificationKind::Pass)
        );

        state.advance_turn();
        assert_eq!(state.active_player_index(), 1);
        assert!(state.notification().is_none());
        assert_eq!(state.status(), "Next player!");
    }

    #[test]
    fn test_abort_spin_releases_gate() {
        let mut state = state_with(vec![coca_cola()]);
        state.request_spin();
        state.abort_spin();
        assert!(!state.is_spin_in_progress());
        assert!(state.request_spin().is_some());
    }

    // === Letter guesses ===

    #[test]
    fn test_correct_guess_scales_by_occurrences() {
        let mut state = guessing(200);
        // COCA COLA GELADA has four A's
        assert!(state.guess_letter(letter('A')).is_none());
        assert_eq!(state.player(PlayerId(1)).unwrap().score, 800);
        assert_eq!(state.phase(), GamePhase::Spinning);
        assert_eq!(state.wheel_value(), None);
        assert_eq!(state.active_player_index(), 0);
        assert_eq!(
            state.status(),
            "Correct! Letter A appears 4x (+800). Spin again or solve."
        );
    }

    #[test]
    fn test_correct_guess_without_wheel_value_scores_zero() {
        let mut state = state_with(vec![coca_cola()]);
        state.guess_letter(letter('C'));
        assert_eq!(state.player(PlayerId(1)).unwrap().score, 0);
        assert!(state.guessed_letters().contains(&letter('C')));
    }

    #[test]
    fn test_wrong_guess_schedules_turn_advance() {
        let mut state = guessing(200);
        let effect = state.guess_letter(letter('Z'));
        assert!(matches!(effect, Some(Effect::ScheduleTurnAdvance { .. })));
        assert_eq!(state.status(), "Letter Z is not in the phrase.");
        assert_eq!(
            state.notification().map(|n| n.kind),
            Some(NotificationKind::WrongGuess)
        );
        assert_eq!(state.wheel_value(), None);
        assert_eq!(state.player(PlayerId(1)).unwrap().score, 0);

        state.advance_turn();
        assert_eq!(state.active_player_index(), 1);
        assert_eq!(state.phase(), GamePhase::Spinning);
    }

    #[test]
    fn test_repeated_guess_is_ignored() {
        let mut state = guessing(200);
        state.guess_letter(letter('Z'));
        state.advance_turn();
        state.request_spin();
        state.resolve_spin(&WheelSector::points(100));

        let version = state.version();
        assert!(state.guess_letter(letter('Z')).is_none());
        assert_eq!(state.version(), version);
        assert_eq!(state.active_player_index(), 1);
        assert_eq!(state.phase(), GamePhase::Guessing);
    }

    #[test]
    fn test_guess_without_puzzle_is_noop() {
        let mut state = state_with(vec![]);
        assert!(state.guess_letter(letter('A')).is_none());
        assert!(state.guessed_letters().is_empty());
        assert_eq!(state.version(), 0);
    }

    #[test]
    fn test_play_intents_blocked_while_advance_pending() {
        let mut state = guessing(200);
        state.guess_letter(letter('Z'));
        assert!(state.guess_letter(letter('A')).is_none());
        assert!(state.attempt_solve("COCA COLA GELADA").is_none());
        assert!(state.request_spin().is_none());
        assert!(!state.guessed_letters().contains(&letter('A')));
        assert_ne!(state.phase(), GamePhase::Solved);
    }

    #[test]
    fn test_solve_by_letters() {
        let mut state = state_with(vec![coca_cola()]);
        for c in ['C', 'O', 'A', 'L', 'G', 'E'] {
            state.guess_letter(letter(c));
            assert_ne!(state.phase(), GamePhase::Solved);
        }
        state.guess_letter(letter('D'));
        assert_eq!(state.phase(), GamePhase::Solved);
        assert_eq!(state.status(), "Congratulations! alice solved the puzzle!");
        assert!(!state.get_view().players[0].is_active);
    }

    // === Full-phrase guesses ===

    #[test]
    fn test_attempt_solve_reveals_everything() {
        let mut state = guessing(500);
        assert!(state.attempt_solve("coca cola gelada ").is_none());
        assert_eq!(state.phase(), GamePhase::Solved);
        assert_eq!(state.wheel_value(), None);
        assert_eq!(state.player(PlayerId(1)).unwrap().score, 0);
        assert_eq!(state.guessed_letters(), &distinct_letters("COCA COLA GELADA"));
        assert!(
            state
                .get_view()
                .board
                .iter()
                .flatten()
                .all(|t| matches!(t, Tile::Revealed(_)))
        );
    }

    #[test]
    fn test_attempt_solve_mismatch_costs_turn() {
        let mut state = state_with(vec![coca_cola()]);
        let effect = state.attempt_solve("COCA-COLA GELADA");
        assert!(matches!(effect, Some(Effect::ScheduleTurnAdvance { .. })));
        assert_eq!(state.status(), "\"COCA-COLA GELADA\" is wrong!");
        assert_eq!(
            state.notification().map(|n| n.message.as_str()),
            Some("\"COCA-COLA GELADA\" is not the correct answer.")
        );
    }

    #[test]
    fn test_attempt_solve_without_puzzle_is_noop() {
        let mut state = state_with(vec![]);
        assert!(state.attempt_solve("ANYTHING").is_none());
        assert_eq!(state.version(), 0);
    }

    #[test]
    fn test_attempt_solve_ignored_while_wheel_turning() {
        let mut state = state_with(vec![coca_cola()]);
        state.request_spin();
        let version = state.version();
        assert!(state.attempt_solve("COCA COLA GELADA").is_none());
        assert_eq!(state.phase(), GamePhase::Spinning);
        assert!(state.guessed_letters().is_empty());
        assert_eq!(state.version(), version);

        state.resolve_spin(&WheelSector::points(300));
        assert_eq!(state.phase(), GamePhase::Guessing);
        assert_eq!(state.wheel_value(), Some(300));
    }

    #[test]
    fn test_attempt_solve_ignored_once_solved() {
        let mut state = state_with(vec![coca_cola()]);
        state.attempt_solve("COCA COLA GELADA");
        let version = state.version();
        assert!(state.attempt_solve("PEPSI").is_none());
        assert_eq!(state.phase(), GamePhase::Solved);
        assert!(state.notification().is_none());
        assert_eq!(state.version(), version);
    }

    #[test]
    fn test_resolve_spin_discarded_after_solve() {
        for sector in [
            WheelSector::points(500),
            WheelSector::bankrupt(),
            WheelSector::pass_turn(),
        ] {
            let mut state = state_with(vec![coca_cola()]);
            state.update_score(PlayerId(1), 900);
            state.request_spin();
            // Last letter lands while the wheel is still turning.
            for c in ['C', 'O', 'A', 'L', 'G', 'E', 'D'] {
                state.guess_letter(letter(c));
            }
            assert_eq!(state.phase(), GamePhase::Solved);
            let score = state.player(PlayerId(1)).unwrap().score;

            assert!(state.resolve_spin(&sector).is_none());
            assert!(!state.is_spin_in_progress());
            assert_eq!(state.phase(), GamePhase::Solved);
            assert_eq!(state.wheel_value(), None);
            assert_eq!(state.player(PlayerId(1)).unwrap().score, score);
            assert_eq!(state.active_player_index(), 0);
            assert!(!state.is_turn_advance_pending());
        }
    }

    // === Turns and scores ===

    #[test]
    fn test_advance_turn_wraps() {
        let mut state = state_with(vec![coca_cola()]);
        for expected in [1, 2, 0, 1] {
            state.advance_turn();
            assert_eq!(state.active_player_index(), expected);
        }
    }

    #[test]
    fn test_advance_turn_with_empty_roster() {
        let mut state = RoundState::new(vec![], vec![coca_cola()], RoundSettings::default());
        state.advance_turn();
        assert_eq!(state.active_player_index(), 0);
        assert!(state.active_player().is_none());
    }

    #[test]
    fn test_update_score_unknown_player() {
        let mut state = state_with(vec![]);
        state.update_score(PlayerId(42), 100);
        assert_eq!(state.version(), 0);
        assert!(state.players().iter().all(|p| p.score == 0));
    }

    #[test]
    fn test_update_score_floors_at_zero() {
        let mut state = state_with(vec![]);
        state.update_score(PlayerId(2), 100);
        state.update_score(PlayerId(2), -250);
        assert_eq!(state.player(PlayerId(2)).unwrap().score, 0);
    }

    // === Queue ===

    #[test]
    fn test_load_unknown_puzzle_is_noop() {
        let mut state = state_with(vec![coca_cola()]);
        let version = state.version();
        state.load_puzzle(&PuzzleId::new("missing"));
        assert_eq!(state.version(), version);
        assert_eq!(state.current_puzzle().map(|p| p.id.as_str()), Some("1"));
    }

    #[test]
    fn test_load_puzzle_resets_round_but_not_scores() {
        let second = Puzzle::new(PuzzleId::new("2"), "MOVIES", "VINGADORES ULTIMATO");
        let mut state = guessing(300);
        state.guess_letter(letter('C'));
        state.advance_turn();
        state.load_puzzle(&second.id.clone());
        // not queued yet
        assert_eq!(state.current_puzzle().map(|p| p.id.as_str()), Some("1"));

        state.add_puzzle(second);
        state.load_puzzle(&PuzzleId::new("2"));
        assert_eq!(state.current_puzzle().map(|p| p.id.as_str()), Some("2"));
        assert!(state.guessed_letters().is_empty());
        assert_eq!(state.phase(), GamePhase::Spinning);
        assert_eq!(state.player(PlayerId(1)).unwrap().score, 900);
        assert_eq!(state.active_player_index(), 1);
        assert_eq!(state.status(), "New round: MOVIES");
    }

    #[test]
    fn test_next_puzzle_walks_queue_then_exhausts() {
        let mut state = state_with(vec![
            coca_cola(),
            Puzzle::new(PuzzleId::new("2"), "MOVIES", "VINGADORES ULTIMATO"),
        ]);
        assert_eq!(state.next_puzzle(), Ok(()));
        assert_eq!(state.current_puzzle().map(|p| p.id.as_str()), Some("2"));

        let version = state.version();
        assert_eq!(state.next_puzzle(), Err(RoundError::QueueExhausted));
        assert_eq!(state.version(), version);
        assert_eq!(state.current_puzzle().map(|p| p.id.as_str()), Some("2"));
    }

    #[test]
    fn test_deleting_current_puzzle_keeps_it_on_board() {
        let mut state = state_with(vec![
            coca_cola(),
            Puzzle::new(PuzzleId::new("2"), "MOVIES", "VINGADORES ULTIMATO"),
        ]);
        state.delete_puzzle(&PuzzleId::new("1"));
        assert_eq!(state.queue().len(), 1);
        assert_eq!(state.current_puzzle().map(|p| p.id.as_str()), Some("1"));

        // The queue head is next once the current puzzle left the queue.
        assert_eq!(state.next_puzzle(), Ok(()));
        assert_eq!(state.current_puzzle().map(|p| p.id.as_str()), Some("2"));
    }

    #[test]
    fn test_clear_queue_then_next_is_exhausted() {
        let mut state = state_with(vec![coca_cola()]);
        state.clear_queue();
        assert!(state.queue().is_empty());
        assert_eq!(state.next_puzzle(), Err(RoundError::QueueExhausted));
    }

    #[test]
    fn test_delete_unknown_puzzle_records_nothing() {
        let mut state = state_with(vec![coca_cola()]);
        state.drain_events();
        state.delete_puzzle(&PuzzleId::new("nope"));
        assert!(state.drain_events().is_empty());
    }

    // === Reducer ===

    #[test]
    fn test_reduce_leaves_input_untouched() {
        let state = state_with(vec![coca_cola()]);
        let (next, effect) = reduce(&state, Intent::RequestSpin);
        assert!(effect.is_some());
        assert!(next.is_spin_in_progress());
        assert!(!state.is_spin_in_progress());
        assert!(next.version() > state.version());
    }

    #[test]
    fn test_apply_dispatches_admin_intents() {
        let mut state = state_with(vec![coca_cola()]);
        state.apply(Intent::AddPuzzle(Puzzle::new(
            PuzzleId::new("9"),
            "FOOD",
            "PAO DE QUEIJO",
        )));
        state.apply(Intent::LoadPuzzle(PuzzleId::new("9")));
        state.apply(Intent::UpdateScore {
            player_id: PlayerId(3),
            delta: 50,
        });
        assert_eq!(state.current_puzzle().map(|p| p.category.as_str()), Some("FOOD"));
        assert_eq!(state.player(PlayerId(3)).unwrap().score, 50);
        state.apply(Intent::ClearQueue);
        assert!(state.queue().is_empty());
    }

    #[test]
    fn test_drain_events_empties_log() {
        let mut state = state_with(vec![coca_cola()]);
        state.request_spin();
        let events = state.drain_events();
        assert_eq!(
            events,
            VecDeque::from([
                GameEvent::PuzzleLoaded {
                    category: "DRINKS".to_string()
                },
                GameEvent::SpinStarted,
            ])
        );
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_view_marks_current_queue_entry() {
        let state = state_with(vec![
            coca_cola(),
            Puzzle::new(PuzzleId::new("2"), "MOVIES", "VINGADORES ULTIMATO"),
        ]);
        let view = state.get_view();
        assert!(view.queue[0].is_current);
        assert!(!view.queue[1].is_current);
        assert_eq!(view.category.as_deref(), Some("DRINKS"));
        assert_eq!(view.board.len(), 3);
        assert!(view.players[0].is_active);
    }
}
