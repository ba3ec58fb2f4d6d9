use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeSet,
    fmt::{self},
};
use uuid::Uuid;

use super::constants::{BANKRUPT_LABEL, DEFAULT_SECTORS, PASS_LABEL};

/// Placeholder for player scores.
pub type Score = u64;

/// Signed score adjustment.
pub type ScoreDelta = i64;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub score: Score,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            score: 0,
        }
    }

    /// Apply a signed delta, flooring the result at zero.
    pub fn apply_delta(&mut self, delta: ScoreDelta) {
        self.score = self.score.saturating_add_signed(delta);
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.score)
    }
}

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct PuzzleId(String);

impl PuzzleId {
    #[must_use]
    pub fn new(s: &str) -> Self {
        Self(s.to_string())
    }

    /// A fresh, unique id for puzzles created from the admin surface.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PuzzleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PuzzleId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Puzzle {
    pub id: PuzzleId,
    pub category: String,
    pub phrase: String,
}

impl Puzzle {
    #[must_use]
    pub fn new(id: PuzzleId, category: &str, phrase: &str) -> Self {
        Self {
            id,
            category: category.to_string(),
            phrase: phrase.to_string(),
        }
    }

    /// Build a puzzle the way the admin surface does: generated id,
    /// uppercased category and phrase.
    #[must_use]
    pub fn from_admin(category: &str, phrase: &str) -> Self {
        Self::new(
            PuzzleId::generate(),
            &category.trim().to_uppercase(),
            &phrase.trim().to_uppercase(),
        )
    }
}

/// A single uppercase ASCII letter.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Letter(char);

impl Letter {
    /// Returns `None` for anything outside `A..=Z` after uppercasing.
    #[must_use]
    pub fn new(c: char) -> Option<Self> {
        let upper = c.to_ascii_uppercase();
        upper.is_ascii_uppercase().then_some(Self(upper))
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        self.0
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Letters guessed during the lifetime of one puzzle.
pub type GuessedLetters = BTreeSet<Letter>;

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SectorKind {
    Points { value: u32 },
    Bankrupt,
    PassTurn,
}

impl fmt::Display for SectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Points { value } => write!(f, "{value}"),
            Self::Bankrupt => write!(f, "bankrupt"),
            Self::PassTurn => write!(f, "pass"),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct WheelSector {
    pub label: String,
    pub kind: SectorKind,
    /// Presentation hints; never inspected by the round logic.
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub text_color: String,
}

impl WheelSector {
    #[must_use]
    pub fn points(value: u32) -> Self {
        Self {
            label: value.to_string(),
            kind: SectorKind::Points { value },
            color: "#FFFFFF".to_string(),
            text_color: "#F40009".to_string(),
        }
    }

    #[must_use]
    pub fn bankrupt() -> Self {
        Self {
            label: BANKRUPT_LABEL.to_string(),
            kind: SectorKind::Bankrupt,
            color: "#1E1E1E".to_string(),
            text_color: "#FFFFFF".to_string(),
        }
    }

    #[must_use]
    pub fn pass_turn() -> Self {
        Self {
            label: PASS_LABEL.to_string(),
            kind: SectorKind::PassTurn,
            color: "#F40009".to_string(),
            text_color: "#FFFFFF".to_string(),
        }
    }

    /// The default twelve-sector layout.
    #[must_use]
    pub fn default_wheel() -> Vec<Self> {
        DEFAULT_SECTORS
            .iter()
            .map(|&(label, value)| match label {
                BANKRUPT_LABEL => Self::bankrupt(),
                PASS_LABEL => Self::pass_turn(),
                _ => Self::points(value),
            })
            .collect()
    }
}

impl fmt::Display for WheelSector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum GamePhase {
    #[default]
    Spinning,
    Guessing,
    Solved,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Spinning => "spinning",
            Self::Guessing => "guessing",
            Self::Solved => "solved",
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum NotificationKind {
    Bankrupt,
    Pass,
    WrongGuess,
}

/// Transient overlay shown while a turn advance is pending.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

/// One cell of the puzzle board.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Tile {
    Hidden,
    Revealed(char),
    /// Punctuation and other non-letters are never hidden.
    Symbol(char),
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hidden => write!(f, "_"),
            Self::Revealed(c) | Self::Symbol(c) => write!(f, "{c}"),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub score: Score,
    pub is_active: bool,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct QueueEntryView {
    pub id: PuzzleId,
    pub category: String,
    pub is_current: bool,
}

/// Everything the presentation layer needs to render a frame.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameView {
    pub phase: GamePhase,
    pub players: Vec<PlayerView>,
    pub active_player: usize,
    pub category: Option<String>,
    pub board: Vec<Vec<Tile>>,
    pub guessed_letters: Vec<Letter>,
    pub wheel_value: Option<u32>,
    pub spin_in_progress: bool,
    pub status: String,
    pub notification: Option<Notification>,
    pub queue: Vec<QueueEntryView>,
}
