use std::fmt;
use wheel_game::{
    Intent,
    entities::{Letter, PlayerId, Puzzle, PuzzleId, ScoreDelta},
};

/// What the operator typed.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Forwarded to the match as-is.
    Play(Intent),
    NextPuzzle,
    ShowQueue,
    Show,
    Help,
    Quit,
}

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Guess command without exactly one letter.
    InvalidLetter(String),
    /// Solve command without a phrase.
    MissingPhrase,
    /// Score command with a bad player id or delta.
    InvalidScore(String),
    /// Command that needs a puzzle id but got none.
    MissingPuzzleId(&'static str),
    /// Add command without `CATEGORY | PHRASE`.
    InvalidPuzzle,
    /// Unrecognized command.
    UnrecognizedCommand(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLetter(value) => write!(
                f,
                "Invalid letter '{}'. Guess a single letter A-Z (e.g., 'guess a')",
                value
            ),
            Self::MissingPhrase => write!(f, "Solve requires a phrase (e.g., 'solve coca cola')"),
            Self::InvalidScore(value) => write!(
                f,
                "Invalid score adjustment '{}'. Use 'score PLAYER_ID DELTA' (e.g., 'score 2 -100')",
                value
            ),
            Self::MissingPuzzleId(cmd) => {
                write!(f, "'{}' requires a puzzle id (see 'queue')", cmd)
            }
            Self::InvalidPuzzle => write!(
                f,
                "Add requires a category and a phrase (e.g., 'add FRUIT | BANANA SPLIT')"
            ),
            Self::UnrecognizedCommand(cmd) => write!(
                f,
                "Unrecognized command '{}'. Type 'help' to see available commands",
                cmd
            ),
        }
    }
}

impl std::error::Error for ParseError {}

pub const HELP: &str = "\
COMMANDS:
  spin                     Spin the wheel
  guess LETTER             Guess a letter while a value is in play
  solve PHRASE...          Guess the whole phrase
  score ID DELTA           Adjust a player's score (e.g., 'score 1 -100')
  next                     Load the next puzzle in the queue
  load ID                  Load a queued puzzle
  add CATEGORY | PHRASE    Queue a new puzzle
  delete ID                Remove a puzzle from the queue
  clear                    Empty the queue
  queue                    List queued puzzles
  show                     Redraw the board
  help                     Show this help
  quit                     Leave
";

/// Parse a command string into a Command.
///
/// # Examples
///
/// ```
/// use wg_client::commands::{Command, parse_command};
/// use wheel_game::Intent;
///
/// assert!(matches!(parse_command("spin"), Ok(Command::Play(Intent::RequestSpin))));
/// assert!(matches!(parse_command("next"), Ok(Command::NextPuzzle)));
/// assert!(matches!(parse_command("guess a"), Ok(Command::Play(Intent::GuessLetter(_)))));
/// ```
pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let trimmed = input.trim();

    // Try single-word commands first
    match trimmed {
        "spin" => return Ok(Command::Play(Intent::RequestSpin)),
        "next" => return Ok(Command::NextPuzzle),
        "clear" => return Ok(Command::Play(Intent::ClearQueue)),
        "queue" => return Ok(Command::ShowQueue),
        "show" | "" => return Ok(Command::Show),
        "help" => return Ok(Command::Help),
        "quit" | "exit" => return Ok(Command::Quit),
        _ => {}
    }

    // Parse multi-word commands
    let (head, rest) = trimmed
        .split_once(char::is_whitespace)
        .map_or((trimmed, ""), |(head, rest)| (head, rest.trim()));
    match head {
        "guess" => parse_guess_command(rest),
        "solve" if !rest.is_empty() => Ok(Command::Play(Intent::AttemptSolve(rest.to_string()))),
        "solve" => Err(ParseError::MissingPhrase),
        "score" => parse_score_command(rest),
        "load" => parse_puzzle_id(rest, "load").map(|id| Command::Play(Intent::LoadPuzzle(id))),
        "delete" => {
            parse_puzzle_id(rest, "delete").map(|id| Command::Play(Intent::DeletePuzzle(id)))
        }
        "add" => parse_add_command(rest),
        _ => Err(ParseError::UnrecognizedCommand(trimmed.to_string())),
    }
}

/// Parse a guess command: "guess LETTER"
fn parse_guess_command(rest: &str) -> Result<Command, ParseError> {
    let mut chars = rest.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Letter::new(c)
            .map(|letter| Command::Play(Intent::GuessLetter(letter)))
            .ok_or_else(|| ParseError::InvalidLetter(rest.to_string())),
        _ => Err(ParseError::InvalidLetter(rest.to_string())),
    }
}

/// Parse a score command: "score ID DELTA"
fn parse_score_command(rest: &str) -> Result<Command, ParseError> {
    let parts: Vec<&str> = rest.split_ascii_whitespace().collect();
    let [id, delta] = parts.as_slice() else {
        return Err(ParseError::InvalidScore(rest.to_string()));
    };
    let player_id = id
        .parse::<u32>()
        .map_err(|_| ParseError::InvalidScore(rest.to_string()))?;
    let delta = delta
        .trim_start_matches('+')
        .parse::<ScoreDelta>()
        .map_err(|_| ParseError::InvalidScore(rest.to_string()))?;
    Ok(Command::Play(Intent::UpdateScore {
        player_id: PlayerId(player_id),
        delta,
    }))
}

fn parse_puzzle_id(rest: &str, cmd: &'static str) -> Result<PuzzleId, ParseError> {
    if rest.is_empty() {
        return Err(ParseError::MissingPuzzleId(cmd));
    }
    Ok(PuzzleId::new(rest))
}

/// Parse an add command: "add CATEGORY | PHRASE"
///
/// Both parts must be non-empty; the puzzle is uppercased with a fresh id.
fn parse_add_command(rest: &str) -> Result<Command, ParseError> {
    let Some((category, phrase)) = rest.split_once('|') else {
        return Err(ParseError::InvalidPuzzle);
    };
    if category.trim().is_empty() || phrase.trim().is_empty() {
        return Err(ParseError::InvalidPuzzle);
    }
    Ok(Command::Play(Intent::AddPuzzle(Puzzle::from_admin(
        category, phrase,
    ))))
}
