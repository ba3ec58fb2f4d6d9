//! Pure helpers for scoring, solve detection, and board rendering.

use std::collections::BTreeSet;

use super::entities::{GuessedLetters, Letter, Tile};

/// Uppercase and trim, the form used for full-phrase comparison.
#[must_use]
pub fn normalize_phrase(s: &str) -> String {
    s.to_uppercase().trim().to_string()
}

/// Number of times `letter` appears in the uppercased phrase.
#[must_use]
pub fn count_occurrences(phrase: &str, letter: Letter) -> usize {
    phrase
        .to_uppercase()
        .chars()
        .filter(|&c| c == letter.as_char())
        .count()
}

/// The distinct guessable letters of a phrase.
#[must_use]
pub fn distinct_letters(phrase: &str) -> BTreeSet<Letter> {
    phrase.chars().filter_map(Letter::new).collect()
}

/// True once every guessable letter of the phrase has been guessed.
#[must_use]
pub fn is_fully_revealed(phrase: &str, guessed: &GuessedLetters) -> bool {
    distinct_letters(phrase).is_subset(guessed)
}

#[must_use]
pub fn phrase_matches(guess: &str, phrase: &str) -> bool {
    normalize_phrase(guess) == normalize_phrase(phrase)
}

/// Render the phrase as words of tiles. Words are split on spaces;
/// letters not yet guessed are hidden.
#[must_use]
pub fn mask_phrase(phrase: &str, guessed: &GuessedLetters) -> Vec<Vec<Tile>> {
    phrase
        .to_uppercase()
        .split(' ')
        .filter(|word| !word.is_empty())
        .map(|word| {
            word.chars()
                .map(|c| match Letter::new(c) {
                    Some(letter) if guessed.contains(&letter) => Tile::Revealed(c),
                    Some(_) => Tile::Hidden,
                    None => Tile::Symbol(c),
                })
                .collect()
        })
        .collect()
}
