//! Default roster, wheel layout, puzzle set, and timings.

use std::time::Duration;

/// How long the wheel animates before a sector is delivered.
pub const DEFAULT_SPIN_DURATION: Duration = Duration::from_millis(4000);

/// How long a bankrupt/pass/wrong-guess notification stays up before the
/// turn moves on.
pub const DEFAULT_NOTIFICATION_DELAY: Duration = Duration::from_millis(5000);

pub const DEFAULT_PLAYER_NAMES: [&str; 3] = ["Player 1", "Player 2", "Player 3"];

/// Sector layout in wheel order: `(label, points)`. Zero points marks a
/// special sector identified by its label.
pub const DEFAULT_SECTORS: [(&str, u32); 12] = [
    ("100", 100),
    (BANKRUPT_LABEL, 0),
    ("200", 200),
    ("400", 400),
    (PASS_LABEL, 0),
    ("500", 500),
    ("1000", 1000),
    ("300", 300),
    ("250", 250),
    (BANKRUPT_LABEL, 0),
    ("150", 150),
    ("800", 800),
];

pub const BANKRUPT_LABEL: &str = "BANKRUPT";
pub const PASS_LABEL: &str = "PASS";

/// `(id, category, phrase)`
pub const DEFAULT_PUZZLES: [(&str, &str, &str); 3] = [
    ("1", "DRINKS", "COCA COLA GELADA"),
    ("2", "MOVIES", "VINGADORES ULTIMATO"),
    ("3", "SAYINGS", "QUEM RI POR ULTIMO RI MELHOR"),
];
