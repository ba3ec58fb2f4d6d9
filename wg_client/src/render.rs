//! Plain-text rendering of a [`GameView`].

use std::fmt::Write;
use wheel_game::entities::{GamePhase, GameView, NotificationKind};

/// Board, players, status line, and any pending notification.
#[must_use]
pub fn render_view(view: &GameView) -> String {
    let mut out = String::new();

    match &view.category {
        Some(category) => {
            let _ = writeln!(out, "[{category}]");
            for word in &view.board {
                let tiles: Vec<String> = word.iter().map(ToString::to_string).collect();
                let _ = writeln!(out, "  {}", tiles.join(" "));
            }
        }
        None => {
            let _ = writeln!(out, "(no puzzle loaded)");
        }
    }

    if !view.guessed_letters.is_empty() {
        let guessed: String = view.guessed_letters.iter().map(|l| l.as_char()).collect();
        let _ = writeln!(out, "guessed: {guessed}");
    }

    for player in &view.players {
        let marker = if player.is_active { ">" } else { " " };
        let _ = writeln!(
            out,
            "{marker} #{} {:<16} {:>7}",
            player.id, player.name, player.score
        );
    }

    let phase = match (view.phase, view.wheel_value) {
        (GamePhase::Guessing, Some(value)) => format!("guessing for {value}"),
        (phase, _) if view.spin_in_progress => format!("{phase}, wheel turning"),
        (phase, _) => phase.to_string(),
    };
    let _ = writeln!(out, "({phase}) {}", view.status);

    if let Some(notification) = &view.notification {
        let tag = match notification.kind {
            NotificationKind::Bankrupt => "BANKRUPT",
            NotificationKind::Pass => "PASS",
            NotificationKind::WrongGuess => "WRONG",
        };
        let _ = writeln!(out, "*** {tag}: {} ***", notification.message);
    }

    out
}

/// One line per queued puzzle, current one marked.
#[must_use]
pub fn render_queue(view: &GameView) -> String {
    if view.queue.is_empty() {
        return "queue is empty\n".to_string();
    }

    let mut out = String::new();
    for entry in &view.queue {
        let marker = if entry.is_current { "*" } else { " " };
        let _ = writeln!(out, "{marker} {:<38} {}", entry.id.as_str(), entry.category);
    }
    out
}
