//! Maps engine status to display messages and the continue/exit signal.

use crate::domain::{GameStatus, Side};

/// Translates the engine's game status into the user-facing message and
/// decides when the orchestration should report the terminal signal.
pub struct GameStateMonitor;

impl GameStateMonitor {
    /// Display message for a terminal status; `None` while the game runs.
    pub fn terminal_message(status: GameStatus) -> Option<&'static str> {
        match status {
            GameStatus::Playing => None,
            GameStatus::WhiteWin => Some("white wins"),
            GameStatus::BlackWin => Some("black wins"),
            GameStatus::DrawStalemate => Some("draw (stalemate)"),
            GameStatus::DrawRepetition => Some("draw (repetition)"),
            GameStatus::DrawDead => Some("draw (dead pos.)"),
            GameStatus::Draw50 => Some("draw (50 moves)"),
            GameStatus::Draw => Some("draw"),
        }
    }

    /// Fall-through message while the game is running.
    pub fn played_message(mover: Side) -> &'static str {
        match mover {
            Side::White => "white played",
            Side::Black => "black played",
        }
    }

    /// Head message on match entry, before any move.
    pub fn to_move_message(side: Side) -> &'static str {
        match side {
            Side::White => "white to move",
            Side::Black => "black to move",
        }
    }

    /// Whether the current orchestration pass should report the terminal
    /// signal instead of performing turn logic.
    pub fn should_exit(status: GameStatus, exit_requested: bool) -> bool {
        exit_requested || status.is_over()
    }
}
