//! Square cursor for 4-direction navigation of the board.

use super::Square;

/// Default resume point: e4, near the middle of the board.
const DEFAULT_LAST: u8 = 28;

/// Tracks the highlighted square on the 8x8 grid.
///
/// Directional moves are modulo-64 arithmetic shifts, so the cursor wraps
/// around the edges of the board. When nothing is highlighted, the first
/// directional input (or an explicit [`select`](Self::select)) resumes at the
/// last highlighted square instead of resetting to a default, and
/// [`deselect`](Self::deselect) remembers the current square for that purpose.
///
/// Pure state; never touches the board.
#[derive(Clone, Copy, Debug)]
pub struct SquareCursor {
    selected: Option<Square>,
    last: Square,
}

impl SquareCursor {
    pub fn new() -> Self {
        Self {
            selected: None,
            last: Square::from_index(DEFAULT_LAST),
        }
    }

    /// The currently highlighted square, if any.
    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    pub fn move_right(&mut self) {
        self.step(1);
    }

    pub fn move_down(&mut self) {
        self.step(8);
    }

    pub fn move_left(&mut self) {
        self.step(63);
    }

    pub fn move_up(&mut self) {
        self.step(56);
    }

    /// Highlight the remembered square without moving.
    pub fn select(&mut self) {
        self.selected = Some(self.last);
    }

    /// Clear the highlight, remembering it for the next select/move.
    pub fn deselect(&mut self) {
        if let Some(square) = self.selected.take() {
            self.last = square;
        }
    }

    /// Highlight a specific square directly.
    pub fn jump_to(&mut self, square: Square) {
        self.selected = Some(square);
        self.last = square;
    }

    /// Overwrite the remembered square without changing the highlight.
    pub fn remember(&mut self, square: Square) {
        self.last = square;
    }

    fn step(&mut self, delta: u8) {
        self.selected = Some(match self.selected {
            // resume where we left off; the motion applies from the next input
            None => self.last,
            Some(square) => Square::from_index((square.index() + delta) % Square::COUNT),
        });
    }
}

impl Default for SquareCursor {
    fn default() -> Self {
        Self::new()
    }
}
