//! The consumed chess-engine collaborator.
//!
//! The orchestration layer never owns or mutates board state directly; it
//! drives a match exclusively through the [`Engine`] trait. The engine owns
//! the position and the move record, generates legal destinations, executes
//! and searches moves, and draws the position into a caller-supplied
//! [`Framebuffer`].
//!
//! [`ShakmatyEngine`] is the bundled implementation; hosts may substitute
//! their own.

mod backend;
mod search;

pub use backend::{EngineError, ShakmatyEngine};

use crate::domain::{GameStatus, Promotion, Side, Square, SquareSet};
use crate::render::Framebuffer;

/// Effective search effort, resolved by the AI invoker from the configured
/// skill level or the clock (see `models::ai`).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SearchParams {
    /// Base full-width search depth in plies.
    pub depth: u8,
    /// Extra capture-only (quiescence) depth below the horizon.
    pub extra_depth: u8,
    /// Depth added when the position looks like an endgame.
    pub endgame_depth: u8,
    /// Jitter root scores to diversify opening play.
    pub randomness: bool,
    /// Move to deprioritize, steering away from immediate repetition.
    pub avoid: Option<(Square, Square)>,
}

/// A move chosen by the search, or accepted from selection input.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ChosenMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Promotion,
}

/// Contract of the external chess engine.
///
/// Preconditions (a playable position, legal moves where stated) are the
/// caller's responsibility; the engine does not re-validate them.
pub trait Engine {
    /// Side whose turn it is.
    fn side_to_move(&self) -> Side;

    /// Owner of the piece on `square`, if any.
    fn piece_owner(&self, square: Square) -> Option<Side>;

    /// Squares reachable by the piece on `square`. Empty when the square is
    /// empty or its piece is not on turn.
    fn legal_destinations(&self, square: Square) -> SquareSet;

    /// Execute a move. Legality is the caller's precondition.
    fn apply_move(&mut self, from: Square, to: Square, promotion: Promotion);

    /// Roll back the most recent executed move, if any.
    fn undo_move(&mut self);

    /// The move that would immediately recreate a previous position, if the
    /// side to move has one available.
    fn repetition_avoidance_hint(&self) -> Option<(Square, Square)>;

    /// Search for a move with the given effort. `None` only when the side to
    /// move has no legal moves.
    fn search_move(&mut self, params: SearchParams) -> Option<ChosenMove>;

    /// Notation for a move about to be played. Reads pre-move state, so call
    /// it before [`apply_move`](Self::apply_move).
    fn move_notation(&self, from: Square, to: Square, promotion: Promotion) -> String;

    /// Terminal or non-terminal state of the game.
    fn status(&self) -> GameStatus;

    /// Half-moves executed this session.
    fn ply(&self) -> u32;

    /// Draw the position into `fb`: square pattern, pieces, the selected
    /// square's ring and corner ticks on every highlighted square.
    fn render_board(
        &self,
        fb: &mut Framebuffer,
        selected: Option<Square>,
        highlight: SquareSet,
        flipped: bool,
    );
}
